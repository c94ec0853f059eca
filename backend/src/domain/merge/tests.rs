//! Tests for the merge operation.

use std::sync::Arc;

use super::{MergeError, MergeService};
use crate::domain::collection::{CodecError, decode_collection, encode_collection};
use crate::domain::ports::{MockUserRepository, UserPersistenceError};
use crate::domain::user::{NewUser, UserRecord};

fn existing_record(n: i32) -> UserRecord {
    UserRecord {
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        email: format!("user{n}@mail.com"),
        rate: n * 10,
    }
}

fn new_user(id: i32, rate: i32) -> NewUser {
    NewUser {
        id,
        first_name: format!("New{id}"),
        last_name: format!("User{id}"),
        email: format!("new{id}@mail.com"),
        rate,
    }
}

fn accepting_repository() -> MockUserRepository {
    let mut repository = MockUserRepository::new();
    repository.expect_insert_batch().returning(|_| Ok(()));
    repository
}

#[tokio::test]
async fn appends_new_users_after_existing_ones() {
    let existing: Vec<UserRecord> = (1..=3).map(existing_record).collect();
    let document = encode_collection(&existing).expect("encode fixture");
    let new_users = vec![new_user(1001, 8), new_user(1002, 87)];

    let service = MergeService::new(Arc::new(accepting_repository()));
    let merged = service
        .merge(&document, &new_users)
        .await
        .expect("merge succeeds");

    let records = decode_collection(&merged).expect("merged document decodes");
    assert_eq!(records.len(), 5);
    assert_eq!(&records[..3], &existing[..]);
    assert_eq!(records[3], new_users[0].record());
    assert_eq!(records[4], new_users[1].record());
}

#[tokio::test]
async fn hands_the_batch_to_the_store_with_identifiers() {
    let new_users = vec![new_user(7, 42)];
    let expected = new_users.clone();
    let mut repository = MockUserRepository::new();
    repository
        .expect_insert_batch()
        .withf(move |batch| batch == expected.as_slice())
        .times(1)
        .returning(|_| Ok(()));

    let document = encode_collection(&[]).expect("encode fixture");
    let service = MergeService::new(Arc::new(repository));
    let merged = service
        .merge(&document, &new_users)
        .await
        .expect("merge succeeds");

    // Identifiers reach the store but never the encoded output.
    assert!(!merged.contains("<id>"));
}

#[tokio::test]
async fn empty_batch_reencodes_the_document_unchanged() {
    let existing: Vec<UserRecord> = (1..=2).map(existing_record).collect();
    let document = encode_collection(&existing).expect("encode fixture");

    let mut repository = MockUserRepository::new();
    repository
        .expect_insert_batch()
        .withf(|batch| batch.is_empty())
        .times(1)
        .returning(|_| Ok(()));

    let service = MergeService::new(Arc::new(repository));
    let merged = service.merge(&document, &[]).await.expect("merge succeeds");

    assert_eq!(decode_collection(&merged).expect("decodes"), existing);
}

#[tokio::test]
async fn propagates_parse_failures_without_touching_the_store() {
    let mut repository = MockUserRepository::new();
    repository.expect_insert_batch().times(0);

    let service = MergeService::new(Arc::new(repository));
    let result = service.merge("<NotACollection/>", &[]).await;

    assert_eq!(result, Err(MergeError::Codec(CodecError::MissingRoot)));
}

#[tokio::test]
async fn propagates_persistence_failures() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_insert_batch()
        .returning(|_| Err(UserPersistenceError::query("duplicate user identifier")));

    let document = encode_collection(&[]).expect("encode fixture");
    let service = MergeService::new(Arc::new(repository));
    let result = service.merge(&document, &[new_user(1, 1)]).await;

    assert_eq!(
        result,
        Err(MergeError::Persistence(UserPersistenceError::query(
            "duplicate user identifier"
        )))
    );
}
