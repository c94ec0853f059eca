//! End-to-end tests driving the HTTP surface with an in-process app.
//!
//! Mirrors the operational flow of the service: the token gate, statistics
//! over an uploaded document, and merging new users followed by a fresh
//! analysis of the merged output.

use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::ports::FixtureUserRepository;
use backend::domain::{MergeService, UserRecord, decode_collection, encode_collection};
use backend::inbound::http::files::{add_users, analyze};
use backend::inbound::http::gate::{no_token, token};
use backend::inbound::http::state::HttpState;

fn seeded_record(n: i32, rate: i32) -> UserRecord {
    UserRecord {
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        email: format!("user{n}@mail.com"),
        rate,
    }
}

/// Three users with rates 10, 60, and 35: minimum 10, maximum 60, mean 35.
fn seeded_document() -> String {
    let records: Vec<UserRecord> = [(1, 10), (2, 60), (3, 35)]
        .into_iter()
        .map(|(n, rate)| seeded_record(n, rate))
        .collect();
    encode_collection(&records).expect("encode seeded document")
}

fn app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState {
        merge: MergeService::new(Arc::new(FixtureUserRepository)),
    };
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/file").service(analyze).service(add_users))
        .service(
            web::scope("/api/testmiddleware")
                .service(token)
                .service(no_token),
        )
}

#[actix_web::test]
async fn gate_denies_requests_without_a_token() {
    let service = actix_test::init_service(app()).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/testmiddleware/token")
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[actix_web::test]
async fn gate_allows_any_non_empty_token() {
    let service = actix_test::init_service(app()).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/testmiddleware/token?token=12345678")
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_web::test]
async fn ungated_route_always_allows() {
    let service = actix_test::init_service(app()).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/testmiddleware/notoken")
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_web::test]
async fn analyze_reports_rate_statistics() {
    let service = actix_test::init_service(app()).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/file/analyze")
        .set_payload(seeded_document())
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status().as_u16(), 200);

    let statistics: Value = actix_test::read_body_json(response).await;
    assert_eq!(statistics["minRate"], 10);
    assert_eq!(statistics["maxRate"], 60);
    let average = statistics["averageRate"].as_f64().expect("mean");
    assert!((average - 35.0).abs() < 1e-9);
}

#[actix_web::test]
async fn adduser_then_reanalyze_reflects_the_new_extrema() {
    let service = actix_test::init_service(app()).await;

    let payload = json!({
        "content": BASE64.encode(seeded_document()),
        "users": [
            {
                "id": 1001,
                "firstName": "Denny",
                "lastName": "Chadwyck",
                "email": "test1@mail.com",
                "rate": 8
            },
            {
                "id": 1002,
                "firstName": "Meredithe",
                "lastName": "Vannet",
                "email": "test2@mail.com",
                "rate": 87
            },
            {
                "id": 1003,
                "firstName": "Cymbre",
                "lastName": "Spini",
                "email": "test3@mail.com",
                "rate": 90
            }
        ]
    });
    let request = actix_test::TestRequest::post()
        .uri("/api/file/adduser")
        .set_json(&payload)
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = actix_test::read_body(response).await;
    let merged = String::from_utf8(body.to_vec()).expect("merged XML is UTF-8");

    let records = decode_collection(&merged).expect("merged document decodes");
    assert_eq!(records.len(), 6);
    assert_eq!(records[0], seeded_record(1, 10));
    assert_eq!(records[1], seeded_record(2, 60));
    assert_eq!(records[2], seeded_record(3, 35));
    assert!(
        records
            .iter()
            .any(|r| r.email == "test1@mail.com" && r.first_name == "Denny")
    );
    assert!(
        records
            .iter()
            .any(|r| r.email == "test2@mail.com" && r.first_name == "Meredithe")
    );
    assert!(
        records
            .iter()
            .any(|r| r.email == "test3@mail.com" && r.first_name == "Cymbre")
    );
    // Identifiers never come back out of the merge.
    assert!(!merged.contains("<id>"));

    let reanalyze = actix_test::TestRequest::post()
        .uri("/api/file/analyze")
        .set_payload(merged)
        .to_request();
    let response = actix_test::call_service(&service, reanalyze).await;
    assert_eq!(response.status().as_u16(), 200);

    let statistics: Value = actix_test::read_body_json(response).await;
    assert_eq!(statistics["minRate"], 8);
    assert_eq!(statistics["maxRate"], 90);
    let average = statistics["averageRate"].as_f64().expect("mean");
    assert!((average - 290.0 / 6.0).abs() < 1e-9);
}
