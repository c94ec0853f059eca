//! User record types shared by the codec, statistics, and merge paths.

/// One user entry as carried by a `UserCollection` document.
///
/// Records preserve the order in which they appear in the source document;
/// nothing deduplicates by email or identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address; not required to be unique.
    pub email: String,
    /// The only numeric field summarised by statistics.
    pub rate: i32,
}

/// A user submitted on the merge path.
///
/// The identifier exists for persistence only. Encoded XML output never
/// carries an `id` leaf, so identifiers are invisible to consumers of the
/// merged document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub rate: i32,
}

impl NewUser {
    /// Project the record fields, dropping the identifier.
    pub fn record(&self) -> UserRecord {
        UserRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            rate: self.rate,
        }
    }
}
