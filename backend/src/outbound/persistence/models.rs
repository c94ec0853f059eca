//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer, never exposed to the
//! domain.

use diesel::prelude::*;

use super::schema::users;
use crate::domain::user::NewUser;

/// Insertable row for the users table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: i32,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub rate: i32,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            id: user.id,
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            rate: user.rate,
        }
    }
}
