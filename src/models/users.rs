use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

/// Registration form as posted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserOut {
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            email: user.email,
            is_active: user.is_active,
        }
    }
}

impl UserCreate {
    pub fn into_new_user(self, hashed_password: String) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            hashed_password,
        }
    }
}
