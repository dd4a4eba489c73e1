//! User Entity
//!
//! The persisted user document. Issued tokens live in their own
//! repository (`AuthToken`) and are not loaded with the user.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    age::Age, avatar::Avatar, email::Email, user_name::UserName, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: UserName,
    /// Unique, lower-cased; also the login identifier
    pub email: Email,
    /// Argon2id hash, never serialised to clients
    pub password: UserPassword,
    pub age: Age,
    /// Normalised PNG, absent until uploaded
    pub avatar: Option<Avatar>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: UserName, email: Email, password: UserPassword, age: Age) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password,
            age,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_name(&mut self, name: UserName) {
        self.name = name;
        self.touch();
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.touch();
    }

    pub fn set_age(&mut self, age: Age) {
        self.age = age;
        self.touch();
    }

    pub fn set_avatar(&mut self, avatar: Avatar) {
        self.avatar = Some(avatar);
        self.touch();
    }

    pub fn clear_avatar(&mut self) {
        self.avatar = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
