use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{DashError, DashResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

pub trait AuthProvider {
    fn current_user(&self) -> Option<User>;
    fn sign_out(&mut self);
}

pub fn require_user(auth: &dyn AuthProvider) -> DashResult<User> {
    auth.current_user().ok_or(DashError::Unauthenticated)
}

/// Session seeded from configuration; there is no credential exchange.
#[derive(Debug, Clone, Default)]
pub struct EnvAuth {
    user: Option<User>,
}

impl EnvAuth {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn from_config(config: &Config) -> Self {
        let Some(id) = config.user_id.clone() else {
            return Self::signed_out();
        };
        let display_name = config.user_name.clone().unwrap_or_else(|| id.clone());
        let email = config
            .user_email
            .clone()
            .unwrap_or_else(|| format!("{id}@localhost"));
        Self::signed_in(User {
            id,
            display_name,
            email,
            photo_url: config.user_photo.clone(),
        })
    }
}

impl AuthProvider for EnvAuth {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
    }
}
