use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};
use crate::store::{DocumentStore, to_document_data};

pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Athlete,
    Recruiter,
}

impl Role {
    pub fn toggle(self) -> Role {
        match self {
            Role::Athlete => Role::Recruiter,
            Role::Recruiter => Role::Athlete,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Athlete => "ATHLETE",
            Role::Recruiter => "RECRUITER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub display_name: String,
    pub sport: String,
    pub position: String,
    pub age: Option<u8>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<f32>,
    pub school: Option<String>,
    pub graduation_year: Option<u16>,
    pub gpa: Option<f32>,
    pub highlights_url: Option<String>,
    #[serde(default)]
    pub awards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterProfile {
    pub display_name: String,
    pub organization: String,
    pub title: Option<String>,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum UserProfile {
    Athlete(AthleteProfile),
    Recruiter(RecruiterProfile),
}

impl UserProfile {
    pub fn role(&self) -> Role {
        match self {
            UserProfile::Athlete(_) => Role::Athlete,
            UserProfile::Recruiter(_) => Role::Recruiter,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            UserProfile::Athlete(p) => &p.display_name,
            UserProfile::Recruiter(p) => &p.display_name,
        }
    }

    pub fn sport_position(&self) -> Option<(&str, &str)> {
        match self {
            UserProfile::Athlete(p) => Some((&p.sport, &p.position)),
            UserProfile::Recruiter(_) => None,
        }
    }
}

pub fn fetch_profile(store: &dyn DocumentStore, uid: &str) -> DashResult<UserProfile> {
    let doc = store
        .get_document(USERS_COLLECTION, uid)?
        .ok_or_else(|| DashError::not_found(format!("profile for user {uid}")))?;
    doc.decode()
}

pub fn save_profile(store: &mut dyn DocumentStore, uid: &str, profile: &UserProfile) -> DashResult<()> {
    let data = to_document_data(profile)?;
    store.set_document(USERS_COLLECTION, uid, data)
}
