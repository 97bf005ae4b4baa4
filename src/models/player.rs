//! Player: a licensed league member attached to a company.

use crate::models::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams and lookups).
pub type PlayerId = Uuid;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    /// Federation license number, unique across the league.
    pub license_number: String,
    pub birth_date: Option<NaiveDate>,
    /// Account used by this player to log in, if any.
    pub user_id: Option<UserId>,
}

/// Fields needed to register a player. Also used as the full replacement on update.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub license_number: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl Player {
    /// Create a player from validated fields. Names are stored trimmed.
    pub fn new(fields: NewPlayer) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: fields.first_name.trim().to_string(),
            last_name: fields.last_name.trim().to_string(),
            company: fields.company.trim().to_string(),
            license_number: fields.license_number.trim().to_string(),
            birth_date: fields.birth_date,
            user_id: fields.user_id,
        }
    }

    /// "First Last", as shown to opponents.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
