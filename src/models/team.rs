//! Team (a pair of players representing a company) and Pool.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Unique identifier for a pool.
pub type PoolId = Uuid;

/// Two players playing together for one company.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub company: String,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub pool_id: Option<PoolId>,
}

impl Team {
    pub fn new(company: impl Into<String>, player_1: PlayerId, player_2: PlayerId, pool_id: Option<PoolId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: company.into(),
            player_1,
            player_2,
            pool_id,
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.player_1 == player_id || self.player_2 == player_id
    }

    /// True if both teams are the same company with the same two players, in either order.
    pub fn same_lineup(&self, company: &str, player_1: PlayerId, player_2: PlayerId) -> bool {
        self.company == company
            && ((self.player_1 == player_1 && self.player_2 == player_2)
                || (self.player_1 == player_2 && self.player_2 == player_1))
    }
}

/// A named group of teams playing each other.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
}

impl Pool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
