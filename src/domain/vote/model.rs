use crate::domain::identity::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    /// Value stored in the `vote_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Up => "up",
            VoteType::Down => "down",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteType::Up),
            "down" => Ok(VoteType::Down),
            other => Err(format!("unknown vote type '{}'", other)),
        }
    }
}

/// One row of the vote ledger. At most one exists per `(image_id, identity)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub image_id: String,
    #[serde(rename = "user_ip")]
    pub identity: Identity,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

/// Derived summary of the votes on one image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteCount {
    pub upvotes: u64,
    pub downvotes: u64,
    /// The current caller's vote, if any.
    pub user_vote: Option<VoteType>,
}

/// What a cast did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CastResult {
    /// `true` when the cast toggled an existing vote off.
    pub removed: bool,
    pub vote_type: VoteType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_type_round_trips_column_values() {
        assert_eq!("up".parse::<VoteType>(), Ok(VoteType::Up));
        assert_eq!("down".parse::<VoteType>(), Ok(VoteType::Down));
        assert!("sideways".parse::<VoteType>().is_err());
        assert_eq!(VoteType::Down.as_str(), "down");
    }

    #[test]
    fn vote_count_serializes_absent_user_vote_as_null() {
        let json = serde_json::to_value(VoteCount::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "upvotes": 0, "downvotes": 0, "user_vote": null })
        );
    }
}
