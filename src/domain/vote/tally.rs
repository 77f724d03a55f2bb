//! Tally derivation and the toggle/switch rules for a single (image, identity) pair.
//!
//! States are `None` (no vote), `Some(Up)` and `Some(Down)`. Casting the vote
//! already held removes it; casting anything else replaces it.

use crate::domain::identity::Identity;
use crate::domain::vote::model::{Vote, VoteCount, VoteType};

/// Ledger write needed to move a pair from `current` to its next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    /// Delete the pair's row (toggle-off).
    Remove,
    /// Insert or replace the pair's row with this vote type.
    Upsert(VoteType),
}

pub fn plan_cast(current: Option<VoteType>, cast: VoteType) -> LedgerAction {
    if current == Some(cast) {
        LedgerAction::Remove
    } else {
        LedgerAction::Upsert(cast)
    }
}

pub fn next_state(current: Option<VoteType>, cast: VoteType) -> Option<VoteType> {
    match plan_cast(current, cast) {
        LedgerAction::Remove => None,
        LedgerAction::Upsert(vote_type) => Some(vote_type),
    }
}

impl VoteCount {
    /// Counts `votes` and picks out the vote cast by `identity`, if known.
    pub fn from_votes(votes: &[Vote], identity: Option<&Identity>) -> Self {
        let mut count = VoteCount::default();
        for vote in votes {
            match vote.vote_type {
                VoteType::Up => count.upvotes += 1,
                VoteType::Down => count.downvotes += 1,
            }
            if identity == Some(&vote.identity) {
                count.user_vote = Some(vote.vote_type);
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vote(identity: &str, vote_type: VoteType) -> Vote {
        Vote {
            image_id: "3".to_string(),
            identity: Identity::new(identity),
            vote_type,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn transition_table() {
        use VoteType::{Down, Up};
        let cases = [
            (None, Up, Some(Up)),
            (None, Down, Some(Down)),
            (Some(Up), Up, None),
            (Some(Up), Down, Some(Down)),
            (Some(Down), Down, None),
            (Some(Down), Up, Some(Up)),
        ];
        for (current, cast, expected) in cases {
            assert_eq!(next_state(current, cast), expected, "{:?} --{:?}-->", current, cast);
        }
    }

    #[test]
    fn same_vote_removes_other_vote_upserts() {
        assert_eq!(plan_cast(Some(VoteType::Up), VoteType::Up), LedgerAction::Remove);
        assert_eq!(
            plan_cast(Some(VoteType::Up), VoteType::Down),
            LedgerAction::Upsert(VoteType::Down)
        );
        assert_eq!(plan_cast(None, VoteType::Up), LedgerAction::Upsert(VoteType::Up));
    }

    #[test]
    fn counts_votes_and_finds_callers_vote() {
        let votes = vec![
            vote("1.2.3.4", VoteType::Up),
            vote("5.6.7.8", VoteType::Up),
            vote("9.9.9.9", VoteType::Down),
        ];
        let me = Identity::new("9.9.9.9");

        let count = VoteCount::from_votes(&votes, Some(&me));
        assert_eq!(count.upvotes, 2);
        assert_eq!(count.downvotes, 1);
        assert_eq!(count.user_vote, Some(VoteType::Down));

        let anonymous = VoteCount::from_votes(&votes, None);
        assert_eq!(anonymous.user_vote, None);
        assert_eq!(anonymous.upvotes, 2);
    }

    #[test]
    fn empty_ledger_is_zero_tally() {
        assert_eq!(VoteCount::from_votes(&[], None), VoteCount::default());
    }
}
