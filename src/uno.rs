use serde::{Deserialize, Serialize};

use crate::action::PlayerId;

/// Tracks whether a player who just went down to one card can still be accused.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum UnoCall {
    #[default]
    Idle,
    Pending {
        accused: PlayerId,
        /// Turn number at which the accusation window is closed.
        closes_when_turn: u64,
        /// The accused declared in time.
        satisfied: bool,
        /// A penalty has already been applied for this window.
        applied: bool,
    },
}

impl UnoCall {
    pub fn open(accused: PlayerId, closes_when_turn: u64, satisfied: bool) -> Self {
        UnoCall::Pending {
            accused,
            closes_when_turn,
            satisfied,
            applied: false,
        }
    }

    pub fn accused(&self) -> Option<PlayerId> {
        match self {
            UnoCall::Idle => None,
            UnoCall::Pending { accused, .. } => Some(*accused),
        }
    }

    /// Whether `player` is the accused of an open, unpenalized window.
    pub fn is_open_for(&self, player: PlayerId) -> bool {
        match self {
            UnoCall::Idle => false,
            UnoCall::Pending {
                accused, applied, ..
            } => *accused == player && !*applied,
        }
    }

    /// Whether a catch against `player` is compatible with this window.
    pub fn permits_catch(&self, player: PlayerId) -> bool {
        match self {
            UnoCall::Idle => true,
            UnoCall::Pending {
                accused,
                satisfied,
                applied,
                ..
            } => *accused == player && !*satisfied && !*applied,
        }
    }

    pub fn satisfy(&mut self) {
        if let UnoCall::Pending { satisfied, .. } = self {
            *satisfied = true;
        }
    }

    /// Closes the window silently once `turn` has reached its closing turn.
    pub fn expire(&mut self, turn: u64) -> bool {
        match *self {
            UnoCall::Pending {
                closes_when_turn, ..
            } if turn >= closes_when_turn => {
                *self = UnoCall::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_permits_catch_but_has_no_accused() {
        let call = UnoCall::Idle;
        assert!(call.permits_catch(3));
        assert!(!call.is_open_for(3));
        assert_eq!(call.accused(), None);
    }

    #[test]
    fn pending_only_permits_its_own_unsatisfied_accused() {
        let mut call = UnoCall::open(1, 5, false);
        assert!(call.permits_catch(1));
        assert!(!call.permits_catch(2));
        call.satisfy();
        assert!(!call.permits_catch(1));
        assert!(call.is_open_for(1));
    }

    #[test]
    fn applied_window_rejects_catch_and_declaration() {
        let call = UnoCall::Pending {
            accused: 0,
            closes_when_turn: 4,
            satisfied: false,
            applied: true,
        };
        assert!(!call.permits_catch(0));
        assert!(!call.is_open_for(0));
    }

    #[test]
    fn expires_at_closing_turn() {
        let mut call = UnoCall::open(2, 7, false);
        assert!(!call.expire(6));
        assert_eq!(call.accused(), Some(2));
        assert!(call.expire(7));
        assert_eq!(call, UnoCall::Idle);
        assert!(!call.expire(8));
    }
}
