//! Wire messages between a remote participant and a session.
//!
//! ```
//! use tongits_engine::core::{Action, PlayerId};
//! use tongits_engine::session::ActionCommand;
//!
//! let command = ActionCommand::from_json(
//!     r#"{"sessionId":"t-1","player":1,"action":{"type":"discard","handIndex":2}}"#,
//! )
//! .unwrap();
//! assert_eq!(command.player, PlayerId::SECOND);
//! assert_eq!(command.action, Action::discard(2));
//! ```

use serde::{Deserialize, Serialize};

use super::snapshot::GameStateSnapshot;
use crate::core::{Action, ErrorKind, PlayerId};

/// One action submitted by a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCommand {
    pub session_id: String,
    pub player: PlayerId,
    pub action: Action,
}

impl ActionCommand {
    /// Build a command.
    #[must_use]
    pub fn new(session_id: impl Into<String>, player: PlayerId, action: Action) -> Self {
        Self {
            session_id: session_id.into(),
            player,
            action,
        }
    }

    /// Parse a command from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Reply to an `ActionCommand`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionOutcome {
    /// The action was applied; the state as the acting player now sees it.
    Accepted { new_state: Box<GameStateSnapshot> },
    /// The action was refused and the session is unchanged.
    Rejected { reason: ErrorKind },
}

impl ActionOutcome {
    /// True for `Accepted`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ActionOutcome::Accepted { .. })
    }

    /// The snapshot, if accepted.
    #[must_use]
    pub fn snapshot(&self) -> Option<&GameStateSnapshot> {
        match self {
            ActionOutcome::Accepted { new_state } => Some(&**new_state),
            ActionOutcome::Rejected { .. } => None,
        }
    }

    /// The rejection reason, if rejected.
    #[must_use]
    pub fn reason(&self) -> Option<ErrorKind> {
        match self {
            ActionOutcome::Accepted { .. } => None,
            ActionOutcome::Rejected { reason } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_format() {
        let command = ActionCommand::new("t-9", PlayerId::FIRST, Action::create_meld(&[0, 1, 2]));
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(
            json,
            r#"{"sessionId":"t-9","player":0,"action":{"type":"createMeld","handIndices":[0,1,2]}}"#
        );
        assert_eq!(ActionCommand::from_json(&json).unwrap(), command);
        assert!(ActionCommand::from_json(r#"{"sessionId":"t-9","player":3,"action":{"type":"draw","fromDiscard":false}}"#).is_err());
    }

    #[test]
    fn test_rejected_wire_format() {
        let outcome = ActionOutcome::Rejected {
            reason: ErrorKind::NotYourTurn,
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"status":"rejected","reason":"NotYourTurn"}"#
        );
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.reason(), Some(ErrorKind::NotYourTurn));
        assert!(outcome.snapshot().is_none());
    }
}
