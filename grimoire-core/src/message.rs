//! Canned storyteller messages.
//!
//! The storyteller privately shows a player one of five fixed openers
//! combined with a character name ("You are now the Imp"). Pure display
//! text; the engine never interprets it.

use crate::catalog::Character;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed message openers offered to the storyteller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    YouAreNow,
    YouWereChosenBy,
    YouWereSeenAs,
    YouLearnThat,
    YouFeelLike,
}

impl MessageKind {
    pub fn text(&self) -> &'static str {
        match self {
            MessageKind::YouAreNow => "You are now",
            MessageKind::YouWereChosenBy => "You were chosen by",
            MessageKind::YouWereSeenAs => "You were seen as",
            MessageKind::YouLearnThat => "You learn that",
            MessageKind::YouFeelLike => "You feel like",
        }
    }

    pub fn all() -> [MessageKind; 5] {
        [
            MessageKind::YouAreNow,
            MessageKind::YouWereChosenBy,
            MessageKind::YouWereSeenAs,
            MessageKind::YouLearnThat,
            MessageKind::YouFeelLike,
        ]
    }

    /// Compose the full message for a character.
    pub fn compose(&self, character: &Character) -> String {
        format!("{} {}", self.text(), character.name)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
