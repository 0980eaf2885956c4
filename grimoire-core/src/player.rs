//! Players and their storyteller-visible status.

use crate::catalog::{Character, CharacterId, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a seated player. Stays stable across renames and
/// character reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seated player holding exactly one character from the active script.
///
/// `team` starts as the character's team but may be re-labeled by the
/// storyteller (e.g. an outsider turned evil). `effects` is an open-ended
/// set of ad-hoc status tags; each player owns its own map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    pub character: CharacterId,
    pub alive: bool,
    pub poisoned: bool,
    pub drunk: bool,
    pub effects: HashMap<String, bool>,
}

impl Player {
    pub fn new(name: impl Into<String>, character: &Character) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            team: character.team,
            character: character.id.clone(),
            alive: true,
            poisoned: false,
            drunk: false,
            effects: HashMap::new(),
        }
    }

    /// Render the status line shown next to the player.
    ///
    /// "Healthy" when nothing applies; otherwise the built-in flags followed
    /// by active effects, sorted by name so the rendering does not depend on
    /// toggle order.
    pub fn status(&self) -> String {
        let mut flags: Vec<&str> = Vec::new();
        if !self.alive {
            flags.push("Dead");
        }
        if self.poisoned {
            flags.push("Poisoned");
        }
        if self.drunk {
            flags.push("Drunk");
        }

        let mut active: Vec<&str> = self
            .effects
            .iter()
            .filter(|(_, &on)| on)
            .map(|(name, _)| name.as_str())
            .collect();
        active.sort_unstable();
        flags.extend(active);

        if flags.is_empty() {
            "Healthy".to_string()
        } else {
            flags.join(" / ")
        }
    }

    pub fn toggle_alive(&mut self) {
        self.alive = !self.alive;
    }

    pub fn toggle_poisoned(&mut self) {
        self.poisoned = !self.poisoned;
    }

    pub fn toggle_drunk(&mut self) {
        self.drunk = !self.drunk;
    }

    pub fn set_effect(&mut self, name: impl Into<String>, on: bool) {
        self.effects.insert(name.into(), on);
    }

    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// Reset to a fresh state, as done when characters are (re)assigned.
    pub fn reset_status(&mut self) {
        self.alive = true;
        self.poisoned = false;
        self.drunk = false;
        self.effects.clear();
    }
}
