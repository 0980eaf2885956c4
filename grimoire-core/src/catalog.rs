//! Character catalog and script loading.
//!
//! The catalog is the complete set of known character definitions, loaded
//! once per session from a JSON file. A script is the ordered subset of the
//! catalog in play for one session; it is the active rule set every other
//! component draws from. Initialization is two-phase: catalog first, then
//! script selection against that catalog.

use crate::night::NightPhase;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors from catalog and script loading, and from direct character picks.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown character: {0}")]
    UnknownCharacter(CharacterId),
}

/// Night order value meaning "no night action / sorts last".
pub const NO_NIGHT_ACTION_ORDER: u32 = 999;

// ============================================================================
// Teams
// ============================================================================

/// Character alignment. A player's displayed team may diverge from their
/// character's nominal team (e.g. an outsider turned evil).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "townsfolk")]
    Townsfolk,
    #[serde(rename = "outsider")]
    Outsider,
    #[serde(rename = "minion")]
    Minion,
    #[serde(rename = "demon")]
    Demon,
    #[serde(rename = "evil townsfolk")]
    EvilTownsfolk,
}

impl Team {
    pub fn name(&self) -> &'static str {
        match self {
            Team::Townsfolk => "townsfolk",
            Team::Outsider => "outsider",
            Team::Minion => "minion",
            Team::Demon => "demon",
            Team::EvilTownsfolk => "evil townsfolk",
        }
    }

    /// Display color used by the rendering layer.
    pub fn color(&self) -> &'static str {
        match self {
            Team::Townsfolk => "Blue",
            Team::Outsider => "Green",
            Team::Minion => "Red",
            Team::Demon => "Orange",
            Team::EvilTownsfolk => "Red",
        }
    }

    /// Townsfolk and outsiders are the good teams; only they are eligible
    /// as demon bluffs.
    pub fn is_good(&self) -> bool {
        matches!(self, Team::Townsfolk | Team::Outsider)
    }

    pub fn all() -> [Team; 5] {
        [
            Team::Townsfolk,
            Team::Outsider,
            Team::Minion,
            Team::Demon,
            Team::EvilTownsfolk,
        ]
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Characters
// ============================================================================

/// Catalog identifier for a character (e.g. "washerwoman").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn default_night_order() -> u32 {
    NO_NIGHT_ACTION_ORDER
}

/// An immutable character definition.
///
/// `ability` and the reminder fields are display text shown to the
/// storyteller; the engine never interprets them. An empty reminder means
/// the character has no action in that night phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub team: Team,
    pub ability: String,

    /// Priority during the first night; lower acts earlier.
    #[serde(default = "default_night_order")]
    pub first_night_order: u32,

    /// Priority during every later night; lower acts earlier.
    #[serde(default = "default_night_order")]
    pub other_night_order: u32,

    #[serde(default, alias = "firstNightReminder")]
    pub first_night_reminder: String,

    #[serde(default, alias = "otherNightReminder")]
    pub other_night_reminder: String,

    /// Free-text reminder tokens, display-only.
    #[serde(default)]
    pub reminders: Vec<String>,
}

impl Character {
    pub fn night_order(&self, phase: NightPhase) -> u32 {
        match phase {
            NightPhase::First => self.first_night_order,
            NightPhase::Other => self.other_night_order,
        }
    }

    pub fn night_reminder(&self, phase: NightPhase) -> &str {
        match phase {
            NightPhase::First => &self.first_night_reminder,
            NightPhase::Other => &self.other_night_reminder,
        }
    }

    /// Whether the character acts at all in the given phase.
    pub fn has_night_action(&self, phase: NightPhase) -> bool {
        !self.night_reminder(phase).is_empty()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.team, self.ability)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// All known character definitions, keyed by id. Loaded once per session
/// and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    characters: HashMap<CharacterId, Character>,
}

impl Catalog {
    /// Build a catalog from already constructed characters. Duplicate ids
    /// keep the last definition seen, matching the load order semantics of
    /// the JSON form.
    pub fn from_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        let characters = characters
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Self { characters }
    }

    /// Parse a catalog from a JSON array of character records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Ok(Self::from_characters(characters))
    }

    /// Load a catalog file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn contains(&self, id: &CharacterId) -> bool {
        self.characters.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }
}

// ============================================================================
// Scripts
// ============================================================================

/// A script file entry; anything beyond the id is ignored.
#[derive(Debug, Deserialize)]
struct ScriptEntry {
    id: CharacterId,
}

/// Result of loading a script file: the usable script plus the ids that
/// were not found in the catalog and therefore skipped.
#[derive(Debug, Clone)]
pub struct ScriptLoad {
    pub script: Script,
    pub unknown_ids: Vec<CharacterId>,
}

/// The ordered subset of the catalog in play for one session.
#[derive(Debug, Clone, Default)]
pub struct Script {
    characters: Vec<Character>,
}

impl Script {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Parse a script from a JSON array of `{ "id": ... }` entries.
    ///
    /// Entries referencing ids absent from the catalog are skipped and
    /// reported in `unknown_ids`, not treated as a load failure.
    pub fn from_json(catalog: &Catalog, json: &str) -> Result<ScriptLoad, CatalogError> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(json)?;

        let mut characters = Vec::new();
        let mut unknown_ids = Vec::new();
        for entry in entries {
            match catalog.get(&entry.id) {
                Some(character) => characters.push(character.clone()),
                None => unknown_ids.push(entry.id),
            }
        }

        if !unknown_ids.is_empty() {
            warn!(?unknown_ids, "script references characters missing from catalog");
        }

        Ok(ScriptLoad {
            script: Self { characters },
            unknown_ids,
        })
    }

    /// Load a script file from disk against an already loaded catalog.
    pub fn load(catalog: &Catalog, path: impl AsRef<Path>) -> Result<ScriptLoad, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(catalog, &content)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &CharacterId) -> bool {
        self.get(id).is_some()
    }

    /// All script characters on the given team, in script order.
    pub fn by_team(&self, team: Team) -> Vec<&Character> {
        self.characters.iter().filter(|c| c.team == team).collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
