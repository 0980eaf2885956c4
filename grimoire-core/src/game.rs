//! The mutable game aggregate: roster, bluffs, day counter and phase.
//!
//! One `GameState` per storyteller session, mutated strictly sequentially.
//! Assignment and bluff selection are atomic: any failure leaves the state
//! exactly as it was.

use crate::assign::{self, AssignError};
use crate::catalog::{Character, CharacterId, CatalogError, Script, Team};
use crate::night::{NightError, NightPhase, NightProgress, NightSequencer, NightStep};
use crate::player::{Player, PlayerId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

/// Errors surfaced at the operator boundary. All are recoverable; the game
/// state stays at its last valid configuration.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Assign(#[from] AssignError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Night(#[from] NightError),

    #[error("No player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("At most 3 bluffs are allowed, got {got}")]
    TooManyBluffs { got: usize },
}

/// High-level phase of the day/night cycle.
///
/// `FirstNight` occurs exactly once per game, the first time the night
/// traversal runs after assignment; every later night is `OtherNight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Day,
    FirstNight,
    OtherNight,
}

/// The complete session state owned by one storyteller.
#[derive(Debug)]
pub struct GameState {
    day: u32,
    phase: Phase,
    first_night: bool,
    players: Vec<Player>,
    bluffs: Vec<Character>,
    script: Script,
    sequencer: NightSequencer,
}

impl GameState {
    /// Start a fresh session on the given script.
    pub fn new(script: Script) -> Self {
        Self {
            day: 1,
            phase: Phase::Setup,
            first_night: true,
            players: Vec::new(),
            bluffs: Vec::new(),
            script,
            sequencer: NightSequencer::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the next night traversal will use first-night ordering.
    pub fn is_first_night(&self) -> bool {
        self.first_night
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Players in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn bluffs(&self) -> &[Character] {
        &self.bluffs
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    /// Character ids currently held by players.
    fn assigned_ids(&self) -> HashSet<CharacterId> {
        self.players.iter().map(|p| p.character.clone()).collect()
    }

    // ------------------------------------------------------------------
    // Roster management
    // ------------------------------------------------------------------

    /// Seat a new player holding the given script character.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        character_id: &CharacterId,
    ) -> Result<PlayerId, GameError> {
        let character = self
            .script
            .get(character_id)
            .ok_or_else(|| CatalogError::UnknownCharacter(character_id.clone()))?;
        let player = Player::new(name, character);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), GameError> {
        let pos = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))?;
        self.players.remove(pos);
        Ok(())
    }

    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), GameError> {
        self.player_mut(id)?.name = name.into();
        Ok(())
    }

    /// Hand a player a different script character.
    ///
    /// A pick that collides with another player's character is accepted:
    /// duplicate assignment after setup is a storyteller override. The
    /// player keeps their current team label and status flags.
    pub fn reassign_character(
        &mut self,
        id: PlayerId,
        character_id: &CharacterId,
    ) -> Result<(), GameError> {
        if !self.script.contains(character_id) {
            return Err(CatalogError::UnknownCharacter(character_id.clone()).into());
        }
        self.player_mut(id)?.character = character_id.clone();
        Ok(())
    }

    /// Re-label a player's team independently of their character's team.
    pub fn reassign_team(&mut self, id: PlayerId, team: Team) -> Result<(), GameError> {
        self.player_mut(id)?.team = team;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Status toggles
    // ------------------------------------------------------------------

    pub fn toggle_alive(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.player_mut(id)?.toggle_alive();
        Ok(())
    }

    pub fn toggle_poisoned(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.player_mut(id)?.toggle_poisoned();
        Ok(())
    }

    pub fn toggle_drunk(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.player_mut(id)?.toggle_drunk();
        Ok(())
    }

    /// Set or clear a free-form status tag on a player.
    pub fn apply_effect(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
        on: bool,
    ) -> Result<(), GameError> {
        self.player_mut(id)?.set_effect(name, on);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Assignment
    // ------------------------------------------------------------------

    /// Re-deal characters onto the existing named roster.
    ///
    /// Draws a quota-respecting set for the roster size, binds it in seating
    /// order, resets every player's status flags and team label, picks fresh
    /// bluffs and rewinds to day 1 before the first night.
    pub fn assign_random_characters_with_rng<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(AssignError::NoPlayers.into());
        }
        let drawn = assign::draw_characters_with_rng(&self.script, self.players.len(), rng)?;
        self.commit_assignment(&drawn, rng);
        Ok(())
    }

    /// [`Self::assign_random_characters_with_rng`] with the thread-local RNG.
    pub fn assign_random_characters(&mut self) -> Result<(), GameError> {
        self.assign_random_characters_with_rng(&mut rand::thread_rng())
    }

    /// Build a full roster of `player_count` anonymous players from scratch
    /// and deal characters to them.
    ///
    /// Players are named "Player 1".."Player N" in seating order. The
    /// previous roster is discarded only after a successful draw.
    pub fn generate_game_with_rng<R: Rng>(
        &mut self,
        player_count: usize,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let drawn = assign::draw_characters_with_rng(&self.script, player_count, rng)?;

        self.players = drawn
            .iter()
            .enumerate()
            .map(|(i, character)| Player::new(format!("Player {}", i + 1), character))
            .collect();
        self.commit_assignment(&drawn, rng);
        Ok(())
    }

    /// [`Self::generate_game_with_rng`] with the thread-local RNG.
    pub fn generate_game(&mut self, player_count: usize) -> Result<(), GameError> {
        self.generate_game_with_rng(player_count, &mut rand::thread_rng())
    }

    fn commit_assignment<R: Rng>(&mut self, drawn: &[Character], rng: &mut R) {
        for (player, character) in self.players.iter_mut().zip(drawn) {
            player.character = character.id.clone();
            player.team = character.team;
            player.reset_status();
        }
        self.select_bluffs_with_rng(rng);
        self.first_night = true;
        self.day = 1;
        self.phase = Phase::FirstNight;
        self.sequencer.cancel();
        info!(players = self.players.len(), bluffs = self.bluffs.len(), "characters assigned");
    }

    // ------------------------------------------------------------------
    // Bluffs
    // ------------------------------------------------------------------

    /// Pick up to three unassigned good characters as demon bluffs.
    pub fn select_bluffs_with_rng<R: Rng>(&mut self, rng: &mut R) -> &[Character] {
        let assigned = self.assigned_ids();
        self.bluffs = assign::select_bluffs_with_rng(&self.script, &assigned, rng);
        &self.bluffs
    }

    /// [`Self::select_bluffs_with_rng`] with the thread-local RNG.
    pub fn select_bluffs(&mut self) -> &[Character] {
        self.select_bluffs_with_rng(&mut rand::thread_rng())
    }

    /// Manually override the bluff list with specific script characters.
    pub fn set_bluffs(&mut self, ids: &[CharacterId]) -> Result<(), GameError> {
        if ids.len() > assign::BLUFF_COUNT {
            return Err(GameError::TooManyBluffs { got: ids.len() });
        }
        let mut bluffs = Vec::with_capacity(ids.len());
        for id in ids {
            let character = self
                .script
                .get(id)
                .ok_or_else(|| CatalogError::UnknownCharacter(id.clone()))?;
            bluffs.push(character.clone());
        }
        self.bluffs = bluffs;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Day/night cycle
    // ------------------------------------------------------------------

    /// Begin tonight's traversal; first-night ordering the first time after
    /// assignment, other-night ordering afterwards.
    ///
    /// Returns whether any player is up. When nobody acts tonight the night
    /// completes immediately and the state returns to day.
    pub fn start_night(&mut self, show_all: bool) -> bool {
        let night_phase = if self.first_night {
            NightPhase::First
        } else {
            NightPhase::Other
        };
        self.phase = if self.first_night {
            Phase::FirstNight
        } else {
            Phase::OtherNight
        };
        info!(?night_phase, show_all, "night started");

        self.sequencer
            .start(night_phase, &self.players, &self.script, show_all);
        if self.sequencer.is_complete() {
            self.finish_night();
            return false;
        }
        true
    }

    /// The player currently up in the night traversal.
    pub fn night_current(&self) -> Result<NightStep<'_>, GameError> {
        Ok(self.sequencer.current(&self.players, &self.script)?)
    }

    /// Step the night traversal. On `Finished` the night is over: the game
    /// returns to day and the first-night condition is cleared for the rest
    /// of the game.
    pub fn night_advance(&mut self) -> Result<NightProgress, GameError> {
        let progress = self.sequencer.advance()?;
        if progress == NightProgress::Finished {
            self.finish_night();
        }
        Ok(progress)
    }

    /// Abort the night traversal early (the "End Night" action). Flags
    /// toggled mid-sequence stay as they are.
    pub fn end_night(&mut self) {
        self.sequencer.cancel();
        self.finish_night();
    }

    fn finish_night(&mut self) {
        self.first_night = false;
        self.phase = Phase::Day;
        info!(day = self.day, "night finished");
    }

    pub fn is_night_active(&self) -> bool {
        self.sequencer.is_active()
    }

    /// Move to the next day.
    pub fn advance_day(&mut self) {
        self.day += 1;
        self.first_night = false;
        self.phase = Phase::Day;
        info!(day = self.day, "day advanced");
    }
}
