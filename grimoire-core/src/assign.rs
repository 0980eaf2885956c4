//! Constrained-random character assignment and demon bluff selection.
//!
//! Drawing is quota-driven: each team contributes exactly the count the
//! role distribution table demands for the player count, sampled without
//! replacement from the script, then the combined set is shuffled so that
//! seating order carries no team information.
//!
//! Every random operation has a `*_with_rng` form so tests can supply a
//! seeded RNG; the plain forms use `thread_rng`.

use crate::catalog::{Character, CharacterId, Script, Team};
use crate::roles::TeamQuota;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Maximum number of demon bluffs shown to the storyteller.
pub const BLUFF_COUNT: usize = 3;

/// Errors from character assignment.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("Unsupported player count: {0} (only 5-15 players are supported)")]
    UnsupportedPlayerCount(usize),

    #[error("Not enough {team} characters in script (needed {required}, have {available})")]
    InsufficientCharacters {
        team: Team,
        required: usize,
        available: usize,
    },

    #[error("Add players before assigning characters")]
    NoPlayers,
}

/// Draw a quota-respecting random character set for `player_count` players.
///
/// The returned sequence is already shuffled; the caller binds it 1:1 to
/// players in seating order. Fails before drawing anything if any team pool
/// is smaller than its quota, so the operation is atomic. Evil townsfolk in
/// the script are not eligible for automatic assignment.
pub fn draw_characters_with_rng<R: Rng>(
    script: &Script,
    player_count: usize,
    rng: &mut R,
) -> Result<Vec<Character>, AssignError> {
    let quota = TeamQuota::for_player_count(player_count)?;

    let teams = [Team::Townsfolk, Team::Outsider, Team::Minion, Team::Demon];
    let pools: Vec<(Team, Vec<&Character>)> =
        teams.iter().map(|&t| (t, script.by_team(t))).collect();

    // Validate every pool before drawing from any of them.
    for (team, pool) in &pools {
        let required = quota.for_team(*team);
        if pool.len() < required {
            return Err(AssignError::InsufficientCharacters {
                team: *team,
                required,
                available: pool.len(),
            });
        }
    }

    let mut selected: Vec<Character> = Vec::with_capacity(player_count);
    for (team, pool) in &pools {
        let count = quota.for_team(*team);
        selected.extend(
            pool.choose_multiple(rng, count)
                .map(|c| (*c).clone()),
        );
    }

    // Decorrelate team order before binding to seats.
    selected.shuffle(rng);

    debug!(player_count, "drew character set");
    Ok(selected)
}

/// [`draw_characters_with_rng`] with the thread-local RNG.
pub fn draw_characters(
    script: &Script,
    player_count: usize,
) -> Result<Vec<Character>, AssignError> {
    draw_characters_with_rng(script, player_count, &mut rand::thread_rng())
}

/// Pick demon bluffs: up to three good-team characters from the script that
/// are not assigned to any player.
///
/// An empty pool yields an empty list rather than an error; the caller
/// shows "no bluffs available".
pub fn select_bluffs_with_rng<R: Rng>(
    script: &Script,
    assigned_ids: &HashSet<CharacterId>,
    rng: &mut R,
) -> Vec<Character> {
    let pool: Vec<&Character> = script
        .characters()
        .iter()
        .filter(|c| c.team.is_good() && !assigned_ids.contains(&c.id))
        .collect();

    let count = BLUFF_COUNT.min(pool.len());
    pool.choose_multiple(rng, count)
        .map(|c| (*c).clone())
        .collect()
}

/// [`select_bluffs_with_rng`] with the thread-local RNG.
pub fn select_bluffs(script: &Script, assigned_ids: &HashSet<CharacterId>) -> Vec<Character> {
    select_bluffs_with_rng(script, assigned_ids, &mut rand::thread_rng())
}
