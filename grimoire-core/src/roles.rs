//! Role distribution table.
//!
//! The fixed quota of characters per team for each supported player count.
//! Assignment must match these counts exactly, not "at least".

use crate::assign::AssignError;
use crate::catalog::Team;
use std::collections::HashMap;

/// Smallest supported player count.
pub const MIN_PLAYERS: usize = 5;
/// Largest supported player count.
pub const MAX_PLAYERS: usize = 15;

/// Required character counts per team for one player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamQuota {
    pub townsfolk: usize,
    pub outsider: usize,
    pub minion: usize,
    pub demon: usize,
}

lazy_static::lazy_static! {
    static ref ROLE_DISTRIBUTION: HashMap<usize, TeamQuota> = {
        let mut m = HashMap::new();
        m.insert(5, TeamQuota { townsfolk: 3, outsider: 0, minion: 1, demon: 1 });
        m.insert(6, TeamQuota { townsfolk: 3, outsider: 1, minion: 1, demon: 1 });
        m.insert(7, TeamQuota { townsfolk: 5, outsider: 0, minion: 1, demon: 1 });
        m.insert(8, TeamQuota { townsfolk: 5, outsider: 1, minion: 1, demon: 1 });
        m.insert(9, TeamQuota { townsfolk: 5, outsider: 2, minion: 1, demon: 1 });
        m.insert(10, TeamQuota { townsfolk: 7, outsider: 0, minion: 2, demon: 1 });
        m.insert(11, TeamQuota { townsfolk: 7, outsider: 1, minion: 2, demon: 1 });
        m.insert(12, TeamQuota { townsfolk: 7, outsider: 2, minion: 2, demon: 1 });
        m.insert(13, TeamQuota { townsfolk: 9, outsider: 0, minion: 3, demon: 1 });
        m.insert(14, TeamQuota { townsfolk: 9, outsider: 1, minion: 3, demon: 1 });
        m.insert(15, TeamQuota { townsfolk: 9, outsider: 2, minion: 3, demon: 1 });
        m
    };
}

impl TeamQuota {
    /// Look up the quota for a player count, failing outside 5..=15.
    pub fn for_player_count(player_count: usize) -> Result<TeamQuota, AssignError> {
        ROLE_DISTRIBUTION
            .get(&player_count)
            .copied()
            .ok_or(AssignError::UnsupportedPlayerCount(player_count))
    }

    /// Quota for a single team. Evil townsfolk are never auto-assigned,
    /// only applied by manual team re-labeling.
    pub fn for_team(&self, team: Team) -> usize {
        match team {
            Team::Townsfolk => self.townsfolk,
            Team::Outsider => self.outsider,
            Team::Minion => self.minion,
            Team::Demon => self.demon,
            Team::EvilTownsfolk => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.townsfolk + self.outsider + self.minion + self.demon
    }
}
