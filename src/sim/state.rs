//! Game state and core simulation types
//!
//! `GameState` is the snapshot the host renders from. Only the engine
//! mutates it.

use serde::{Deserialize, Serialize};

use super::progression::{accuracy, target_size_for_level};
use super::target::Target;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, targets moving, clicks count
    Playing,
    /// Everything frozen until resumed
    Paused,
    /// Time ran out
    Ended,
}

/// Something the host may want to react to (sound, particles, HUD pop)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hit { target_id: u32, combo: u32, points: u64 },
    Miss,
    /// Combo reached a bonus multiple
    ComboMilestone { combo: u32 },
    /// Combo lapsed because no hit arrived in time
    ComboExpired { combo: u32 },
    LevelUp { level: u32 },
    GameOver { score: u64, new_high_score: bool },
    Paused,
    Resumed,
    Reset,
}

/// Input commands from the host's input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A click landed on the target with this id
    Hit(u32),
    /// A click hit nothing
    Miss,
    Pause,
    Resume,
    TogglePause,
    Reset,
}

/// Complete observable game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    /// Consecutive hits without a miss or timeout
    pub combo: u32,
    pub level: u32,
    /// Size shared by every live target
    pub target_size: f32,
    /// Live targets, in slot order
    pub targets: Vec<Target>,
    /// Seconds left on the clock
    pub time_left: u32,
    pub phase: GamePhase,
    /// Best score this session (survives reset)
    pub high_score: u64,
    /// Whether the last finished round set `high_score`
    pub is_new_high_score: bool,
    pub total_clicks: u64,
    pub successful_hits: u64,
}

impl GameState {
    /// A fresh round with no targets yet
    pub(crate) fn new(seed: u64, time_left: u32, high_score: u64) -> Self {
        Self {
            seed,
            score: 0,
            combo: 0,
            level: 1,
            target_size: target_size_for_level(1),
            targets: Vec::new(),
            time_left,
            phase: GamePhase::Playing,
            high_score,
            is_new_high_score: false,
            total_clicks: 0,
            successful_hits: 0,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Hit percentage for the current round
    pub fn accuracy(&self) -> u32 {
        accuracy(self.successful_hits, self.total_clicks)
    }

    pub fn target(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, 60, 12);
        assert_eq!(state.level, 1);
        assert_eq!(state.target_size, 0.5);
        assert_eq!(state.high_score, 12);
        assert!(state.is_playing());
        assert!(!state.is_ended());
        assert_eq!(state.accuracy(), 100);
    }

    #[test]
    fn test_json_snapshot_has_render_fields() {
        let state = GameState::new(7, 60, 0);
        let json = state.to_json().unwrap();
        for field in ["\"score\"", "\"combo\"", "\"level\"", "\"time_left\"", "\"targets\""] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
        assert!(json.contains("\"Playing\""));
    }
}
