//! The game state machine
//!
//! `Engine` owns the one `GameState`, the seeded RNG and the three scheduled
//! tasks. Hosts either call `tick()`/`second_tick()` from their own clocks or
//! feed elapsed time to `advance()` and let the scheduler dispatch.
//!
//! Phases: `Playing <-> Paused`, `Playing -> Ended` when the clock runs out,
//! and `reset()` from anywhere back to `Playing`.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::progression::{
    combo_bonus, level_for_score, speed_multiplier_for_level, target_count_for_level,
    target_size_for_level,
};
use super::state::{Command, GameEvent, GamePhase, GameState};
use super::target::{advance, create_target};
use super::timers::{Scheduler, TimerKind};
use crate::tuning::{Tuning, TuningError};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Simulation engine for one play session
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
    /// Next id for a target that doesn't take over an existing slot
    next_target_id: u32,
    /// Combo window left over when the game was paused
    suspended_combo: Option<Duration>,
    disposed: bool,
}

impl Engine {
    /// Create an engine with default tuning and start the first round
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an engine with custom tuning.
    ///
    /// `tuning` is used as given; values that fail [`Tuning::validate`] give
    /// degenerate rounds (motionless targets, empty clocks). Use [`Engine::try_with_tuning`] for
    /// tuning that hasn't been checked.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut engine = Self {
            state: GameState::new(seed, tuning.game_duration_secs, 0),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            next_target_id: 0,
            suspended_combo: None,
            disposed: false,
        };
        engine.start_round();
        engine
    }

    /// Validate `tuning`, then create the engine
    pub fn try_with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_tuning(seed, tuning))
    }

    /// Start with a different amount of time on the clock (capped at the
    /// round length). Zero ends the round immediately.
    pub fn with_time_left(mut self, secs: u32) -> Self {
        self.state.time_left = secs.min(self.tuning.game_duration_secs);
        if self.state.time_left == 0 && self.state.is_playing() {
            self.end_round();
        }
        self
    }

    /// Start with points already on the board
    pub fn with_score(mut self, score: u64) -> Self {
        self.state.score = score;
        self.sync_level();
        self
    }

    /// Current state, for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Simulated time since the engine was created
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.scheduler.is_armed(kind)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one input command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Hit(id) => {
                self.on_hit(id);
            }
            Command::Miss => self.on_miss(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
        }
    }

    /// Move the simulated clock forward by `dt`, firing every task that
    /// falls due in order.
    pub fn advance(&mut self, dt: Duration) {
        if self.disposed {
            return;
        }
        let until = self.scheduler.now() + dt;
        // Re-query after each dispatch: a task may cancel the others
        while let Some(kind) = self.scheduler.pop_due(until) {
            match kind {
                TimerKind::Frame => self.tick(),
                TimerKind::Countdown => self.second_tick(),
                TimerKind::ComboExpiry => self.expire_combo(),
            }
        }
        self.scheduler.advance_to(until);
    }

    /// Advance every live target one frame
    pub fn tick(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let multiplier = speed_multiplier_for_level(self.state.level);
        for target in &mut self.state.targets {
            *target = advance(target, multiplier, &mut self.rng, &self.tuning);
        }
    }

    /// Take one second off the clock, ending the round at zero
    pub fn second_tick(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.state.time_left = self.state.time_left.saturating_sub(1);
        if self.state.time_left == 0 {
            self.end_round();
        }
    }

    /// Register a click on target `target_id`.
    ///
    /// Returns false and changes nothing when not playing or when the id
    /// doesn't belong to a live target (e.g. a click that raced a respawn).
    pub fn on_hit(&mut self, target_id: u32) -> bool {
        if !self.accepts_input() {
            log::debug!("Ignoring hit on {} while {:?}", target_id, self.state.phase);
            return false;
        }
        let Some(slot) = self.state.targets.iter().position(|t| t.id == target_id) else {
            log::debug!("Ignoring hit on unknown target {}", target_id);
            return false;
        };

        let previous_level = self.state.level;
        let state = &mut self.state;
        state.combo += 1;
        let bonus = combo_bonus(state.combo);
        let points = 1 + bonus;
        state.score += points;
        self.events.push(GameEvent::Hit {
            target_id,
            combo: state.combo,
            points,
        });
        if bonus > 0 {
            self.events.push(GameEvent::ComboMilestone { combo: state.combo });
        }
        log::debug!(
            "Hit target {} (combo {}, +{}) score {}",
            target_id,
            state.combo,
            points,
            state.score
        );

        state.level = level_for_score(state.score);
        state.target_size = target_size_for_level(state.level);
        // Respawn the hit target in its slot, everyone else just resizes
        state.targets[slot] = create_target(target_id, state.target_size, &mut self.rng, &self.tuning);
        for target in &mut state.targets {
            target.size = state.target_size;
        }
        self.reconcile_targets();

        self.state.successful_hits += 1;
        self.state.total_clicks += 1;

        if self.state.level > previous_level {
            log::info!("Level up: {} -> {}", previous_level, self.state.level);
            self.events.push(GameEvent::LevelUp {
                level: self.state.level,
            });
        }

        self.scheduler
            .start_once(TimerKind::ComboExpiry, self.tuning.combo_timeout());
        true
    }

    /// Register a click that hit nothing: breaks the combo
    pub fn on_miss(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.state.total_clicks += 1;
        self.state.combo = 0;
        self.scheduler.cancel(TimerKind::ComboExpiry);
        self.events.push(GameEvent::Miss);
        log::debug!("Miss ({} clicks)", self.state.total_clicks);
    }

    /// Freeze the round. No-op unless playing.
    pub fn pause(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.state.phase = GamePhase::Paused;
        self.scheduler.cancel(TimerKind::Frame);
        self.scheduler.cancel(TimerKind::Countdown);
        self.suspended_combo = self.scheduler.suspend(TimerKind::ComboExpiry);
        self.events.push(GameEvent::Paused);
        log::debug!("Paused with {}s left", self.state.time_left);
    }

    /// Unfreeze a paused round. No-op unless paused.
    pub fn resume(&mut self) {
        if self.disposed || self.state.phase != GamePhase::Paused {
            return;
        }
        self.state.phase = GamePhase::Playing;
        self.arm_clocks();
        if let Some(remaining) = self.suspended_combo.take() {
            self.scheduler.start_once(TimerKind::ComboExpiry, remaining);
        }
        self.events.push(GameEvent::Resumed);
        log::debug!("Resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Ended => {}
        }
    }

    /// Start a new round from any phase. Only the high score carries over.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        if !self.state.is_ended() {
            // An abandoned round still counts toward the session best
            self.record_round();
        }
        let high_score = self.state.high_score;
        self.state = GameState::new(self.state.seed, self.tuning.game_duration_secs, high_score);
        self.start_round();
        self.events.push(GameEvent::Reset);
        log::info!("New round (high score {})", high_score);
    }

    /// Stop all scheduled work. Every later call is a no-op.
    pub fn dispose(&mut self) {
        self.scheduler.cancel_all();
        self.suspended_combo = None;
        self.disposed = true;
    }

    fn accepts_input(&self) -> bool {
        !self.disposed && self.state.is_playing()
    }

    fn start_round(&mut self) {
        self.scheduler.cancel_all();
        self.suspended_combo = None;
        self.state.targets.clear();
        self.reconcile_targets();
        self.arm_clocks();
    }

    fn arm_clocks(&mut self) {
        self.scheduler
            .start_interval(TimerKind::Frame, self.tuning.frame_period());
        self.scheduler
            .start_interval(TimerKind::Countdown, COUNTDOWN_PERIOD);
    }

    fn expire_combo(&mut self) {
        if self.state.combo > 0 {
            log::debug!("Combo of {} expired", self.state.combo);
            self.events.push(GameEvent::ComboExpired {
                combo: self.state.combo,
            });
            self.state.combo = 0;
        }
    }

    fn end_round(&mut self) {
        self.state.phase = GamePhase::Ended;
        self.scheduler.cancel_all();
        self.suspended_combo = None;
        let new_high_score = self.record_round();
        self.state.is_new_high_score = new_high_score;
        log::info!(
            "Time up: score {} level {} accuracy {}%{}",
            self.state.score,
            self.state.level,
            self.state.accuracy(),
            if new_high_score { " (new high score!)" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            score: self.state.score,
            new_high_score,
        });
    }

    /// Fold the current score into the session best.
    /// Returns true if it beat the previous best.
    fn record_round(&mut self) -> bool {
        let previous = self.state.high_score;
        self.state.high_score = previous.max(self.state.score);
        self.state.score > previous
    }

    /// Recompute level-derived values after the score changed outside a hit
    fn sync_level(&mut self) {
        self.state.level = level_for_score(self.state.score);
        self.state.target_size = target_size_for_level(self.state.level);
        for target in &mut self.state.targets {
            target.size = self.state.target_size;
        }
        self.reconcile_targets();
    }

    /// Grow or shrink the target list to match the level
    fn reconcile_targets(&mut self) {
        let wanted = target_count_for_level(self.state.level) as usize;
        while self.state.targets.len() < wanted {
            let id = self.next_target_id;
            self.next_target_id += 1;
            let target = create_target(id, self.state.target_size, &mut self.rng, &self.tuning);
            self.state.targets.push(target);
        }
        self.state.targets.truncate(wanted);
    }
}
