//! Edge-triggered celebration when the checklist becomes fully complete.
//!
//! The trigger owns no rendering. It tells a [`CelebrationPlayer`] when to
//! start and stop, and tracks the deadline of the one active run.

use std::time::{Duration, Instant};

use crate::model::config::CelebrationConfig;

/// Something that can put a celebration on screen.
pub trait CelebrationPlayer {
    /// Start a run, replacing any run already showing.
    fn play(&mut self, duration: Duration, particle_count: usize);
    /// Remove everything the current run allocated. Safe to call when idle.
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationState {
    Idle,
    Celebrating {
        /// Sequence number of the active run
        run: u64,
        deadline: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct CelebrationTrigger {
    state: CelebrationState,
    was_complete: bool,
    runs: u64,
    duration: Duration,
    particle_count: usize,
}

impl CelebrationTrigger {
    pub fn new(duration: Duration, particle_count: usize) -> Self {
        CelebrationTrigger {
            state: CelebrationState::Idle,
            was_complete: false,
            runs: 0,
            duration,
            particle_count,
        }
    }

    pub fn from_config(config: &CelebrationConfig) -> Self {
        Self::new(Duration::from_millis(config.duration_ms), config.particles)
    }

    pub fn state(&self) -> CelebrationState {
        self.state
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self.state, CelebrationState::Celebrating { .. })
    }

    /// Total runs started so far
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Feed the completion state after a recomputation. Returns true when a
    /// run started, i.e. the state moved from incomplete to complete.
    pub fn observe(
        &mut self,
        is_complete: bool,
        now: Instant,
        player: &mut dyn CelebrationPlayer,
    ) -> bool {
        let rising = is_complete && !self.was_complete;
        self.was_complete = is_complete;
        if !rising {
            return false;
        }

        // At most one run: a new trigger supersedes whatever is showing
        if self.is_celebrating() {
            player.clear();
        }
        self.runs += 1;
        self.state = CelebrationState::Celebrating {
            run: self.runs,
            deadline: now + self.duration,
        };
        player.play(self.duration, self.particle_count);
        tracing::info!(run = self.runs, particles = self.particle_count, "celebration started");
        true
    }

    /// Expire the active run once its deadline has passed.
    pub fn tick(&mut self, now: Instant, player: &mut dyn CelebrationPlayer) {
        if let CelebrationState::Celebrating { run, deadline } = self.state
            && now >= deadline
        {
            player.clear();
            self.state = CelebrationState::Idle;
            tracing::debug!(run, "celebration finished");
        }
    }

    /// Stop any active run immediately (view teardown). Idempotent.
    pub fn cancel(&mut self, player: &mut dyn CelebrationPlayer) {
        if let CelebrationState::Celebrating { run, .. } = self.state {
            tracing::debug!(run, "celebration cancelled");
        }
        player.clear();
        self.state = CelebrationState::Idle;
    }

    /// Time left on the active run
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            CelebrationState::Idle => None,
            CelebrationState::Celebrating { deadline, .. } => {
                Some(deadline.saturating_duration_since(now))
            }
        }
    }
}

impl Default for CelebrationTrigger {
    fn default() -> Self {
        Self::from_config(&CelebrationConfig::default())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Player that records calls and tracks how many runs are on screen.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPlayer {
        pub plays: Vec<(Duration, usize)>,
        pub clears: usize,
        pub active: usize,
    }

    impl CelebrationPlayer for RecordingPlayer {
        fn play(&mut self, duration: Duration, particle_count: usize) {
            self.plays.push((duration, particle_count));
            self.active += 1;
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.active = 0;
        }
    }

    fn trigger() -> CelebrationTrigger {
        CelebrationTrigger::new(Duration::from_millis(5000), 100)
    }

    #[test]
    fn fires_on_rising_edge_only() {
        let mut t = trigger();
        let mut player = RecordingPlayer::default();
        let now = Instant::now();

        assert!(!t.observe(false, now, &mut player));
        assert!(t.observe(true, now, &mut player));
        // Re-render without a state change
        assert!(!t.observe(true, now, &mut player));
        assert!(!t.observe(true, now, &mut player));
        assert_eq!(player.plays, vec![(Duration::from_millis(5000), 100)]);
        assert_eq!(t.runs(), 1);
    }

    #[test]
    fn refires_after_dropping_out_of_complete() {
        let mut t = trigger();
        let mut player = RecordingPlayer::default();
        let now = Instant::now();

        assert!(t.observe(true, now, &mut player));
        assert!(!t.observe(false, now, &mut player));
        assert!(t.observe(true, now, &mut player));
        assert_eq!(t.runs(), 2);
        // The second run replaced the first
        assert_eq!(player.active, 1);
    }

    #[test]
    fn first_observation_of_complete_fires() {
        let mut t = trigger();
        let mut player = RecordingPlayer::default();
        assert!(t.observe(true, Instant::now(), &mut player));
        assert_eq!(player.plays.len(), 1);
    }

    #[test]
    fn expires_at_deadline() {
        let mut t = trigger();
        let mut player = RecordingPlayer::default();
        let start = Instant::now();

        t.observe(true, start, &mut player);
        t.tick(start + Duration::from_millis(4999), &mut player);
        assert!(t.is_celebrating());
        assert_eq!(
            t.remaining(start + Duration::from_millis(4000)),
            Some(Duration::from_millis(1000))
        );

        t.tick(start + Duration::from_millis(5000), &mut player);
        assert_eq!(t.state(), CelebrationState::Idle);
        assert_eq!(player.active, 0);
        assert_eq!(t.remaining(start), None);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut t = trigger();
        let mut player = RecordingPlayer::default();
        let now = Instant::now();

        t.observe(true, now, &mut player);
        t.cancel(&mut player);
        assert!(!t.is_celebrating());
        t.cancel(&mut player);
        assert!(!t.is_celebrating());
        assert_eq!(player.active, 0);

        // Cancelling after natural expiry is also fine
        let mut t = trigger();
        t.observe(true, now, &mut player);
        t.tick(now + Duration::from_secs(10), &mut player);
        t.cancel(&mut player);
        assert_eq!(t.state(), CelebrationState::Idle);
    }

    #[test]
    fn supersede_replaces_deadline() {
        let mut t = trigger();
        let mut player = RecordingPlayer::default();
        let start = Instant::now();

        t.observe(true, start, &mut player);
        t.observe(false, start + Duration::from_secs(1), &mut player);
        t.observe(true, start + Duration::from_secs(2), &mut player);
        match t.state() {
            CelebrationState::Celebrating { run, deadline } => {
                assert_eq!(run, 2);
                assert_eq!(deadline, start + Duration::from_secs(7));
            }
            CelebrationState::Idle => panic!("expected an active run"),
        }
        assert_eq!(player.active, 1);
    }
}
