//! Fixed-period tick scheduling.
//!
//! The four gameplay timers run off one virtual clock. Feeding it wall-clock
//! deltas yields the ticks that came due, in due-time order, so a replay with
//! the same deltas always interleaves the same way.

use std::time::Duration;

use crate::config::TimingConfig;

/// Longest span a single `advance` will simulate. Anything beyond it is
/// dropped so a suspended terminal does not replay a huge backlog.
pub const MAX_ADVANCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// One second of elapsed play time.
    Time,
    ComboDecay,
    Aliens,
    /// Player motion followed by missile motion.
    Player,
}

impl TickKind {
    /// Tie-break order for ticks due at the same instant.
    const ORDER: [TickKind; 4] = [TickKind::Time, TickKind::ComboDecay, TickKind::Aliens, TickKind::Player];
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TickKind,
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Clone)]
pub struct Clock {
    now: Duration,
    timers: [Timer; 4],
    halted: bool,
}

impl Clock {
    pub fn new(timing: &TimingConfig) -> Self {
        let timers = TickKind::ORDER.map(|kind| {
            let period = match kind {
                TickKind::Time => timing.time(),
                TickKind::ComboDecay => timing.combo(),
                TickKind::Aliens => timing.alien(),
                TickKind::Player => timing.player(),
            };
            Timer { kind, period, next_due: period }
        });
        Self { now: Duration::ZERO, timers, halted: false }
    }

    /// Virtual time simulated so far.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Stop producing ticks for good. Used once the game reaches an end state.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Move the clock forward and return every tick that fell due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickKind> {
        if self.halted {
            return Vec::new();
        }
        self.now += elapsed.min(MAX_ADVANCE);
        let now = self.now;

        let mut due = Vec::new();
        loop {
            // Earliest due timer; array order breaks ties.
            let Some(timer) = self
                .timers
                .iter_mut()
                .filter(|t| t.next_due <= now)
                .min_by_key(|t| t.next_due)
            else {
                break;
            };
            due.push(timer.kind);
            timer.next_due += timer.period;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(time_ms: u64, combo_ms: u64, alien_ms: u64, player_ms: u64) -> TimingConfig {
        TimingConfig { time_ms, combo_ms, alien_ms, player_ms }
    }

    fn count(ticks: &[TickKind], kind: TickKind) -> usize {
        ticks.iter().filter(|&&k| k == kind).count()
    }

    #[test]
    fn nothing_fires_before_first_period() {
        let mut clock = Clock::new(&TimingConfig::default());
        assert!(clock.advance(Duration::from_millis(19)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(1)), vec![TickKind::Player]);
    }

    #[test]
    fn default_rates_over_three_seconds() {
        let mut clock = Clock::new(&TimingConfig::default());
        let mut ticks = Vec::new();
        for _ in 0..(3000 / 16) {
            ticks.extend(clock.advance(Duration::from_millis(16)));
        }
        ticks.extend(clock.advance(Duration::from_millis(3000 - (3000 / 16) * 16)));
        assert_eq!(clock.now(), Duration::from_secs(3));
        assert_eq!(count(&ticks, TickKind::Time), 3);
        assert_eq!(count(&ticks, TickKind::ComboDecay), 2);
        assert_eq!(count(&ticks, TickKind::Aliens), 12);
        assert_eq!(count(&ticks, TickKind::Player), 150);
    }

    #[test]
    fn simultaneous_ticks_use_fixed_order() {
        let mut clock = Clock::new(&timing(10, 10, 10, 10));
        assert_eq!(
            clock.advance(Duration::from_millis(10)),
            vec![TickKind::Time, TickKind::ComboDecay, TickKind::Aliens, TickKind::Player]
        );
    }

    #[test]
    fn ticks_come_out_in_due_order() {
        let mut clock = Clock::new(&timing(30, 1000, 20, 15));
        assert_eq!(
            clock.advance(Duration::from_millis(45)),
            vec![
                TickKind::Player,  // 15
                TickKind::Aliens,  // 20
                TickKind::Time,    // 30
                TickKind::Player,  // 30
                TickKind::Aliens,  // 40
                TickKind::Player,  // 45
            ]
        );
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = Clock::new(&TimingConfig::default());
        let ticks = clock.advance(Duration::from_secs(60));
        assert_eq!(clock.now(), MAX_ADVANCE);
        assert_eq!(count(&ticks, TickKind::Player), 25);
    }

    #[test]
    fn halted_clock_is_silent() {
        let mut clock = Clock::new(&TimingConfig::default());
        clock.halt();
        assert!(clock.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(clock.now(), Duration::ZERO);
    }
}
