//! Pulse animation

use std::f32::consts::TAU;
use std::time::Duration;

pub const PULSE_MIN_ALPHA: f32 = 0.3;
pub const PULSE_MAX_ALPHA: f32 = 1.0;

/// Alpha oscillation between [`PULSE_MIN_ALPHA`] and [`PULSE_MAX_ALPHA`].
///
/// Cosine eased, starting at full alpha. Start and stop are idempotent: a
/// running pulse is never restarted.
#[derive(Debug, Clone, Default)]
pub struct PulseAnimation {
    playing: bool,
    elapsed: f32,
    period: f32,
}

impl PulseAnimation {
    /// Start the pulse. Returns `false` if it was already playing.
    pub fn start(&mut self, period_secs: f32) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        self.elapsed = 0.0;
        self.period = period_secs;
        true
    }

    /// Stop the pulse. Returns `false` if it was not playing.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.playing;
        self.playing = false;
        self.elapsed = 0.0;
        was_playing
    }

    /// Change the period without restarting. Elapsed time is wrapped into
    /// the new period.
    pub fn set_period(&mut self, period_secs: f32) {
        if self.period == period_secs {
            return;
        }
        self.period = period_secs;
        if period_secs > 0.0 {
            self.elapsed %= period_secs;
        } else {
            self.elapsed = 0.0;
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance by `dt` and return the current alpha, or `None` when stopped.
    pub fn advance(&mut self, dt: Duration) -> Option<f32> {
        if !self.playing {
            return None;
        }
        if self.period > 0.0 {
            self.elapsed = (self.elapsed + dt.as_secs_f32()) % self.period;
        }
        Some(pulse_alpha(self.elapsed, self.period))
    }
}

/// Alpha at `t` seconds into a pulse of `period` seconds.
pub fn pulse_alpha(t: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return PULSE_MAX_ALPHA;
    }
    let wave = (1.0 + (TAU * t / period).cos()) / 2.0;
    PULSE_MIN_ALPHA + (PULSE_MAX_ALPHA - PULSE_MIN_ALPHA) * wave
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_alpha_range() {
        assert!((pulse_alpha(0.0, 1.0) - 1.0).abs() < 1e-5);
        assert!((pulse_alpha(0.5, 1.0) - 0.3).abs() < 1e-5);
        for i in 0..20 {
            let a = pulse_alpha(i as f32 * 0.05, 1.0);
            assert!((PULSE_MIN_ALPHA - 1e-5..=PULSE_MAX_ALPHA + 1e-5).contains(&a));
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut pulse = PulseAnimation::default();
        assert!(pulse.start(1.0));
        pulse.advance(Duration::from_millis(250));
        assert!(!pulse.start(1.0));
        // Not restarted: still a quarter period in.
        let a = pulse.advance(Duration::ZERO).unwrap();
        assert!((a - pulse_alpha(0.25, 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_set_period_keeps_phase_without_restart() {
        let mut pulse = PulseAnimation::default();
        pulse.start(4.0);
        pulse.advance(Duration::from_millis(2500));
        pulse.set_period(1.0);
        assert!(pulse.is_playing());
        assert_eq!(pulse.period(), 1.0);
        // 2.5 s wraps to half a period.
        let a = pulse.advance(Duration::ZERO).unwrap();
        assert!((a - PULSE_MIN_ALPHA).abs() < 1e-5);
    }

    #[test]
    fn test_stopped_pulse_yields_nothing() {
        let mut pulse = PulseAnimation::default();
        assert!(!pulse.stop());
        assert_eq!(pulse.advance(Duration::from_millis(100)), None);
    }
}
