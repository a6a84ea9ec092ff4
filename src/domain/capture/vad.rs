//! Energy-based voice-activity detection
//!
//! The monitor is a pure state machine: it consumes (timestamp, level)
//! observations and answers whether the capture should keep running.
//! Device acquisition and level estimation live behind the recorder
//! port, so the transition rules here are testable with synthetic
//! sequences.

/// Default level a window must exceed to count as sound
pub const DEFAULT_SILENCE_THRESHOLD_DB: f32 = -60.0;

/// Default trailing-silence span that ends a capture
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 1200;

/// Default floor before silence evaluation begins
pub const DEFAULT_GRACE_PERIOD_MS: u64 = 500;

/// Default hard cap on capture length
pub const DEFAULT_MAX_DURATION_MS: u64 = 10_000;

/// Tuning for the voice-activity monitor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VadConfig {
    /// Level above which a window counts as sound (dBFS)
    pub silence_threshold_db: f32,
    /// Trailing silence longer than this ends the capture
    pub quiet_period_ms: u64,
    /// Silence is not evaluated before this much time has elapsed
    pub grace_period_ms: u64,
    /// The capture ends unconditionally after this long
    pub max_duration_ms: u64,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            silence_threshold_db: DEFAULT_SILENCE_THRESHOLD_DB,
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            grace_period_ms: DEFAULT_GRACE_PERIOD_MS,
            max_duration_ms: DEFAULT_MAX_DURATION_MS,
        }
    }
}

/// Why the monitor ended a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The hard duration cap was hit
    MaxDuration,
    /// Sustained silence followed detected speech
    TrailingSilence,
}

/// Outcome of one monitoring observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Stop(StopReason),
}

/// Voice-activity monitor for one capture session.
///
/// Timestamps are caller-supplied milliseconds on any monotonic scale;
/// the session start passed to `new` anchors all elapsed computations.
/// Ambient silence before the first detected speech never ends the
/// session; only the hard cap does.
#[derive(Debug)]
pub struct VoiceActivityMonitor {
    config: VadConfig,
    started_ms: u64,
    last_sound_ms: u64,
    speech_detected: bool,
}

impl VoiceActivityMonitor {
    /// Create a monitor anchored at the capture start time
    pub fn new(config: VadConfig, now_ms: u64) -> Self {
        Self {
            config,
            started_ms: now_ms,
            last_sound_ms: now_ms,
            speech_detected: false,
        }
    }

    /// Whether any window has exceeded the sound threshold yet
    pub fn speech_detected(&self) -> bool {
        self.speech_detected
    }

    /// Feed one observation. Rules are evaluated in order: the hard cap
    /// fires regardless of state; sound refreshes the silence clock and
    /// latches speech; trailing silence only counts once speech has been
    /// observed and the grace floor has passed.
    pub fn observe(&mut self, now_ms: u64, energy_db: f32) -> Verdict {
        let elapsed = now_ms.saturating_sub(self.started_ms);

        if elapsed > self.config.max_duration_ms {
            return Verdict::Stop(StopReason::MaxDuration);
        }

        if energy_db > self.config.silence_threshold_db {
            self.last_sound_ms = now_ms;
            self.speech_detected = true;
            return Verdict::Continue;
        }

        if self.speech_detected && elapsed >= self.config.grace_period_ms {
            let silence = now_ms.saturating_sub(self.last_sound_ms);
            if silence > self.config.quiet_period_ms {
                return Verdict::Stop(StopReason::TrailingSilence);
            }
        }

        Verdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOUD: f32 = -30.0;
    const QUIET: f32 = -80.0;

    fn monitor() -> VoiceActivityMonitor {
        VoiceActivityMonitor::new(VadConfig::default(), 0)
    }

    #[test]
    fn leading_silence_never_stops() {
        let mut m = monitor();
        for t in (0..10_000).step_by(50) {
            assert_eq!(m.observe(t, QUIET), Verdict::Continue, "stopped at {}ms", t);
        }
        assert!(!m.speech_detected());
    }

    #[test]
    fn hard_cap_fires_without_speech() {
        let mut m = monitor();
        for t in (0..=10_000).step_by(50) {
            assert_eq!(m.observe(t, QUIET), Verdict::Continue);
        }
        assert_eq!(m.observe(10_050, QUIET), Verdict::Stop(StopReason::MaxDuration));
    }

    #[test]
    fn hard_cap_fires_during_continuous_speech() {
        let mut m = monitor();
        for t in (0..=10_000).step_by(50) {
            assert_eq!(m.observe(t, LOUD), Verdict::Continue);
        }
        assert_eq!(m.observe(10_050, LOUD), Verdict::Stop(StopReason::MaxDuration));
    }

    #[test]
    fn speech_then_trailing_silence_stops() {
        let mut m = monitor();
        // 600ms of speech, last loud tick at t=600
        for t in (0..=600).step_by(50) {
            assert_eq!(m.observe(t, LOUD), Verdict::Continue);
        }
        assert!(m.speech_detected());
        // Silence exactly at the quiet bound keeps going (strictly greater cuts)
        assert_eq!(m.observe(600 + 1200, QUIET), Verdict::Continue);
        // Past the bound stops
        assert_eq!(
            m.observe(600 + 1250, QUIET),
            Verdict::Stop(StopReason::TrailingSilence)
        );
    }

    #[test]
    fn silence_speech_silence_pattern() {
        let mut m = monitor();
        // Leading ambient silence, longer than the quiet period
        for t in (0..2000).step_by(50) {
            assert_eq!(m.observe(t, QUIET), Verdict::Continue);
        }
        // Speaker starts
        for t in (2000..3000).step_by(50) {
            assert_eq!(m.observe(t, LOUD), Verdict::Continue);
        }
        // Trailing silence: no stop until it exceeds 1200ms past the last sound
        let last_loud = 2950;
        for t in (3000..=last_loud + 1200).step_by(50) {
            assert_eq!(m.observe(t, QUIET), Verdict::Continue, "stopped at {}ms", t);
        }
        assert_eq!(
            m.observe(last_loud + 1250, QUIET),
            Verdict::Stop(StopReason::TrailingSilence)
        );
    }

    #[test]
    fn grace_floor_defers_silence_evaluation() {
        let config = VadConfig {
            quiet_period_ms: 100,
            ..VadConfig::default()
        };
        let mut m = VoiceActivityMonitor::new(config, 0);
        // A short blip at the very start, then silence
        assert_eq!(m.observe(0, LOUD), Verdict::Continue);
        // Well past 100ms of silence but still inside the 500ms grace floor
        assert_eq!(m.observe(300, QUIET), Verdict::Continue);
        assert_eq!(m.observe(499, QUIET), Verdict::Continue);
        // At the floor the accumulated silence is already over the bound
        assert_eq!(m.observe(500, QUIET), Verdict::Stop(StopReason::TrailingSilence));
    }

    #[test]
    fn sound_refreshes_silence_clock() {
        let mut m = monitor();
        m.observe(0, LOUD);
        m.observe(1000, QUIET);
        // New sound resets the clock before the quiet period elapses
        m.observe(2000, LOUD);
        assert_eq!(m.observe(3100, QUIET), Verdict::Continue);
        assert_eq!(
            m.observe(3250, QUIET),
            Verdict::Stop(StopReason::TrailingSilence)
        );
    }

    #[test]
    fn threshold_is_strict() {
        let mut m = monitor();
        // Exactly at the threshold does not count as sound
        m.observe(0, DEFAULT_SILENCE_THRESHOLD_DB);
        assert!(!m.speech_detected());
        m.observe(50, DEFAULT_SILENCE_THRESHOLD_DB + 0.1);
        assert!(m.speech_detected());
    }

    #[test]
    fn cap_boundary_is_strict() {
        let mut m = monitor();
        assert_eq!(m.observe(10_000, QUIET), Verdict::Continue);
        assert_eq!(m.observe(10_001, QUIET), Verdict::Stop(StopReason::MaxDuration));
    }

    #[test]
    fn cap_takes_precedence_over_sound() {
        let mut m = monitor();
        m.observe(0, LOUD);
        assert_eq!(m.observe(10_001, LOUD), Verdict::Stop(StopReason::MaxDuration));
    }

    #[test]
    fn custom_config_bounds() {
        let config = VadConfig {
            silence_threshold_db: -40.0,
            quiet_period_ms: 300,
            grace_period_ms: 0,
            max_duration_ms: 2_000,
        };
        let mut m = VoiceActivityMonitor::new(config, 0);
        m.observe(0, -35.0);
        assert_eq!(m.observe(301, -70.0), Verdict::Stop(StopReason::TrailingSilence));
    }
}
