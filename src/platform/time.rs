//! Clocks and the fixed-step frame driver
//!
//! The host calls `FrameDriver::frame` once per display refresh. The driver
//! reads its clock, feeds the elapsed time into a fixed-step accumulator and
//! advances the session by whole simulation steps.

use std::cell::Cell;
use std::time::Duration;

use crate::audio::AudioSink;
use crate::consts::{MAX_FRAME_GAP, MAX_SUBSTEPS, SIM_DT};
use crate::session::Session;
use crate::sim::TickInput;

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock of the running platform
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    origin_ms: f64,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            origin_ms: js_sys::Date::now(),
        }
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Duration {
        let ms = (js_sys::Date::now() - self.origin_ms).max(0.0);
        Duration::from_secs_f64(ms / 1000.0)
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
    max_gap: Duration,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_substeps: MAX_SUBSTEPS,
            max_gap: MAX_FRAME_GAP,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add a frame's elapsed time; returns how many steps to run now
    pub fn push(&mut self, frame_dt: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }
        // Long stalls (tab in background) are not caught up
        self.accumulator += frame_dt.min(self.max_gap);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Explicit frame loop over an injectable clock
#[derive(Debug)]
pub struct FrameDriver<C: Clock> {
    clock: C,
    last: Option<Duration>,
    fixed: FixedStep,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: None,
            fixed: FixedStep::default(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time since the clock's origin, for presentation effects
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Read the clock and return the number of steps due this frame
    pub fn poll(&mut self) -> u32 {
        let now = self.clock.now();
        let frame_dt = match self.last {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.fixed.push(frame_dt)
    }

    /// Run one frame of the session. Returns the number of steps taken.
    pub fn frame(
        &mut self,
        session: &mut Session,
        input: &TickInput,
        audio: &mut impl AudioSink,
    ) -> u32 {
        let steps = self.poll();
        if !session.phase().runs_simulation() {
            // Time spent off the playfield is not banked for the next run
            self.fixed.reset();
            return 0;
        }
        let dt = self.fixed.step();
        for _ in 0..steps {
            session.step(input, dt, audio);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::settings::Settings;
    use crate::sim::{GamePhase, UiAction};
    use crate::stats::SessionStats;

    #[test]
    fn test_fixed_step_whole_steps_only() {
        let mut fixed = FixedStep::default();
        assert_eq!(fixed.push(Duration::from_millis(10)), 0);
        assert_eq!(fixed.push(Duration::from_millis(10)), 1);
        assert_eq!(fixed.push(Duration::from_micros(33_334)), 2);
    }

    #[test]
    fn test_fixed_step_caps_long_gaps() {
        let mut fixed = FixedStep::default();
        // 100 ms cap holds just under six steps
        assert_eq!(fixed.push(Duration::from_secs(5)), 5);
    }

    #[test]
    fn test_first_frame_runs_nothing() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(100));
        let mut driver = FrameDriver::new(&clock);
        assert_eq!(driver.poll(), 0);
        clock.advance(SIM_DT);
        assert_eq!(driver.poll(), 1);
    }

    #[test]
    fn test_driver_steps_match_simulated_time() {
        let clock = ManualClock::new();
        let mut driver = FrameDriver::new(&clock);
        let mut session = Session::new(SessionStats::new(), Settings::default());
        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        assert_eq!(session.phase(), GamePhase::Playing);

        let input = TickInput::default();
        let mut audio = NullAudio;
        driver.frame(&mut session, &input, &mut audio);

        let mut total = 0;
        for _ in 0..10 {
            clock.advance(Duration::from_millis(100));
            total += driver.frame(&mut session, &input, &mut audio);
        }
        // 1000 ms holds 59 whole steps of 16.667 ms
        assert_eq!(total, 59);
        assert_eq!(session.state().elapsed, SIM_DT * 59);
        // One enemy is due only after step 60
        assert!(session.state().enemies.is_empty());

        clock.advance(SIM_DT);
        driver.frame(&mut session, &input, &mut audio);
        assert_eq!(session.state().enemies.len(), 1);
    }

    #[test]
    fn test_menu_time_is_not_banked() {
        let clock = ManualClock::new();
        let mut driver = FrameDriver::new(&clock);
        let mut session = Session::new(SessionStats::new(), Settings::default());
        let input = TickInput::default();
        let mut audio = NullAudio;

        driver.frame(&mut session, &input, &mut audio);
        // Most of a step passes in the lobby
        clock.advance(Duration::from_millis(16));
        assert_eq!(driver.frame(&mut session, &input, &mut audio), 0);

        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        assert_eq!(session.phase(), GamePhase::Playing);

        // Without the lobby remainder, 16 ms is still short of a step
        clock.advance(Duration::from_millis(16));
        assert_eq!(driver.frame(&mut session, &input, &mut audio), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(driver.frame(&mut session, &input, &mut audio), 1);
    }
}
