/// Repeating interval timer driven by frame deltas.
/// Fires once per elapsed interval; the remainder carries over to the next frame.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Seconds between fires.
    interval: f32,
    /// Time accumulated since the last fire.
    accumulator: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns how many times the interval elapsed.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let fires = (self.accumulator / self.interval) as u32;
        self.accumulator -= fires as f32 * self.interval;
        fires
    }

    /// Drop any partial interval, e.g. when playback pauses.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Fraction of the current interval already elapsed (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        (self.accumulator / self.interval).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_exact_interval() {
        let mut timer = IntervalTimer::new(1.5);
        assert_eq!(timer.accumulate(1.5), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut timer = IntervalTimer::new(1.5);
        assert_eq!(timer.accumulate(0.5), 0);
        assert_eq!(timer.accumulate(0.5), 0);
        assert_eq!(timer.accumulate(0.75), 1);
        assert!((timer.progress() - 0.25 / 1.5).abs() < 1e-5);
    }

    #[test]
    fn long_frame_fires_multiple_times() {
        let mut timer = IntervalTimer::new(0.5);
        assert_eq!(timer.accumulate(1.75), 3);
    }

    #[test]
    fn reset_discards_progress() {
        let mut timer = IntervalTimer::new(1.0);
        timer.accumulate(0.75);
        timer.reset();
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(timer.accumulate(0.5), 0);
    }

    #[test]
    fn ignores_non_positive_dt() {
        let mut timer = IntervalTimer::new(1.0);
        assert_eq!(timer.accumulate(-1.0), 0);
        assert_eq!(timer.accumulate(0.0), 0);
        assert_eq!(timer.progress(), 0.0);
    }
}
