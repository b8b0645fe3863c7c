//! Time-driven animation primitives.
//!
//! Both primitives are polled: the owner calls `advance(now_ms)` once per
//! frame with a monotonic clock reading. Nothing moves between calls.

use cappy_view_model::geometry::Point2D;

/// A linear ramp: `amount` spread evenly over `duration_ms`.
///
/// Each `advance` yields `rate_per_ms * dt`, where `dt` is the time since
/// the previous call clipped to what is left of the duration, so the steps
/// of a completed ramp always sum to `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ramp {
    active: bool,
    rate_per_ms: f64,
    elapsed_ms: u64,
    duration_ms: u64,
    last_tick_ms: u64,
}

impl Ramp {
    pub fn start(&mut self, amount: f64, duration_ms: u64, now_ms: u64) {
        let duration_ms = duration_ms.max(1);
        *self = Self {
            active: true,
            rate_per_ms: amount / duration_ms as f64,
            elapsed_ms: 0,
            duration_ms,
            last_tick_ms: now_ms,
        };
    }

    /// Step the ramp. Returns the increment for this frame, or `None` when
    /// the ramp is not running.
    pub fn advance(&mut self, now_ms: u64) -> Option<f64> {
        if !self.active {
            return None;
        }

        let dt = now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;

        let remaining = self.duration_ms - self.elapsed_ms;
        let step_ms = dt.min(remaining);
        self.elapsed_ms += step_ms;
        if self.elapsed_ms >= self.duration_ms {
            self.active = false;
        }

        Some(self.rate_per_ms * step_ms as f64)
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

/// An inertial fling: a velocity that decays by `damping` once per tick.
///
/// On every tick boundary crossed, the velocity is damped first and then
/// contributes one tick's worth of displacement. The fling stops itself
/// once the speed falls below `stop_epsilon`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fling {
    active: bool,
    velocity: Point2D,
    damping: f64,
    tick_interval_ms: u64,
    elapsed_ms: u64,
    last_tick_ms: u64,
    stop_epsilon: f64,
}

impl Fling {
    pub fn start(
        &mut self,
        velocity: Point2D,
        damping: f64,
        tick_interval_ms: u64,
        stop_epsilon: f64,
        now_ms: u64,
    ) {
        *self = Self {
            active: velocity.length() >= stop_epsilon,
            velocity,
            damping,
            tick_interval_ms: tick_interval_ms.max(1),
            elapsed_ms: 0,
            last_tick_ms: now_ms,
            stop_epsilon,
        };
    }

    /// Step the fling. Returns the total displacement for the ticks that
    /// elapsed since the previous call, or `None` when not running.
    pub fn advance(&mut self, now_ms: u64) -> Option<Point2D> {
        if !self.active {
            return None;
        }

        self.elapsed_ms += now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;

        let mut displacement = Point2D::ZERO;
        while self.active && self.elapsed_ms >= self.tick_interval_ms {
            self.elapsed_ms -= self.tick_interval_ms;
            self.velocity = self.velocity * self.damping;
            displacement += self.velocity;
            if self.velocity.length() < self.stop_epsilon {
                self.active = false;
            }
        }

        Some(displacement)
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn velocity(&self) -> Point2D {
        self.velocity
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_steps_sum_to_amount() {
        let mut ramp = Ramp::default();
        ramp.start(0.6, 150, 1_000);

        let mut total = 0.0;
        for now in [1_016, 1_033, 1_050, 1_100, 1_400] {
            total += ramp.advance(now).unwrap();
        }
        assert!((total - 0.6).abs() < 1e-12);
        assert!(!ramp.is_active());
        assert_eq!(ramp.advance(1_500), None);
    }

    #[test]
    fn ramp_first_step_measures_from_start() {
        let mut ramp = Ramp::default();
        ramp.start(1.0, 100, 500);
        let step = ramp.advance(525).unwrap();
        assert!((step - 0.25).abs() < 1e-12);
        assert!(ramp.is_active());
        assert_eq!(ramp.elapsed_ms(), 25);
    }

    #[test]
    fn ramp_cancel_stops_immediately() {
        let mut ramp = Ramp::default();
        ramp.start(1.0, 100, 0);
        ramp.cancel();
        assert_eq!(ramp.advance(50), None);
    }

    #[test]
    fn ramp_zero_duration_completes_on_next_frame() {
        let mut ramp = Ramp::default();
        ramp.start(0.5, 0, 0);
        assert_eq!(ramp.duration_ms(), 1);
        assert_eq!(ramp.advance(16), Some(0.5));
        assert!(!ramp.is_active());
    }

    #[test]
    fn fling_damps_before_applying() {
        let mut fling = Fling::default();
        fling.start(Point2D::new(10.0, 0.0), 0.5, 10, 0.01, 0);

        // Not a full tick yet.
        assert_eq!(fling.advance(5), Some(Point2D::ZERO));

        // Two ticks: 5 + 2.5.
        let moved = fling.advance(25).unwrap();
        assert!((moved.x - 7.5).abs() < 1e-12);
        assert_eq!(fling.elapsed_ms(), 5);
        assert!((fling.velocity().x - 2.5).abs() < 1e-12);
    }

    #[test]
    fn fling_stops_below_epsilon() {
        let mut fling = Fling::default();
        fling.start(Point2D::new(1.0, 1.0), 0.5, 10, 0.1, 0);
        fling.advance(10_000);
        assert!(!fling.is_active());
        assert!(fling.velocity().length() < 0.1);
        assert_eq!(fling.advance(20_000), None);
    }

    #[test]
    fn fling_below_epsilon_never_starts() {
        let mut fling = Fling::default();
        fling.start(Point2D::new(0.01, 0.0), 0.9, 10, 0.05, 0);
        assert!(!fling.is_active());
    }
}
