// random draw capability for the builder
// keeping the draws behind a trait lets tests feed fixed sequences
// instead of relying on a global random state

use rand::Rng;

use super::archetype::Interval;

/// The two uniform draws the generator needs.
pub trait TreeRng {
    /// Uniform draw from `[interval.min, interval.max]`.
    fn draw(&mut self, interval: Interval) -> f32;

    /// Uniform azimuth in `[0, 360)` degrees, used once per tree to
    /// randomize the initial forward direction.
    fn draw_turn(&mut self) -> f32;
}

// any rand generator works, seeded StdRng in practice
impl<R: Rng> TreeRng for R {
    fn draw(&mut self, interval: Interval) -> f32 {
        // random_range panics on an empty range, degenerate intervals are valid
        if interval.max > interval.min {
            self.random_range(interval.min..interval.max)
        } else {
            interval.min
        }
    }

    fn draw_turn(&mut self) -> f32 {
        self.random_range(0.0..360.0)
    }
}
