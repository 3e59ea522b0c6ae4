//! Duty-cycle animators.
//!
//! Two control strategies exist for this demo and they are deliberately
//! separate types rather than one conflated state machine:
//!
//! - [`StepSequence`] cycles through a fixed table of RGB duty tuples
//!   (the canonical demo behavior),
//! - [`Fade`] ramps a single level up and down between two bounds.
//!
//! Both are pure state: the owning task advances them once per tick and
//! pushes the result into the engine. They never touch timer or GPIO
//! registers themselves.

/// Cycles through a fixed, ordered table of (red, green, blue) duty
/// tuples, wrapping to the first tuple after the last.
///
/// The owning task applies each tuple atomically through
/// [`crate::PwmEngine::set_rgb`] and holds it for a fixed delay before
/// advancing.
pub struct StepSequence<'a> {
    steps: &'a [(u16, u16, u16)],
    next: usize,
}

impl<'a> StepSequence<'a> {
    /// `steps` must not be empty.
    pub const fn new(steps: &'a [(u16, u16, u16)]) -> StepSequence<'a> {
        assert!(!steps.is_empty());
        StepSequence { steps, next: 0 }
    }

    /// Returns the next tuple to apply.
    pub fn advance(&mut self) -> (u16, u16, u16) {
        let step = self.steps[self.next];
        self.next = (self.next + 1) % self.steps.len();
        step
    }
}

/// Linear brightness ramp with reflecting bounds.
///
/// The level is signed and the step carries the direction as its sign;
/// there is no reliance on unsigned wraparound. After each tick the
/// direction flips when the updated level has reached or crossed a bound
/// (inclusive comparison), so the turn happens at the boundary itself
/// and the updated value is the one applied to hardware.
///
/// A ramp that starts on a bound overshoots it by one step for a single
/// tick before turning around. That overshoot is the documented behavior
/// of this variant and is not hidden by clamping, so callers must size
/// `max + step` within the duty range they drive.
pub struct Fade {
    level: i32,
    step: i32,
    min: i32,
    max: i32,
}

impl Fade {
    pub const fn new(start: i32, step: i32, min: i32, max: i32) -> Fade {
        Fade {
            level: start,
            step,
            min,
            max,
        }
    }

    /// Advances one tick and returns the updated level.
    pub fn tick(&mut self) -> i32 {
        self.level += self.step;
        if self.level >= self.max || self.level <= self.min {
            self.step = -self.step;
        }
        self.level
    }

    /// Current level, as of the last tick.
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Current step, sign included.
    pub fn step(&self) -> i32 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_after_the_last_tuple() {
        let steps = [(1000, 220, 50), (500, 110, 25), (0, 0, 0)];
        let mut sequence = StepSequence::new(&steps);

        assert_eq!(sequence.advance(), (1000, 220, 50));
        assert_eq!(sequence.advance(), (500, 110, 25));
        assert_eq!(sequence.advance(), (0, 0, 0));
        // Wraps back to the first tuple.
        assert_eq!(sequence.advance(), (1000, 220, 50));
        assert_eq!(sequence.advance(), (500, 110, 25));
    }

    #[test]
    fn fade_reflects_at_the_upper_bound_with_one_tick_overshoot() {
        // Starting on the upper bound itself: the first tick overshoots
        // by one step, the bound check flips the direction, and the next
        // tick comes back down.
        let mut fade = Fade::new(255, 5, 0, 255);

        assert_eq!(fade.tick(), 260);
        assert_eq!(fade.step(), -5);
        assert_eq!(fade.tick(), 255);
    }

    #[test]
    fn fade_from_zero_sweeps_a_triangle_within_bounds() {
        let mut fade = Fade::new(0, 5, 0, 255);

        // Up to the bound: 255 is a multiple of 5, so the ramp touches
        // the bound exactly and turns there.
        for expected in (5..=255).step_by(5) {
            assert_eq!(fade.tick(), expected);
        }
        assert_eq!(fade.step(), -5);

        // And back down to the lower bound.
        for expected in (0..=250).rev().step_by(5) {
            assert_eq!(fade.tick(), expected);
        }
        assert_eq!(fade.step(), 5);
    }

    #[test]
    fn fade_never_leaves_the_overshoot_envelope() {
        let mut fade = Fade::new(255, 5, 0, 255);

        for _ in 0..500 {
            let level = fade.tick();
            assert!(level >= -5 && level <= 260);
        }
    }
}
