use crate::{
    animation::ease::Ease,
    foundation::core::{Millis, Pose, Vec2, Vec3},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at fraction `t` between `a` (t = 0) and `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

impl Lerp for Pose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            position: <Vec3 as Lerp>::lerp(&a.position, &b.position, t),
            rotation: <Vec3 as Lerp>::lerp(&a.rotation, &b.rotation, t),
            scale: <Vec3 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One-shot scalar transition anchored on the session clock.
///
/// Holds `from` before `start` and `to` after `start + duration`.
pub struct Fade {
    /// Instant the transition begins.
    pub start: Millis,
    /// Transition length; zero means an instant switch at `start`.
    pub duration: Millis,
    /// Value before the transition.
    pub from: f64,
    /// Value after the transition.
    pub to: f64,
    /// Curve applied to normalized time.
    pub ease: Ease,
}

impl Fade {
    /// Opacity fade from 0 to 1.
    pub fn fade_in(start: Millis, duration: Millis, ease: Ease) -> Self {
        Self {
            start,
            duration,
            from: 0.0,
            to: 1.0,
            ease,
        }
    }

    /// Opacity fade from 1 to 0.
    pub fn fade_out(start: Millis, duration: Millis, ease: Ease) -> Self {
        Self {
            start,
            duration,
            from: 1.0,
            to: 0.0,
            ease,
        }
    }

    /// Normalized linear time in `[0, 1]`.
    pub fn progress(&self, now: Millis) -> f64 {
        if now < self.start {
            return 0.0;
        }
        if self.duration.0 == 0 {
            return 1.0;
        }
        (now.since(self.start).0 as f64 / self.duration.0 as f64).clamp(0.0, 1.0)
    }

    /// Eased value at `now`.
    pub fn sample(&self, now: Millis) -> f64 {
        <f64 as Lerp>::lerp(&self.from, &self.to, self.ease.apply(self.progress(now)))
    }

    /// Whether the transition has reached `to`.
    pub fn is_finished(&self, now: Millis) -> bool {
        now >= self.start.after(self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
