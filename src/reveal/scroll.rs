use crate::{
    animation::{ease::Ease, tween::Lerp},
    foundation::core::Vec2,
    foundation::error::{CurtainError, CurtainResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scroll region mapped onto `[0, 1]`.
pub struct ScrollTrigger {
    /// Scroll offset where progress is 0.
    pub start: f64,
    /// Scroll offset where progress is 1.
    pub end: f64,
}

impl ScrollTrigger {
    /// Validated constructor; `end` must lie after `start`.
    pub fn new(start: f64, end: f64) -> CurtainResult<Self> {
        if !(start.is_finite() && end.is_finite()) || end <= start {
            return Err(CurtainError::validation(
                "ScrollTrigger end must be finite and > start",
            ));
        }
        Ok(Self { start, end })
    }

    /// From the container's top reaching the viewport top, until the point
    /// `end_fraction` of the way down the container does.
    pub fn for_container(top: f64, height: f64, end_fraction: f64) -> Self {
        Self {
            start: top,
            end: top + height * end_fraction,
        }
    }

    /// Normalized progress for `scroll_y`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let span = self.end - self.start;
        if !(span > 0.0) || scroll_y.is_nan() {
            return 0.0;
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Scroll-derived contribution to a layer's style.
pub struct ScrollSample {
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Translation in CSS px.
    pub offset: Vec2,
}

impl ScrollSample {
    /// No scroll contribution.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scrubbed fade-out of `count` staggered children.
///
/// Each child tween lasts `child_duration` units and child `i` starts
/// `i * stagger` units in; scroll progress scrubs the whole span. There is no
/// stored state: a sample depends only on the scroll offset passed in, so
/// scrolling back restores earlier values exactly.
pub struct ScrollFade {
    /// Scroll region.
    pub trigger: ScrollTrigger,
    /// Number of children.
    pub count: u32,
    /// Start offset between children, scrub units.
    pub stagger: f64,
    /// Child tween length, scrub units.
    pub child_duration: f64,
    /// Vertical travel at full progress, CSS px.
    pub travel: f64,
    /// Curve for each child.
    pub ease: Ease,
}

impl ScrollFade {
    /// Total scrub span.
    pub fn span(&self) -> f64 {
        self.child_duration + self.stagger * f64::from(self.count.saturating_sub(1))
    }

    /// Linear progress of child `index`.
    pub fn child_progress(&self, index: u32, scroll_y: f64) -> f64 {
        if self.child_duration <= 0.0 {
            return self.trigger.progress(scroll_y);
        }
        let head = self.trigger.progress(scroll_y) * self.span();
        ((head - self.stagger * f64::from(index)) / self.child_duration).clamp(0.0, 1.0)
    }

    /// Style contribution of child `index`.
    pub fn sample(&self, index: u32, scroll_y: f64) -> ScrollSample {
        let e = self.ease.apply(self.child_progress(index, scroll_y));
        ScrollSample {
            opacity: <f64 as Lerp>::lerp(&1.0, &0.0, e),
            offset: Vec2::new(0.0, <f64 as Lerp>::lerp(&0.0, &self.travel, e)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/scroll.rs"]
mod tests;
