//! Session timing and layout configuration.
//!
//! Every field has a default, so a partial JSON document only needs to name
//! the values it overrides.

use crate::{
    animation::ease::Ease,
    foundation::core::{DeviceClass, Millis, Viewport},
    foundation::error::{CurtainError, CurtainResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Top-level configuration for one reveal session.
pub struct SessionConfig {
    /// Loading gate timings.
    pub gate: GateConfig,
    /// Mobile/desktop split.
    pub device: DeviceRule,
    /// Cross-fade timings and fallbacks.
    pub reveal: RevealConfig,
    /// Scroll-linked fade parameters.
    pub scroll: ScrollConfig,
    /// Scene camera used to size the settle anchor.
    pub camera: CameraConfig,
}

impl SessionConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(s: &str) -> CurtainResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or divide by zero.
    pub fn validate(&self) -> CurtainResult<()> {
        let gate = &self.gate;
        if gate.safety_valve.0 == 0 {
            return Err(CurtainError::validation("gate.safety_valve must be > 0"));
        }
        if gate.removal_buffer.0 == 0 {
            return Err(CurtainError::validation("gate.removal_buffer must be > 0"));
        }

        if let DeviceRule::Width { breakpoint } = self.device {
            if !(breakpoint.is_finite() && breakpoint > 0.0) {
                return Err(CurtainError::validation(
                    "device.breakpoint must be finite and > 0",
                ));
            }
        }

        let reveal = &self.reveal;
        if reveal.fallback_mobile.0 == 0 || reveal.fallback_desktop.0 == 0 {
            return Err(CurtainError::validation("reveal fallbacks must be > 0"));
        }
        if reveal.hero_layers_desktop == 0 || reveal.hero_layers_mobile == 0 {
            return Err(CurtainError::validation("reveal hero layer counts must be > 0"));
        }

        let scroll = &self.scroll;
        if !(scroll.end_fraction.is_finite() && scroll.end_fraction > 0.0) {
            return Err(CurtainError::validation(
                "scroll.end_fraction must be finite and > 0",
            ));
        }
        if !(scroll.child_duration.is_finite() && scroll.child_duration > 0.0) {
            return Err(CurtainError::validation(
                "scroll.child_duration must be finite and > 0",
            ));
        }
        for travel in [&scroll.desktop, &scroll.mobile] {
            if !(travel.stagger.is_finite() && travel.stagger >= 0.0) {
                return Err(CurtainError::validation("scroll stagger must be >= 0"));
            }
        }

        let camera = &self.camera;
        if !(camera.distance > 0.0 && camera.fov_deg > 0.0 && camera.fov_deg < 180.0) {
            return Err(CurtainError::validation(
                "camera distance must be > 0 and fov in (0, 180)",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Loading gate timings.
pub struct GateConfig {
    /// Delay between progress reaching 100 and the completion signal.
    pub grace: Millis,
    /// Completion is forced this long after mount.
    pub safety_valve: Millis,
    /// The loading surface is removed this long after completion.
    pub removal_buffer: Millis,
    /// Length of the indicator's exit fade.
    pub exit_fade: Millis,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            grace: Millis(1000),
            safety_valve: Millis(8000),
            removal_buffer: Millis(6000),
            exit_fade: Millis(1000),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
/// How the device class is derived from the viewport at mount.
pub enum DeviceRule {
    /// Mobile when the viewport is narrower than `breakpoint` CSS px.
    Width {
        /// Breakpoint in CSS pixels.
        breakpoint: f64,
    },
    /// Mobile when the viewport is taller than it is wide.
    Aspect,
}

impl Default for DeviceRule {
    fn default() -> Self {
        Self::Width { breakpoint: 768.0 }
    }
}

impl DeviceRule {
    /// Classify `viewport`. Called once per session.
    pub fn classify(self, viewport: Viewport) -> DeviceClass {
        let mobile = match self {
            Self::Width { breakpoint } => viewport.width < breakpoint,
            Self::Aspect => viewport.width < viewport.height,
        };
        if mobile {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Cross-fade timings.
pub struct RevealConfig {
    /// Peak fallback on mobile, armed at content mount.
    pub fallback_mobile: Millis,
    /// Peak fallback on desktop, armed at content mount.
    pub fallback_desktop: Millis,
    /// Background fade-in, started at content mount.
    pub background_fade: Millis,
    /// Content fade-in, started at peak.
    pub content_fade: Millis,
    /// Mobile scene fade-in, started at peak.
    pub scene_fade: Millis,
    /// Hero children on desktop.
    pub hero_layers_desktop: u32,
    /// Hero children on mobile.
    pub hero_layers_mobile: u32,
    /// Letter-by-letter wordmark reveal.
    pub wordmark: WordmarkConfig,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fallback_mobile: Millis(2000),
            fallback_desktop: Millis(5000),
            background_fade: Millis(2000),
            content_fade: Millis(1500),
            scene_fade: Millis(800),
            hero_layers_desktop: 4,
            hero_layers_mobile: 3,
            wordmark: WordmarkConfig::default(),
        }
    }
}

impl RevealConfig {
    /// Peak fallback for `device`.
    pub fn fallback_for(&self, device: DeviceClass) -> Millis {
        match device {
            DeviceClass::Mobile => self.fallback_mobile,
            DeviceClass::Desktop => self.fallback_desktop,
        }
    }

    /// Hero child count for `device`.
    pub fn hero_layers_for(&self, device: DeviceClass) -> u32 {
        match device {
            DeviceClass::Mobile => self.hero_layers_mobile,
            DeviceClass::Desktop => self.hero_layers_desktop,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Wordmark typewriter settings.
pub struct WordmarkConfig {
    /// Text revealed one letter at a time.
    pub text: String,
    /// Delay after peak before the first letter.
    pub delay: Millis,
    /// Time to reveal the whole text.
    pub duration: Millis,
}

impl Default for WordmarkConfig {
    fn default() -> Self {
        Self {
            text: "AGNITUS".to_string(),
            delay: Millis(500),
            duration: Millis(1500),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Scroll-linked fade parameters.
pub struct ScrollConfig {
    /// End trigger as a fraction of the container height (start is page top).
    pub end_fraction: f64,
    /// Per-child tween length in scrub units.
    pub child_duration: f64,
    /// Curve applied to each child's local progress.
    pub ease: Ease,
    /// Hero travel on desktop.
    pub desktop: ScrollTravel,
    /// Hero travel on mobile.
    pub mobile: ScrollTravel,
    /// Vertical travel of the scene layer in CSS px.
    pub scene_travel: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            end_fraction: 0.4,
            child_duration: 0.5,
            ease: Ease::OutQuad,
            desktop: ScrollTravel {
                travel: -100.0,
                stagger: 0.1,
            },
            mobile: ScrollTravel {
                travel: -50.0,
                stagger: 0.05,
            },
            scene_travel: -100.0,
        }
    }
}

impl ScrollConfig {
    /// Hero travel for `device`.
    pub fn hero_for(&self, device: DeviceClass) -> ScrollTravel {
        match device {
            DeviceClass::Mobile => self.mobile,
            DeviceClass::Desktop => self.desktop,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Vertical travel and stagger of a group of scroll-linked children.
pub struct ScrollTravel {
    /// Offset at full scroll progress, CSS px.
    pub travel: f64,
    /// Start offset between consecutive children, in scrub units.
    pub stagger: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Perspective camera looking at the object plane.
pub struct CameraConfig {
    /// Distance from camera to the object plane, scene units.
    pub distance: f64,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 4.0,
            fov_deg: 50.0,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
