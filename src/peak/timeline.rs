use std::f64::consts::PI;

use crate::{
    animation::{ease::Ease, tween::Lerp},
    foundation::core::{Millis, Pose, SceneViewport, Vec3},
    foundation::error::{CurtainError, CurtainResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Discrete checkpoint fired when a stage starts.
pub enum Cue {
    /// The page may start revealing. Exactly one per timeline.
    Peak,
    /// User manipulation of the object may be enabled.
    Unlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Animated component of a [`Pose`].
pub enum Property {
    /// `Pose::position`.
    Position,
    /// `Pose::rotation`.
    Rotation,
    /// `Pose::scale`.
    Scale,
}

impl Property {
    fn get(self, pose: &Pose) -> Vec3 {
        match self {
            Self::Position => pose.position,
            Self::Rotation => pose.rotation,
            Self::Scale => pose.scale,
        }
    }

    fn set(self, pose: &mut Pose, v: Vec3) {
        match self {
            Self::Position => pose.position = v,
            Self::Rotation => pose.rotation = v,
            Self::Scale => pose.scale = v,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// End value of a track.
pub enum Target {
    /// Absolute value.
    To(Vec3),
    /// Offset from the value at stage start.
    By(Vec3),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One property interpolated over the whole stage.
pub struct Track {
    /// Animated property.
    pub property: Property,
    /// Where the property ends up.
    pub target: Target,
    /// Curve for this property.
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Stage repetition.
pub enum Repeat {
    /// Play once, then hand over to the next stage.
    #[default]
    Once,
    /// Loop forever. Only valid on the last stage.
    Forever,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A timeline segment: all tracks run in parallel over `duration`.
pub struct Stage {
    /// Name for logs.
    pub name: String,
    /// Stage length (loop period when repeating).
    pub duration: Millis,
    /// Parallel property tracks.
    pub tracks: Vec<Track>,
    /// Cue fired when the stage starts.
    #[serde(default)]
    pub on_start: Option<Cue>,
    /// Repetition mode.
    #[serde(default)]
    pub repeat: Repeat,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scripted object animation: a start pose followed by sequential stages.
pub struct PeakTimeline {
    /// Pose before the first stage.
    pub initial: Pose,
    /// Stages, played back to back.
    pub stages: Vec<Stage>,
}

impl PeakTimeline {
    /// Full-screen entry: rise, settle into the anchor with a spin, then idle.
    pub fn desktop(scene: SceneViewport) -> Self {
        let anchor = Vec3::new(scene.width * 0.032, scene.height * 0.421, 0.0);
        Self {
            initial: Pose {
                position: Vec3::new(0.0, -10.0, 0.0),
                rotation: Vec3::new(0.0, PI / 11.0 * 7.5, 0.0),
                scale: Vec3::splat(0.8),
            },
            stages: vec![
                Stage {
                    name: "intro".to_string(),
                    duration: Millis(2500),
                    tracks: vec![Track {
                        property: Property::Position,
                        target: Target::To(Vec3::new(0.0, 5.0, 0.0)),
                        ease: Ease::InOutSine,
                    }],
                    on_start: None,
                    repeat: Repeat::Once,
                },
                Stage {
                    name: "settle".to_string(),
                    duration: Millis(2000),
                    tracks: vec![
                        Track {
                            property: Property::Position,
                            target: Target::To(anchor),
                            ease: Ease::OutCubic,
                        },
                        Track {
                            property: Property::Rotation,
                            target: Target::To(Vec3::new(0.0, PI * 4.0, 0.0)),
                            ease: Ease::InOutQuad,
                        },
                        Track {
                            property: Property::Scale,
                            target: Target::To(Vec3::splat(0.25)),
                            ease: Ease::InOutQuad,
                        },
                    ],
                    on_start: Some(Cue::Peak),
                    repeat: Repeat::Once,
                },
                idle_stage(Some(Cue::Unlock)),
            ],
        }
    }

    /// No entry flight: centered, small, spinning from the first frame.
    pub fn mobile() -> Self {
        Self {
            initial: Pose {
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                scale: Vec3::splat(0.2),
            },
            stages: vec![idle_stage(Some(Cue::Peak))],
        }
    }

    /// Structural checks: non-empty, positive durations, a single peak cue,
    /// and an infinite loop only at the end.
    pub fn validate(&self) -> CurtainResult<()> {
        if self.stages.is_empty() {
            return Err(CurtainError::timeline("timeline must have at least one stage"));
        }
        if let Some(stage) = self.stages.iter().find(|s| s.duration.0 == 0) {
            return Err(CurtainError::timeline(format!(
                "stage '{}' must have a duration > 0",
                stage.name
            )));
        }
        let peaks = self
            .stages
            .iter()
            .filter(|s| s.on_start == Some(Cue::Peak))
            .count();
        if peaks != 1 {
            return Err(CurtainError::timeline(format!(
                "timeline must carry exactly one peak cue, found {peaks}"
            )));
        }
        let last = self.stages.len() - 1;
        if let Some((i, _)) = self
            .stages
            .iter()
            .enumerate()
            .find(|(i, s)| s.repeat == Repeat::Forever && *i != last)
        {
            return Err(CurtainError::timeline(format!(
                "only the last stage may repeat forever (stage {i})"
            )));
        }
        Ok(())
    }

    /// Timeline-local instant each stage starts at.
    pub fn stage_starts(&self) -> Vec<Millis> {
        let mut at = Millis::ZERO;
        self.stages
            .iter()
            .map(|s| {
                let start = at;
                at = at.after(s.duration);
                start
            })
            .collect()
    }

    /// Cues in timeline order with their local instants.
    pub fn cues(&self) -> Vec<(Millis, Cue)> {
        self.stage_starts()
            .into_iter()
            .zip(&self.stages)
            .filter_map(|(at, s)| s.on_start.map(|cue| (at, cue)))
            .collect()
    }

    /// Local instant of the peak cue.
    pub fn peak_at(&self) -> Option<Millis> {
        self.cues()
            .into_iter()
            .find_map(|(at, cue)| (cue == Cue::Peak).then_some(at))
    }

    /// Pose at timeline-local time `t`. Pure; any `t` may be sampled.
    pub fn pose_at(&self, t: Millis) -> Pose {
        let mut pose = self.initial;
        let mut start = Millis::ZERO;
        for stage in &self.stages {
            let end = start.after(stage.duration);
            let local = t.since(start);
            match stage.repeat {
                Repeat::Forever => {
                    return stage.sample(&pose, Millis(local.0 % stage.duration.0.max(1)));
                }
                Repeat::Once if t < end => return stage.sample(&pose, local),
                Repeat::Once => pose = stage.sample(&pose, stage.duration),
            }
            start = end;
        }
        pose
    }
}

impl Stage {
    fn sample(&self, from: &Pose, local: Millis) -> Pose {
        let t = if self.duration.0 == 0 {
            1.0
        } else {
            (local.0 as f64 / self.duration.0 as f64).clamp(0.0, 1.0)
        };
        let mut pose = *from;
        for track in &self.tracks {
            let a = track.property.get(from);
            let b = match track.target {
                Target::To(v) => v,
                Target::By(d) => a + d,
            };
            track
                .property
                .set(&mut pose, <Vec3 as Lerp>::lerp(&a, &b, track.ease.apply(t)));
        }
        pose
    }
}

fn idle_stage(on_start: Option<Cue>) -> Stage {
    Stage {
        name: "idle".to_string(),
        duration: Millis(6000),
        tracks: vec![Track {
            property: Property::Rotation,
            target: Target::By(Vec3::new(0.0, PI * 2.0, 0.0)),
            ease: Ease::Linear,
        }],
        on_start,
        repeat: Repeat::Forever,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/peak/timeline.rs"]
mod tests;
