use crate::{
    foundation::core::{DeviceClass, Millis, Pose, SceneViewport},
    foundation::error::CurtainResult,
    peak::host::SceneHost,
    peak::timeline::{Cue, PeakTimeline},
    runtime::timers::{Scheduler, Scope},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Outward events of a sequencer.
pub enum PeakOutput {
    /// The peak milestone. Emitted at most once per sequencer.
    Milestone,
    /// User manipulation was enabled.
    Unlocked,
}

/// Milestone-emitting interface shared by the device variants.
pub trait Sequencer {
    /// Device class this variant is built for.
    fn device(&self) -> DeviceClass;

    /// Start playback at the scheduler's current time. Cues due at offset
    /// zero are handled synchronously and returned.
    fn start<E>(&mut self, sched: &Scheduler<E>, host: &mut dyn SceneHost) -> Vec<PeakOutput>
    where
        E: From<Cue> + 'static;

    /// Handle a cue timer armed by [`Sequencer::start`].
    fn on_cue(&mut self, cue: Cue, host: &mut dyn SceneHost) -> Option<PeakOutput>;

    /// Object pose at session time `now`.
    fn pose(&self, now: Millis) -> Pose;

    /// Whether the milestone has been emitted.
    fn milestone_fired(&self) -> bool;
}

#[derive(Debug)]
struct Playback {
    timeline: PeakTimeline,
    started_at: Option<Millis>,
    milestone_fired: bool,
    scope: Scope<Cue>,
}

impl Playback {
    fn new(timeline: PeakTimeline) -> CurtainResult<Self> {
        timeline.validate()?;
        Ok(Self::unchecked(timeline))
    }

    /// For the built-in timelines, which are valid by construction.
    fn unchecked(timeline: PeakTimeline) -> Self {
        Self {
            timeline,
            started_at: None,
            milestone_fired: false,
            scope: Scope::new(),
        }
    }

    fn start<E>(
        &mut self,
        interactive: bool,
        sched: &Scheduler<E>,
        host: &mut dyn SceneHost,
    ) -> Vec<PeakOutput>
    where
        E: From<Cue> + 'static,
    {
        if self.started_at.is_some() {
            tracing::debug!("sequencer already started");
            return Vec::new();
        }
        let now = sched.now();
        self.started_at = Some(now);
        host.set_interactive(interactive);
        host.apply_pose(self.timeline.initial);

        let mut out = Vec::new();
        for (at, cue) in self.timeline.cues() {
            if at == Millis::ZERO {
                out.extend(self.fire(cue, host));
            } else {
                self.scope.hold(cue, sched.after(at, cue.into()));
            }
        }
        out
    }

    fn on_cue(&mut self, cue: Cue, host: &mut dyn SceneHost) -> Option<PeakOutput> {
        self.scope.disarm(cue);
        self.fire(cue, host)
    }

    fn fire(&mut self, cue: Cue, host: &mut dyn SceneHost) -> Option<PeakOutput> {
        match cue {
            Cue::Peak => {
                if self.milestone_fired {
                    tracing::debug!("peak cue repeated, ignored");
                    return None;
                }
                self.milestone_fired = true;
                tracing::info!("peak milestone reached");
                Some(PeakOutput::Milestone)
            }
            Cue::Unlock => {
                host.set_interactive(true);
                tracing::debug!("object manipulation unlocked");
                Some(PeakOutput::Unlocked)
            }
        }
    }

    fn pose(&self, now: Millis) -> Pose {
        match self.started_at {
            Some(start) => self.timeline.pose_at(now.since(start)),
            None => self.timeline.initial,
        }
    }
}

/// Multi-stage flight: rise, peak mid-timeline, settle at the viewport
/// anchor, unlock, idle spin. Manipulation stays disabled until unlock.
#[derive(Debug)]
pub struct DesktopSequencer {
    playback: Playback,
}

impl DesktopSequencer {
    /// Built-in desktop timeline sized for `scene`.
    pub fn new(scene: SceneViewport) -> Self {
        Self {
            playback: Playback::unchecked(PeakTimeline::desktop(scene)),
        }
    }

    /// Custom timeline.
    pub fn with_timeline(timeline: PeakTimeline) -> CurtainResult<Self> {
        Ok(Self {
            playback: Playback::new(timeline)?,
        })
    }
}

impl Sequencer for DesktopSequencer {
    fn device(&self) -> DeviceClass {
        DeviceClass::Desktop
    }

    fn start<E>(&mut self, sched: &Scheduler<E>, host: &mut dyn SceneHost) -> Vec<PeakOutput>
    where
        E: From<Cue> + 'static,
    {
        self.playback.start(false, sched, host)
    }

    fn on_cue(&mut self, cue: Cue, host: &mut dyn SceneHost) -> Option<PeakOutput> {
        self.playback.on_cue(cue, host)
    }

    fn pose(&self, now: Millis) -> Pose {
        self.playback.pose(now)
    }

    fn milestone_fired(&self) -> bool {
        self.playback.milestone_fired
    }
}

/// No entry choreography: the milestone fires on start and the object idles
/// at a fixed scale, manipulable from the first frame.
#[derive(Debug)]
pub struct MobileSequencer {
    playback: Playback,
}

impl Default for MobileSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl MobileSequencer {
    /// Built-in mobile timeline.
    pub fn new() -> Self {
        Self {
            playback: Playback::unchecked(PeakTimeline::mobile()),
        }
    }
}

impl Sequencer for MobileSequencer {
    fn device(&self) -> DeviceClass {
        DeviceClass::Mobile
    }

    fn start<E>(&mut self, sched: &Scheduler<E>, host: &mut dyn SceneHost) -> Vec<PeakOutput>
    where
        E: From<Cue> + 'static,
    {
        self.playback.start(true, sched, host)
    }

    fn on_cue(&mut self, cue: Cue, host: &mut dyn SceneHost) -> Option<PeakOutput> {
        self.playback.on_cue(cue, host)
    }

    fn pose(&self, now: Millis) -> Pose {
        self.playback.pose(now)
    }

    fn milestone_fired(&self) -> bool {
        self.playback.milestone_fired
    }
}

/// Device variant chosen once per session.
#[derive(Debug)]
pub enum PeakSequencer {
    /// Portrait/narrow layout.
    Mobile(MobileSequencer),
    /// Wide layout.
    Desktop(DesktopSequencer),
}

impl PeakSequencer {
    /// Variant for `device`; `scene` sizes the desktop settle anchor.
    pub fn for_device(device: DeviceClass, scene: SceneViewport) -> Self {
        match device {
            DeviceClass::Mobile => Self::Mobile(MobileSequencer::new()),
            DeviceClass::Desktop => Self::Desktop(DesktopSequencer::new(scene)),
        }
    }
}

impl Sequencer for PeakSequencer {
    fn device(&self) -> DeviceClass {
        match self {
            Self::Mobile(s) => s.device(),
            Self::Desktop(s) => s.device(),
        }
    }

    fn start<E>(&mut self, sched: &Scheduler<E>, host: &mut dyn SceneHost) -> Vec<PeakOutput>
    where
        E: From<Cue> + 'static,
    {
        match self {
            Self::Mobile(s) => s.start(sched, host),
            Self::Desktop(s) => s.start(sched, host),
        }
    }

    fn on_cue(&mut self, cue: Cue, host: &mut dyn SceneHost) -> Option<PeakOutput> {
        match self {
            Self::Mobile(s) => s.on_cue(cue, host),
            Self::Desktop(s) => s.on_cue(cue, host),
        }
    }

    fn pose(&self, now: Millis) -> Pose {
        match self {
            Self::Mobile(s) => s.pose(now),
            Self::Desktop(s) => s.pose(now),
        }
    }

    fn milestone_fired(&self) -> bool {
        match self {
            Self::Mobile(s) => s.milestone_fired(),
            Self::Desktop(s) => s.milestone_fired(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/peak/sequencer.rs"]
mod tests;
