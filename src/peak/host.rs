use std::{cell::RefCell, rc::Rc};

use crate::foundation::core::Pose;

/// The 3D renderer seen from the sequencer: it shows poses and toggles
/// drag/rotate manipulation of the object.
pub trait SceneHost {
    /// Show the object at `pose` on the next frame.
    fn apply_pose(&mut self, pose: Pose);

    /// Enable or disable user manipulation of the object.
    fn set_interactive(&mut self, enabled: bool);
}

/// Host that ignores everything; used when no scene is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl SceneHost for NullHost {
    fn apply_pose(&mut self, _pose: Pose) {}

    fn set_interactive(&mut self, _enabled: bool) {}
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// What a [`RecordingHost`] has been asked to do.
pub struct HostLog {
    /// Every pose applied, in order.
    pub poses: Vec<Pose>,
    /// Every interaction toggle, in order.
    pub interactive: Vec<bool>,
}

/// Host that records calls. Clones share one log, so a clone kept by the
/// caller observes what the session did with the boxed original.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    log: Rc<RefCell<HostLog>>,
}

impl RecordingHost {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the log.
    pub fn log(&self) -> HostLog {
        self.log.borrow().clone()
    }

    /// Last applied pose.
    pub fn last_pose(&self) -> Option<Pose> {
        self.log.borrow().poses.last().copied()
    }

    /// Current interaction state (false until first enabled).
    pub fn is_interactive(&self) -> bool {
        self.log.borrow().interactive.last().copied().unwrap_or(false)
    }
}

impl SceneHost for RecordingHost {
    fn apply_pose(&mut self, pose: Pose) {
        self.log.borrow_mut().poses.push(pose);
    }

    fn set_interactive(&mut self, enabled: bool) {
        self.log.borrow_mut().interactive.push(enabled);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/peak/host.rs"]
mod tests;
