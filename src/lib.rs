//! Staged reveal sequencing for an animated landing page.
//!
//! Three cooperating parts drive the reveal:
//!
//! - [`LoadingGate`] turns asset-loader progress into exactly one completion
//!   signal, forcing it after a safety valve when loading stalls.
//! - A [`PeakSequencer`] plays the per-device object timeline and emits a
//!   single "peak" milestone.
//! - The [`RevealCoordinator`] moves the page through [`RevealState`]s and
//!   derives every layer's opacity and offset from time and scroll.
//!
//! [`Session`] wires the three onto one deterministic virtual clock.
#![forbid(unsafe_code)]

pub mod foundation {
    pub mod core;
    pub mod error;
}

pub mod animation {
    pub mod ease;
    pub mod tween;
}

pub mod runtime {
    pub mod timers;
}

pub mod config;

pub mod gate {
    pub mod loading;
}

pub mod peak {
    pub mod host;
    pub mod sequencer;
    pub mod timeline;
}

pub mod reveal {
    pub mod coordinator;
    pub mod scroll;
    pub mod signal;
    pub mod state;
}

pub mod scenario;
pub mod session;

pub use animation::{ease::Ease, tween::Fade};
pub use config::{
    CameraConfig, DeviceRule, GateConfig, RevealConfig, ScrollConfig, ScrollTravel, SessionConfig,
    WordmarkConfig,
};
pub use foundation::core::{DeviceClass, Millis, Pose, SceneViewport, Vec2, Vec3, Viewport};
pub use foundation::error::{CurtainError, CurtainResult};
pub use gate::loading::{Completion, GateOutput, GateTimer, LoadingGate, LoadingSession};
pub use peak::host::{HostLog, NullHost, RecordingHost, SceneHost};
pub use peak::sequencer::{DesktopSequencer, MobileSequencer, PeakOutput, PeakSequencer, Sequencer};
pub use peak::timeline::{Cue, PeakTimeline, Property, Repeat, Stage, Target, Track};
pub use reveal::coordinator::{Layer, LayerStyle, RevealCoordinator, RevealTimer};
pub use reveal::scroll::{ScrollFade, ScrollSample, ScrollTrigger};
pub use reveal::signal::RevealSignal;
pub use reveal::state::{Cause, RevealState, Transition};
pub use runtime::timers::{Scheduler, Scope, TimerHandle, TimerId};
pub use scenario::{
    FrameSample, LayerSnapshot, ProgressInput, Scenario, ScrollInput, Trace, run_scenario,
};
pub use session::{Milestones, Session, SessionEvent};
