//! Scripted sessions: replay timed inputs against a [`Session`] and record
//! what happened.

use crate::{
    config::SessionConfig,
    foundation::core::{DeviceClass, Millis, Pose, Viewport},
    foundation::error::{CurtainError, CurtainResult},
    peak::host::NullHost,
    reveal::coordinator::{Layer, LayerStyle},
    reveal::signal::RevealSignal,
    reveal::state::{RevealState, Transition},
    session::Session,
};

/// Upper bound on frame samples in one run.
pub const MAX_FRAMES: u64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Loader progress reported at `at`.
pub struct ProgressInput {
    /// Session instant.
    pub at: Millis,
    /// Progress in `[0, 100]`.
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scroll offset reported at `at`.
pub struct ScrollInput {
    /// Session instant.
    pub at: Millis,
    /// Offset in CSS px.
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scripted session.
pub struct Scenario {
    /// Viewport at mount.
    pub viewport: Viewport,
    /// Loader progress samples.
    #[serde(default)]
    pub progress: Vec<ProgressInput>,
    /// When the scene reports ready; never if absent.
    #[serde(default)]
    pub scene_ready_at: Option<Millis>,
    /// Scroll samples.
    #[serde(default)]
    pub scroll: Vec<ScrollInput>,
    /// Instant the run stops.
    pub run_until: Millis,
    /// Pose sampling period; no frames if absent.
    #[serde(default)]
    pub frame_interval: Option<Millis>,
    /// Overrides of the default configuration.
    #[serde(default)]
    pub config: SessionConfig,
}

impl Scenario {
    /// Parse a scenario JSON document and validate it.
    pub fn from_json(s: &str) -> CurtainResult<Self> {
        let scenario: Self = serde_json::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject inputs scheduled after the run ends, degenerate viewports and
    /// frame sampling beyond [`MAX_FRAMES`].
    pub fn validate(&self) -> CurtainResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        self.config.validate()?;

        let late = self
            .progress
            .iter()
            .map(|p| p.at)
            .chain(self.scroll.iter().map(|s| s.at))
            .chain(self.scene_ready_at)
            .find(|at| *at > self.run_until);
        if let Some(at) = late {
            return Err(CurtainError::scenario(format!(
                "input at {at} is after run_until {}",
                self.run_until
            )));
        }
        if let Some(step) = self.frame_interval {
            if step == Millis::ZERO {
                return Err(CurtainError::scenario("frame_interval must be > 0"));
            }
            let frames = self.run_until.0 / step.0 + 1;
            if frames > MAX_FRAMES {
                return Err(CurtainError::scenario(format!(
                    "{frames} frames requested, at most {MAX_FRAMES} allowed"
                )));
            }
        }
        Ok(())
    }

    fn inputs(&self) -> Vec<(Millis, Input)> {
        let mut out: Vec<(Millis, Input)> = Vec::new();
        out.extend(
            self.progress
                .iter()
                .map(|p| (p.at, Input::Progress(p.value))),
        );
        out.extend(self.scene_ready_at.map(|at| (at, Input::SceneReady)));
        out.extend(self.scroll.iter().map(|s| (s.at, Input::Scroll(s.y))));
        if let Some(step) = self.frame_interval {
            let mut next = Some(Millis::ZERO);
            while let Some(at) = next.filter(|at| *at <= self.run_until) {
                out.push((at, Input::Frame));
                next = at.0.checked_add(step.0).map(Millis);
            }
        }
        // Stable: same-instant inputs keep the order above.
        out.sort_by_key(|(at, _)| *at);
        out
    }
}

#[derive(Clone, Copy, Debug)]
enum Input {
    Progress(f64),
    SceneReady,
    Scroll(f64),
    Frame,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Object pose sampled on a frame tick.
pub struct FrameSample {
    /// Session instant.
    pub at: Millis,
    /// Pose pushed to the scene.
    pub pose: Pose,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Style of one layer at the end of the run.
pub struct LayerSnapshot {
    /// Layer.
    pub layer: Layer,
    /// Its style.
    pub style: LayerStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Outcome of [`run_scenario`].
pub struct Trace {
    /// Device class chosen at mount.
    pub device: DeviceClass,
    /// Reveal transitions, oldest first.
    pub transitions: Vec<Transition>,
    /// Final reveal state.
    pub final_state: RevealState,
    /// Gate completion instant.
    pub gate_completed_at: Option<Millis>,
    /// Whether the gate completed through its safety valve.
    pub degraded: bool,
    /// Loading surface removal instant.
    pub loading_removed_at: Option<Millis>,
    /// Sequencer start instant.
    pub sequencer_started_at: Option<Millis>,
    /// Peak milestone instant (absent when the fallback revealed).
    pub milestone_at: Option<Millis>,
    /// Instant the reveal flag was raised.
    pub revealed_at: Option<Millis>,
    /// Object manipulation unlock instant.
    pub unlocked_at: Option<Millis>,
    /// Frame samples.
    pub frames: Vec<FrameSample>,
    /// Layer styles at `run_until`.
    pub layers: Vec<LayerSnapshot>,
    /// Wordmark prefix at `run_until`.
    pub wordmark: String,
    /// Timers still armed at `run_until`.
    pub armed_timers: usize,
}

/// Replay `scenario` on a fresh session without a scene attached.
#[tracing::instrument(skip(scenario), fields(run_until = %scenario.run_until))]
pub fn run_scenario(scenario: &Scenario) -> CurtainResult<Trace> {
    scenario.validate()?;
    let signal = RevealSignal::new();
    let mut session = Session::mount(
        scenario.config.clone(),
        scenario.viewport,
        Box::new(NullHost),
        signal.clone(),
    )?;

    let mut frames = Vec::new();
    for (at, input) in scenario.inputs() {
        session.advance_to(at);
        match input {
            Input::Progress(value) => session.report_progress(value),
            Input::SceneReady => session.scene_ready(),
            Input::Scroll(y) => session.scroll_to(y),
            Input::Frame => {
                if let Some(pose) = session.frame() {
                    frames.push(FrameSample { at, pose });
                }
            }
        }
    }
    session.advance_to(scenario.run_until);

    let m = session.milestones();
    let layers = session
        .layers()
        .into_iter()
        .filter_map(|layer| {
            session
                .layer_style(layer)
                .map(|style| LayerSnapshot { layer, style })
        })
        .collect();

    Ok(Trace {
        device: session.device(),
        transitions: session.transitions().to_vec(),
        final_state: session.reveal_state(),
        gate_completed_at: m.gate_completed.map(|(at, _)| at),
        degraded: m.gate_completed.is_some_and(|(_, c)| c.is_degraded()),
        loading_removed_at: m.loading_removed,
        sequencer_started_at: m.sequencer_started,
        milestone_at: m.milestone,
        revealed_at: signal.revealed_at(),
        unlocked_at: m.unlocked,
        frames,
        layers,
        wordmark: session.wordmark(),
        armed_timers: session.armed_timers(),
    })
}

#[cfg(test)]
#[path = "../tests/unit/scenario.rs"]
mod tests;
