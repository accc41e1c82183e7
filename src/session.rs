//! Composition root: one loading gate, one peak sequencer and one reveal
//! coordinator sharing a single virtual event loop.
//!
//! Data flow:
//!
//! 1. The gate completes once (loaded or forced) and the coordinator mounts
//!    content, arming the peak fallback.
//! 2. Once content is mounted and the scene reports ready, the device's
//!    sequencer starts; its milestone (or the fallback) reveals the page.
//! 3. Scroll offsets then drive layer styles.
//!
//! Dropping or unmounting the session cancels every armed timer.

use crate::{
    config::SessionConfig,
    foundation::core::{DeviceClass, Millis, Pose, SceneViewport, Viewport},
    foundation::error::CurtainResult,
    gate::loading::{Completion, GateOutput, GateTimer, LoadingGate, LoadingSession},
    peak::host::SceneHost,
    peak::sequencer::{PeakOutput, PeakSequencer, Sequencer},
    peak::timeline::Cue,
    reveal::coordinator::{Layer, LayerStyle, RevealCoordinator, RevealTimer},
    reveal::signal::RevealSignal,
    reveal::state::{RevealState, Transition},
    runtime::timers::Scheduler,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Every timer armed in a session.
pub enum SessionEvent {
    /// Loading gate timer.
    Gate(GateTimer),
    /// Peak timeline cue.
    Peak(Cue),
    /// Reveal coordinator timer.
    Reveal(RevealTimer),
}

impl From<GateTimer> for SessionEvent {
    fn from(t: GateTimer) -> Self {
        Self::Gate(t)
    }
}

impl From<Cue> for SessionEvent {
    fn from(c: Cue) -> Self {
        Self::Peak(c)
    }
}

impl From<RevealTimer> for SessionEvent {
    fn from(t: RevealTimer) -> Self {
        Self::Reveal(t)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Notable instants of a session.
pub struct Milestones {
    /// Gate completion and how it happened.
    pub gate_completed: Option<(Millis, Completion)>,
    /// Loading surface removal.
    pub loading_removed: Option<Millis>,
    /// Sequencer start.
    pub sequencer_started: Option<Millis>,
    /// Peak milestone from the sequencer (not the fallback).
    pub milestone: Option<Millis>,
    /// Object manipulation unlocked.
    pub unlocked: Option<Millis>,
}

/// One page session.
pub struct Session {
    sched: Scheduler<SessionEvent>,
    device: DeviceClass,
    viewport: Viewport,
    scene: SceneViewport,
    gate: Option<LoadingGate>,
    coordinator: RevealCoordinator,
    sequencer: Option<PeakSequencer>,
    scene_ready: bool,
    host: Box<dyn SceneHost>,
    signal: RevealSignal,
    milestones: Milestones,
}

impl Session {
    /// Mount at session time zero: classify the device and arm the gate.
    #[tracing::instrument(skip(config, host, signal))]
    pub fn mount(
        config: SessionConfig,
        viewport: Viewport,
        host: Box<dyn SceneHost>,
        signal: RevealSignal,
    ) -> CurtainResult<Self> {
        config.validate()?;
        let sched = Scheduler::new();
        let device = config.device.classify(viewport);
        let scene =
            SceneViewport::from_camera(viewport, config.camera.distance, config.camera.fov_deg);
        let gate = LoadingGate::mount(config.gate, &sched);
        let coordinator = RevealCoordinator::new(
            config.reveal,
            &config.scroll,
            device,
            viewport,
            signal.clone(),
        );
        tracing::info!(?device, "session mounted");
        Ok(Self {
            sched,
            device,
            viewport,
            scene,
            gate: Some(gate),
            coordinator,
            sequencer: None,
            scene_ready: false,
            host,
            signal,
            milestones: Milestones::default(),
        })
    }

    /// Current session time.
    pub fn now(&self) -> Millis {
        self.sched.now()
    }

    /// Device class decided at mount.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Viewport sampled at mount.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Shared "revealed" flag.
    pub fn signal(&self) -> &RevealSignal {
        &self.signal
    }

    /// Current reveal state.
    pub fn reveal_state(&self) -> RevealState {
        self.coordinator.state()
    }

    /// Reveal transitions so far.
    pub fn transitions(&self) -> &[Transition] {
        self.coordinator.transitions()
    }

    /// Notable instants so far.
    pub fn milestones(&self) -> Milestones {
        self.milestones
    }

    /// Loading state while the loading surface is mounted.
    pub fn loading(&self) -> Option<&LoadingSession> {
        self.gate.as_ref().map(LoadingGate::session)
    }

    /// Whether the loading surface is still in the tree.
    pub fn loading_visible(&self) -> bool {
        self.gate.is_some()
    }

    /// Loading indicator opacity now (0 once removed).
    pub fn loading_opacity(&self) -> f64 {
        self.gate
            .as_ref()
            .map_or(0.0, |g| g.indicator_opacity(self.now()))
    }

    /// Feed a progress sample from the asset loader.
    pub fn report_progress(&mut self, progress: f64) {
        if let Some(gate) = self.gate.as_mut() {
            gate.observe_progress(progress, &self.sched);
        }
    }

    /// The 3D scene finished initializing.
    #[tracing::instrument(skip(self))]
    pub fn scene_ready(&mut self) {
        self.scene_ready = true;
        self.try_start_sequencer();
    }

    /// Latest scroll offset in CSS px.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.coordinator.on_scroll(scroll_y);
    }

    /// Run every timer due up to `until`, in order, then move the clock there.
    pub fn advance_to(&mut self, until: Millis) {
        while let Some((_, event)) = self.sched.pop_due(until) {
            self.dispatch(event);
        }
        self.sched.advance(until);
    }

    /// [`Session::advance_to`] relative to now.
    pub fn advance_by(&mut self, by: Millis) {
        self.advance_to(self.now().after(by));
    }

    /// Animation-frame tick: push the current object pose to the host.
    pub fn frame(&mut self) -> Option<Pose> {
        let pose = self.sequencer.as_ref()?.pose(self.now());
        self.host.apply_pose(pose);
        Some(pose)
    }

    /// Style of `layer` now.
    pub fn layer_style(&self, layer: Layer) -> Option<LayerStyle> {
        self.coordinator.layer_style(layer, self.now())
    }

    /// Layers for this device, back to front.
    pub fn layers(&self) -> Vec<Layer> {
        self.coordinator.layers()
    }

    /// Wordmark prefix shown now.
    pub fn wordmark(&self) -> String {
        self.coordinator.wordmark(self.now())
    }

    /// Timers still armed.
    pub fn armed_timers(&self) -> usize {
        self.sched.pending()
    }

    /// Deadline of the next armed timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.sched.next_deadline()
    }

    /// Tear down mid-sequence. Returns the number of timers left armed,
    /// which is always zero.
    pub fn unmount(mut self) -> usize {
        let armed = self.sched.pending();
        self.gate = None;
        self.sequencer = None;
        let sched = self.sched.clone();
        drop(self);
        tracing::debug!(cancelled = armed, "session unmounted");
        sched.pending()
    }

    fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Gate(timer) => {
                let out = self
                    .gate
                    .as_mut()
                    .and_then(|g| g.on_timer(timer, &self.sched));
                match out {
                    Some(GateOutput::Complete(completion)) => self.on_gate_complete(completion),
                    Some(GateOutput::Removed) => {
                        self.gate = None;
                        self.milestones.loading_removed = Some(self.now());
                    }
                    None => {}
                }
            }
            SessionEvent::Peak(cue) => {
                let out = match self.sequencer.as_mut() {
                    Some(seq) => seq.on_cue(cue, self.host.as_mut()),
                    None => None,
                };
                if let Some(out) = out {
                    self.on_peak_output(out);
                }
            }
            SessionEvent::Reveal(timer) => {
                self.coordinator.on_timer(timer, &self.sched);
            }
        }
    }

    fn on_gate_complete(&mut self, completion: Completion) {
        self.milestones.gate_completed = Some((self.now(), completion));
        if self.coordinator.on_gate_complete(completion, &self.sched) {
            self.try_start_sequencer();
        }
    }

    fn try_start_sequencer(&mut self) {
        if self.sequencer.is_some()
            || !self.scene_ready
            || self.coordinator.state() < RevealState::ContentMounted
        {
            return;
        }
        let mut seq = PeakSequencer::for_device(self.device, self.scene);
        let outputs = seq.start(&self.sched, self.host.as_mut());
        self.sequencer = Some(seq);
        self.milestones.sequencer_started = Some(self.now());
        for out in outputs {
            self.on_peak_output(out);
        }
    }

    fn on_peak_output(&mut self, out: PeakOutput) {
        let now = self.now();
        match out {
            PeakOutput::Milestone => {
                self.milestones.milestone = Some(now);
                self.coordinator.on_milestone(&self.sched);
            }
            PeakOutput::Unlocked => self.milestones.unlocked = Some(now),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
