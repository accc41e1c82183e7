use crate::{
    animation::{ease::Ease, tween::Fade},
    config::GateConfig,
    foundation::core::Millis,
    runtime::timers::{Scheduler, Scope},
};

/// Logo artwork height used by the fill mask.
pub const INDICATOR_HEIGHT: f64 = 475.0;
/// Extra travel so the wave crest clears the top of the artwork at 100 %.
pub const INDICATOR_OVERSHOOT: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Timers owned by the loading gate.
pub enum GateTimer {
    /// Delay between observing 100 % and reporting completion.
    Grace,
    /// Ceiling after which completion is forced.
    SafetyValve,
    /// Removal of the loading surface after completion.
    Removal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// How the gate completed.
pub enum Completion {
    /// Progress reached 100 and the grace delay elapsed.
    Loaded,
    /// The safety valve expired first (degraded completion).
    Forced,
}

impl Completion {
    /// Whether this completion was forced by the safety valve.
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::Forced)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outward signals of the gate.
pub enum GateOutput {
    /// Fires exactly once per session.
    Complete(Completion),
    /// The loading surface may be dropped from the tree.
    Removed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
/// State of one loading phase.
pub struct LoadingSession {
    /// Latest progress sample in `[0, 100]`.
    pub progress: f64,
    /// Set once, by progress reaching 100 or by the safety valve.
    pub completed: bool,
    /// Set together with `completed`; drives the exit visual.
    pub exiting: bool,
    /// Instant `exiting` became true.
    pub exit_started: Option<Millis>,
}

impl LoadingSession {
    /// Progress as shown to the user.
    pub fn displayed_percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    /// Vertical offset of the liquid fill mask inside the logo artwork.
    pub fn fill_offset(&self) -> f64 {
        let p = f64::from(self.displayed_percent());
        INDICATOR_HEIGHT - (p / 100.0) * (INDICATOR_HEIGHT + INDICATOR_OVERSHOOT)
    }

    fn mark_completed(&mut self, now: Millis) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.exiting = true;
        self.exit_started = Some(now);
        true
    }
}

/// Indeterminate loading phase with a single forward-only completion signal.
///
/// Both completion paths (progress reaching 100, safety valve) are armed
/// concurrently; whichever fires first wins and the other becomes a no-op.
/// All timers live in the gate's [`Scope`] and are cancelled when the gate
/// is dropped.
#[derive(Debug)]
pub struct LoadingGate {
    config: GateConfig,
    session: LoadingSession,
    mounted_at: Millis,
    completed: Option<(Millis, Completion)>,
    scope: Scope<GateTimer>,
}

impl LoadingGate {
    /// Mount the gate and arm the safety valve.
    #[tracing::instrument(skip(config, sched))]
    pub fn mount<E>(config: GateConfig, sched: &Scheduler<E>) -> Self
    where
        E: From<GateTimer> + 'static,
    {
        let mut scope = Scope::new();
        scope.hold(
            GateTimer::SafetyValve,
            sched.after(config.safety_valve, GateTimer::SafetyValve.into()),
        );
        Self {
            config,
            session: LoadingSession::default(),
            mounted_at: sched.now(),
            completed: None,
            scope,
        }
    }

    /// Current loading state.
    pub fn session(&self) -> &LoadingSession {
        &self.session
    }

    /// Mount instant.
    pub fn mounted_at(&self) -> Millis {
        self.mounted_at
    }

    /// Instant and kind of the completion signal, once fired.
    pub fn completion(&self) -> Option<(Millis, Completion)> {
        self.completed
    }

    /// Feed a progress sample from the asset loader.
    pub fn observe_progress<E>(&mut self, progress: f64, sched: &Scheduler<E>)
    where
        E: From<GateTimer> + 'static,
    {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 100.0)
        };
        self.session.progress = progress;
        if progress < 100.0 {
            return;
        }

        let now = sched.now();
        if !self.session.mark_completed(now) {
            return;
        }
        tracing::debug!(%now, "assets loaded, grace delay armed");
        self.scope.disarm(GateTimer::SafetyValve);
        self.scope.hold(
            GateTimer::Grace,
            sched.after(self.config.grace, GateTimer::Grace.into()),
        );
    }

    /// Handle one of the gate's own timers.
    pub fn on_timer<E>(&mut self, timer: GateTimer, sched: &Scheduler<E>) -> Option<GateOutput>
    where
        E: From<GateTimer> + 'static,
    {
        let now = sched.now();
        match timer {
            GateTimer::Grace => self.complete(Completion::Loaded, sched),
            GateTimer::SafetyValve => {
                if !self.session.mark_completed(now) {
                    tracing::debug!(%now, "safety valve fired after completion, ignored");
                    return None;
                }
                tracing::warn!(
                    %now,
                    progress = self.session.progress,
                    "loading stalled, force completing"
                );
                self.complete(Completion::Forced, sched)
            }
            GateTimer::Removal => {
                self.scope.disarm(GateTimer::Removal);
                tracing::debug!(%now, "loading surface removed");
                Some(GateOutput::Removed)
            }
        }
    }

    fn complete<E>(&mut self, how: Completion, sched: &Scheduler<E>) -> Option<GateOutput>
    where
        E: From<GateTimer> + 'static,
    {
        let now = sched.now();
        if let Some((at, first)) = self.completed {
            tracing::debug!(%now, %at, ?first, "duplicate completion ignored");
            return None;
        }
        self.completed = Some((now, how));
        self.scope.disarm(GateTimer::Grace);
        self.scope.disarm(GateTimer::SafetyValve);
        self.scope.hold(
            GateTimer::Removal,
            sched.after(self.config.removal_buffer, GateTimer::Removal.into()),
        );
        tracing::info!(%now, degraded = how.is_degraded(), "loading gate complete");
        Some(GateOutput::Complete(how))
    }

    /// Opacity of the loading indicator; fades out once exiting.
    pub fn indicator_opacity(&self, now: Millis) -> f64 {
        match self.session.exit_started {
            Some(start) => Fade::fade_out(start, self.config.exit_fade, Ease::InOutSine).sample(now),
            None => 1.0,
        }
    }

    /// Number of timers still armed by the gate.
    pub fn armed_timers(&self) -> usize {
        self.scope.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gate/loading.rs"]
mod tests;
