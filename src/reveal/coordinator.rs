use crate::{
    animation::{ease::Ease, tween::Fade},
    config::{RevealConfig, ScrollConfig},
    foundation::core::{DeviceClass, Millis, Vec2, Viewport},
    gate::loading::Completion,
    reveal::scroll::{ScrollFade, ScrollSample, ScrollTrigger},
    reveal::signal::RevealSignal,
    reveal::state::{Cause, RevealState, Transition},
    runtime::timers::{Scheduler, Scope},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Timers owned by the coordinator.
pub enum RevealTimer {
    /// Forces the peak when the milestone never arrives.
    PeakFallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Visual layers whose style derives from the reveal state.
pub enum Layer {
    /// Backdrop behind everything (starfield).
    Background,
    /// Wrapper around the 3D canvas.
    Scene,
    /// Hero child `i` (logo, wordmark fill, character, wordmark stroke).
    Hero(u32),
    /// Section below the hero.
    Showcase,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Derived style of a layer at one instant.
pub struct LayerStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in CSS px.
    pub offset: Vec2,
    /// Whether the layer accepts pointer input.
    pub interactive: bool,
}

impl LayerStyle {
    const HIDDEN: Self = Self {
        opacity: 0.0,
        offset: Vec2::ZERO,
        interactive: false,
    };
}

/// Owner of [`RevealState`]. Every handler checks the current state first, so
/// duplicate or late triggers (a fallback after the milestone, a second
/// completion) are no-ops.
#[derive(Debug)]
pub struct RevealCoordinator {
    config: RevealConfig,
    device: DeviceClass,
    state: RevealState,
    transitions: Vec<Transition>,
    mounted_at: Option<Millis>,
    peaked_at: Option<Millis>,
    scroll_y: f64,
    hero_scroll: ScrollFade,
    scene_scroll: ScrollFade,
    signal: RevealSignal,
    scope: Scope<RevealTimer>,
}

impl RevealCoordinator {
    /// Coordinator in [`RevealState::Hidden`].
    pub fn new(
        config: RevealConfig,
        scroll: &ScrollConfig,
        device: DeviceClass,
        viewport: Viewport,
        signal: RevealSignal,
    ) -> Self {
        let trigger = ScrollTrigger::for_container(0.0, viewport.height, scroll.end_fraction);
        let hero = scroll.hero_for(device);
        let hero_scroll = ScrollFade {
            trigger,
            count: config.hero_layers_for(device),
            stagger: hero.stagger,
            child_duration: scroll.child_duration,
            travel: hero.travel,
            ease: scroll.ease,
        };
        let scene_scroll = ScrollFade {
            trigger,
            count: 1,
            stagger: 0.0,
            child_duration: scroll.child_duration,
            travel: scroll.scene_travel,
            ease: scroll.ease,
        };
        Self {
            config,
            device,
            state: RevealState::Hidden,
            transitions: Vec::new(),
            mounted_at: None,
            peaked_at: None,
            scroll_y: 0.0,
            hero_scroll,
            scene_scroll,
            signal,
            scope: Scope::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Every transition so far, oldest first.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Instant content was mounted.
    pub fn mounted_at(&self) -> Option<Millis> {
        self.mounted_at
    }

    /// Instant the peak was reached.
    pub fn peaked_at(&self) -> Option<Millis> {
        self.peaked_at
    }

    /// Whether the peak fallback is still armed.
    pub fn fallback_armed(&self) -> bool {
        self.scope.holds(RevealTimer::PeakFallback)
    }

    fn step(&mut self, to: RevealState, cause: Cause, now: Millis) {
        let from = self.state;
        debug_assert_eq!(from.next(), Some(to), "reveal must advance one step");
        self.state = to;
        self.transitions.push(Transition {
            at: now,
            from,
            to,
            cause,
        });
        tracing::info!(%now, ?from, ?to, ?cause, "reveal transition");
    }

    /// Loading gate completed: mount content, start the background fade and
    /// arm the peak fallback.
    pub fn on_gate_complete<E>(&mut self, completion: Completion, sched: &Scheduler<E>) -> bool
    where
        E: From<RevealTimer> + 'static,
    {
        let now = sched.now();
        if self.state != RevealState::Hidden {
            tracing::debug!(%now, state = ?self.state, "gate completion ignored");
            return false;
        }
        let cause = match completion {
            Completion::Loaded => Cause::Loaded,
            Completion::Forced => Cause::LoadForced,
        };
        self.step(RevealState::ContentMounted, cause, now);
        self.mounted_at = Some(now);

        let fallback = self.config.fallback_for(self.device);
        self.scope.hold(
            RevealTimer::PeakFallback,
            sched.after(fallback, RevealTimer::PeakFallback.into()),
        );
        true
    }

    /// Peak milestone from the sequencer.
    pub fn on_milestone<E>(&mut self, sched: &Scheduler<E>) -> bool
    where
        E: From<RevealTimer> + 'static,
    {
        self.peak(Cause::Milestone, sched.now())
    }

    /// Handle one of the coordinator's own timers.
    pub fn on_timer<E>(&mut self, timer: RevealTimer, sched: &Scheduler<E>) -> bool
    where
        E: From<RevealTimer> + 'static,
    {
        let now = sched.now();
        match timer {
            RevealTimer::PeakFallback => {
                self.scope.disarm(RevealTimer::PeakFallback);
                if self.state == RevealState::ContentMounted {
                    tracing::warn!(%now, device = ?self.device, "peak milestone missing, revealing anyway");
                }
                self.peak(Cause::Fallback, now)
            }
        }
    }

    fn peak(&mut self, cause: Cause, now: Millis) -> bool {
        if self.state != RevealState::ContentMounted {
            tracing::debug!(%now, state = ?self.state, ?cause, "peak trigger ignored");
            return false;
        }
        self.scope.disarm(RevealTimer::PeakFallback);
        self.step(RevealState::Peaked, cause, now);
        self.peaked_at = Some(now);
        self.signal.raise(now);
        self.step(RevealState::ScrollLinked, Cause::Continuation, now);
        true
    }

    /// Latest scroll offset. Only affects styles once scroll-linked.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Number of hero children for this device.
    pub fn hero_count(&self) -> u32 {
        self.hero_scroll.count
    }

    /// All layers for this device, back to front.
    pub fn layers(&self) -> Vec<Layer> {
        let mut out = vec![Layer::Background, Layer::Scene];
        out.extend((0..self.hero_count()).map(Layer::Hero));
        out.push(Layer::Showcase);
        out
    }

    fn scroll_sample(&self, fade: &ScrollFade, index: u32) -> ScrollSample {
        if self.state == RevealState::ScrollLinked {
            fade.sample(index, self.scroll_y)
        } else {
            ScrollSample::IDENTITY
        }
    }

    fn content_fade(&self, now: Millis) -> f64 {
        self.peaked_at.map_or(0.0, |at| {
            Fade::fade_in(at, self.config.content_fade, Ease::InOutSine).sample(now)
        })
    }

    /// Style of `layer` at `now`. `None` for a hero index this device lacks.
    pub fn layer_style(&self, layer: Layer, now: Millis) -> Option<LayerStyle> {
        let style = match layer {
            Layer::Background => match self.mounted_at {
                Some(at) => LayerStyle {
                    opacity: Fade::fade_in(at, self.config.background_fade, Ease::InOutSine)
                        .sample(now),
                    ..LayerStyle::HIDDEN
                },
                None => LayerStyle::HIDDEN,
            },
            Layer::Scene => {
                if self.mounted_at.is_none() {
                    return Some(LayerStyle::HIDDEN);
                }
                let base = match (self.device, self.peaked_at) {
                    (DeviceClass::Desktop, _) => 1.0,
                    (DeviceClass::Mobile, Some(at)) => {
                        Fade::fade_in(at, self.config.scene_fade, Ease::InOutSine).sample(now)
                    }
                    (DeviceClass::Mobile, None) => 0.0,
                };
                let s = self.scroll_sample(&self.scene_scroll, 0);
                LayerStyle {
                    opacity: base * s.opacity,
                    offset: s.offset,
                    interactive: true,
                }
            }
            Layer::Hero(i) => {
                if i >= self.hero_count() {
                    return None;
                }
                let s = self.scroll_sample(&self.hero_scroll, i);
                LayerStyle {
                    opacity: self.content_fade(now) * s.opacity,
                    offset: s.offset,
                    interactive: false,
                }
            }
            Layer::Showcase => LayerStyle {
                opacity: self.content_fade(now),
                offset: Vec2::ZERO,
                interactive: self.state.is_revealed(),
            },
        };
        Some(style)
    }

    /// Letters of the wordmark shown at `now`.
    pub fn wordmark_letters(&self, now: Millis) -> usize {
        let Some(at) = self.peaked_at else {
            return 0;
        };
        let wordmark = &self.config.wordmark;
        let total = wordmark.text.chars().count();
        let fade = Fade {
            start: at.after(wordmark.delay),
            duration: wordmark.duration,
            from: 0.0,
            to: total as f64,
            ease: Ease::Linear,
        };
        (fade.sample(now).round() as usize).min(total)
    }

    /// Wordmark prefix shown at `now`.
    pub fn wordmark(&self, now: Millis) -> String {
        self.config
            .wordmark
            .text
            .chars()
            .take(self.wordmark_letters(now))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/coordinator.rs"]
mod tests;
