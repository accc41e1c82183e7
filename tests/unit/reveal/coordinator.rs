use super::*;

fn coordinator(device: DeviceClass) -> (RevealCoordinator, Scheduler<RevealTimer>, RevealSignal) {
    let signal = RevealSignal::new();
    let coord = RevealCoordinator::new(
        RevealConfig::default(),
        &ScrollConfig::default(),
        device,
        Viewport::new(1440.0, 1000.0).unwrap(),
        signal.clone(),
    );
    (coord, Scheduler::new(), signal)
}

fn drain(coord: &mut RevealCoordinator, sched: &Scheduler<RevealTimer>, until: Millis) {
    while let Some((_, timer)) = sched.pop_due(until) {
        coord.on_timer(timer, sched);
    }
    sched.advance(until);
}

fn states(coord: &RevealCoordinator) -> Vec<RevealState> {
    coord.transitions().iter().map(|t| t.to).collect()
}

#[test]
fn milestone_before_mount_is_ignored() {
    let (mut coord, sched, signal) = coordinator(DeviceClass::Desktop);
    assert!(!coord.on_milestone(&sched));
    assert_eq!(coord.state(), RevealState::Hidden);
    assert!(!signal.is_revealed());
}

#[test]
fn milestone_reveals_and_disarms_fallback() {
    let (mut coord, sched, signal) = coordinator(DeviceClass::Desktop);
    assert!(coord.on_gate_complete(Completion::Loaded, &sched));
    assert!(coord.fallback_armed());

    drain(&mut coord, &sched, Millis(2500));
    assert!(coord.on_milestone(&sched));
    assert!(!coord.fallback_armed());
    assert_eq!(sched.pending(), 0);
    assert_eq!(coord.peaked_at(), Some(Millis(2500)));
    assert_eq!(signal.revealed_at(), Some(Millis(2500)));
    assert_eq!(
        states(&coord),
        vec![
            RevealState::ContentMounted,
            RevealState::Peaked,
            RevealState::ScrollLinked
        ]
    );

    drain(&mut coord, &sched, Millis(60_000));
    assert_eq!(coord.transitions().len(), 3);
}

#[test]
fn fallback_reveals_when_milestone_is_missing() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Desktop);
    coord.on_gate_complete(Completion::Forced, &sched);
    drain(&mut coord, &sched, Millis(4999));
    assert_eq!(coord.state(), RevealState::ContentMounted);
    drain(&mut coord, &sched, Millis(60_000));
    assert_eq!(coord.state(), RevealState::ScrollLinked);
    assert_eq!(coord.peaked_at(), Some(Millis(5000)));
    assert_eq!(coord.transitions()[0].cause, Cause::LoadForced);
    assert_eq!(coord.transitions()[1].cause, Cause::Fallback);

    assert!(!coord.on_milestone(&sched));
    assert_eq!(coord.transitions().len(), 3);
}

#[test]
fn mobile_fallback_is_shorter() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Mobile);
    coord.on_gate_complete(Completion::Loaded, &sched);
    drain(&mut coord, &sched, Millis(60_000));
    assert_eq!(coord.peaked_at(), Some(Millis(2000)));
}

#[test]
fn second_gate_completion_is_ignored() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Desktop);
    assert!(coord.on_gate_complete(Completion::Loaded, &sched));
    assert!(!coord.on_gate_complete(Completion::Forced, &sched));
    assert_eq!(coord.transitions().len(), 1);
}

#[test]
fn background_fades_from_mount_content_from_peak() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Desktop);
    let bg = |c: &RevealCoordinator, t| c.layer_style(Layer::Background, Millis(t)).unwrap();
    let hero = |c: &RevealCoordinator, t| c.layer_style(Layer::Hero(0), Millis(t)).unwrap();

    assert_eq!(bg(&coord, 0).opacity, 0.0);
    coord.on_gate_complete(Completion::Loaded, &sched);
    assert!((bg(&coord, 1000).opacity - 0.5).abs() < 1e-9);
    assert_eq!(bg(&coord, 2000).opacity, 1.0);
    assert_eq!(hero(&coord, 2000).opacity, 0.0);

    sched.advance(Millis(3000));
    coord.on_milestone(&sched);
    assert_eq!(hero(&coord, 3000).opacity, 0.0);
    assert_eq!(hero(&coord, 4500).opacity, 1.0);
    assert!(
        coord
            .layer_style(Layer::Showcase, Millis(3000))
            .unwrap()
            .interactive
    );
}

#[test]
fn scene_layer_depends_on_device() {
    let (mut desk, sched, _) = coordinator(DeviceClass::Desktop);
    desk.on_gate_complete(Completion::Loaded, &sched);
    assert_eq!(desk.layer_style(Layer::Scene, Millis(0)).unwrap().opacity, 1.0);

    let (mut mob, sched, _) = coordinator(DeviceClass::Mobile);
    mob.on_gate_complete(Completion::Loaded, &sched);
    assert_eq!(mob.layer_style(Layer::Scene, Millis(0)).unwrap().opacity, 0.0);
    mob.on_milestone(&sched);
    assert_eq!(mob.layer_style(Layer::Scene, Millis(800)).unwrap().opacity, 1.0);
}

#[test]
fn scroll_drives_layers_only_once_linked() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Desktop);
    coord.on_gate_complete(Completion::Loaded, &sched);
    coord.on_scroll(400.0);
    let scene = coord.layer_style(Layer::Scene, Millis(0)).unwrap();
    assert_eq!(scene.opacity, 1.0);
    assert_eq!(scene.offset, Vec2::ZERO);

    coord.on_milestone(&sched);
    let later = Millis(10_000);
    let scene = coord.layer_style(Layer::Scene, later).unwrap();
    assert_eq!(scene.opacity, 0.0);
    assert_eq!(scene.offset, Vec2::new(0.0, -100.0));

    coord.on_scroll(0.0);
    let scene = coord.layer_style(Layer::Scene, later).unwrap();
    assert_eq!(scene.opacity, 1.0);
}

#[test]
fn layer_styles_are_reversible_in_scroll() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Desktop);
    coord.on_gate_complete(Completion::Loaded, &sched);
    coord.on_milestone(&sched);
    let later = Millis(10_000);

    let snapshot = |c: &RevealCoordinator| -> Vec<(u64, u64)> {
        c.layers()
            .into_iter()
            .map(|l| {
                let s = c.layer_style(l, later).unwrap();
                (s.opacity.to_bits(), s.offset.y.to_bits())
            })
            .collect()
    };
    let before = snapshot(&coord);
    for y in [50.0, 250.0, 9_999.0] {
        coord.on_scroll(y);
        assert_ne!(snapshot(&coord), before);
    }
    coord.on_scroll(0.0);
    assert_eq!(snapshot(&coord), before);
}

#[test]
fn hero_layers_follow_device() {
    let (desk, _, _) = coordinator(DeviceClass::Desktop);
    let (mob, _, _) = coordinator(DeviceClass::Mobile);
    assert_eq!(desk.layers().len(), 7);
    assert_eq!(mob.layers().len(), 6);
    assert!(mob.layer_style(Layer::Hero(3), Millis(0)).is_none());
}

#[test]
fn wordmark_types_after_the_peak() {
    let (mut coord, sched, _) = coordinator(DeviceClass::Desktop);
    coord.on_gate_complete(Completion::Loaded, &sched);
    assert_eq!(coord.wordmark_letters(Millis(0)), 0);
    sched.advance(Millis(1000));
    coord.on_milestone(&sched);

    assert_eq!(coord.wordmark(Millis(1500)), "");
    assert_eq!(coord.wordmark_letters(Millis(1500 + 750)), 4);
    assert_eq!(coord.wordmark(Millis(1500 + 1500)), "AGNITUS");
    assert_eq!(coord.wordmark_letters(Millis(99_000)), 7);
}
