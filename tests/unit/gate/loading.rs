use super::*;

fn run_until(
    gate: &mut LoadingGate,
    sched: &Scheduler<GateTimer>,
    until: Millis,
) -> Vec<(Millis, GateOutput)> {
    let mut out = Vec::new();
    while let Some((at, timer)) = sched.pop_due(until) {
        if let Some(o) = gate.on_timer(timer, sched) {
            out.push((at, o));
        }
    }
    sched.advance(until);
    out
}

fn completions(out: &[(Millis, GateOutput)]) -> Vec<(Millis, Completion)> {
    out.iter()
        .filter_map(|(at, o)| match o {
            GateOutput::Complete(c) => Some((*at, *c)),
            GateOutput::Removed => None,
        })
        .collect()
}

#[test]
fn completes_after_grace_once_loaded() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);

    for (at, p) in [(0, 0.0), (300, 30.0), (600, 70.0), (900, 100.0)] {
        run_until(&mut gate, &sched, Millis(at));
        gate.observe_progress(p, &sched);
    }
    assert!(gate.session().completed);
    assert!(gate.session().exiting);

    let early = run_until(&mut gate, &sched, Millis(1899));
    assert!(completions(&early).is_empty());

    let out = run_until(&mut gate, &sched, Millis(20_000));
    assert_eq!(completions(&out), vec![(Millis(1900), Completion::Loaded)]);
    assert!(out.contains(&(Millis(7900), GateOutput::Removed)));
}

#[test]
fn stalled_progress_is_forced_at_the_deadline() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);
    gate.observe_progress(70.0, &sched);

    assert!(completions(&run_until(&mut gate, &sched, Millis(7999))).is_empty());
    let out = run_until(&mut gate, &sched, Millis(30_000));
    assert_eq!(completions(&out), vec![(Millis(8000), Completion::Forced)]);
    assert!(Completion::Forced.is_degraded());
    assert_eq!(gate.completion(), Some((Millis(8000), Completion::Forced)));
}

#[test]
fn progress_at_the_deadline_still_completes_once() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);

    let mut out = run_until(&mut gate, &sched, Millis(8000));
    gate.observe_progress(100.0, &sched);
    out.extend(run_until(&mut gate, &sched, Millis(30_000)));

    assert_eq!(completions(&out).len(), 1);
    assert_eq!(completions(&out)[0].0, Millis(8000));
}

#[test]
fn loading_just_before_the_deadline_disarms_the_valve() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);
    run_until(&mut gate, &sched, Millis(7500));
    gate.observe_progress(100.0, &sched);

    let out = run_until(&mut gate, &sched, Millis(30_000));
    assert_eq!(completions(&out), vec![(Millis(8500), Completion::Loaded)]);
}

#[test]
fn removal_follows_completion_by_the_buffer() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);
    gate.observe_progress(100.0, &sched);
    let out = run_until(&mut gate, &sched, Millis(30_000));
    assert_eq!(
        out,
        vec![
            (Millis(1000), GateOutput::Complete(Completion::Loaded)),
            (Millis(7000), GateOutput::Removed),
        ]
    );
    assert_eq!(gate.armed_timers(), 0);
}

#[test]
fn dropping_the_gate_cancels_its_timers() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);
    gate.observe_progress(100.0, &sched);
    assert_eq!(sched.pending(), 1);
    drop(gate);
    assert_eq!(sched.pending(), 0);
}

#[test]
fn indicator_tracks_progress_and_fades_on_exit() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);

    gate.observe_progress(0.0, &sched);
    assert_eq!(gate.session().fill_offset(), INDICATOR_HEIGHT);
    assert_eq!(gate.indicator_opacity(Millis(0)), 1.0);

    gate.observe_progress(49.6, &sched);
    assert_eq!(gate.session().displayed_percent(), 50);

    gate.observe_progress(250.0, &sched);
    assert_eq!(gate.session().progress, 100.0);
    assert_eq!(gate.session().fill_offset(), -INDICATOR_OVERSHOOT);

    assert_eq!(gate.indicator_opacity(Millis(0)), 1.0);
    assert_eq!(gate.indicator_opacity(Millis(1000)), 0.0);
}

#[test]
fn nan_progress_counts_as_zero() {
    let sched = Scheduler::<GateTimer>::new();
    let mut gate = LoadingGate::mount(GateConfig::default(), &sched);
    gate.observe_progress(f64::NAN, &sched);
    assert_eq!(gate.session().progress, 0.0);
    assert!(!gate.session().completed);
}
