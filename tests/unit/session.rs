use super::*;
use crate::peak::host::RecordingHost;

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn mobile() -> Viewport {
    Viewport::new(390.0, 844.0).unwrap()
}

fn mount(viewport: Viewport) -> (Session, RecordingHost) {
    let host = RecordingHost::new();
    let session = Session::mount(
        SessionConfig::default(),
        viewport,
        Box::new(host.clone()),
        RevealSignal::new(),
    )
    .unwrap();
    (session, host)
}

#[test]
fn mount_classifies_device_and_arms_valve() {
    let (s, _) = mount(desktop());
    assert_eq!(s.device(), DeviceClass::Desktop);
    assert_eq!(s.armed_timers(), 1);
    assert_eq!(s.next_deadline(), Some(Millis(8000)));
    assert!(s.loading_visible());
    assert_eq!(mount(mobile()).0.device(), DeviceClass::Mobile);
}

#[test]
fn sequencer_waits_for_both_mount_and_scene() {
    let (mut s, host) = mount(desktop());
    s.scene_ready();
    assert_eq!(s.milestones().sequencer_started, None);
    assert!(host.log().poses.is_empty());

    s.report_progress(100.0);
    s.advance_to(Millis(1000));
    assert_eq!(s.reveal_state(), RevealState::ContentMounted);
    assert_eq!(s.milestones().sequencer_started, Some(Millis(1000)));
    assert!(!host.is_interactive());
}

#[test]
fn desktop_flow_reveals_on_milestone() {
    let (mut s, host) = mount(desktop());
    s.report_progress(100.0);
    s.advance_to(Millis(1000));
    s.scene_ready();
    s.advance_to(Millis(20_000));

    let m = s.milestones();
    assert_eq!(m.gate_completed, Some((Millis(1000), Completion::Loaded)));
    assert_eq!(m.milestone, Some(Millis(3500)));
    assert_eq!(m.unlocked, Some(Millis(5500)));
    assert_eq!(m.loading_removed, Some(Millis(7000)));
    assert_eq!(s.signal().revealed_at(), Some(Millis(3500)));
    assert_eq!(s.reveal_state(), RevealState::ScrollLinked);
    assert!(host.is_interactive());
    assert!(!s.loading_visible());
    assert_eq!(s.armed_timers(), 0);
}

#[test]
fn mobile_milestone_is_immediate() {
    let (mut s, host) = mount(mobile());
    s.scene_ready();
    s.report_progress(100.0);
    s.advance_to(Millis(1000));
    assert_eq!(s.milestones().milestone, Some(Millis(1000)));
    assert_eq!(s.reveal_state(), RevealState::ScrollLinked);
    assert!(host.is_interactive());
}

#[test]
fn frame_pushes_pose_to_host() {
    let (mut s, host) = mount(desktop());
    assert_eq!(s.frame(), None);
    s.scene_ready();
    s.report_progress(100.0);
    s.advance_to(Millis(2000));
    let pose = s.frame().unwrap();
    assert_eq!(host.last_pose(), Some(pose));
}

#[test]
fn progress_after_removal_is_ignored() {
    let (mut s, _) = mount(desktop());
    s.advance_to(Millis(20_000));
    assert!(!s.loading_visible());
    s.report_progress(100.0);
    assert!(s.loading().is_none());
    assert_eq!(s.loading_opacity(), 0.0);
}

#[test]
fn unmount_leaves_nothing_armed() {
    let (mut s, _) = mount(desktop());
    s.report_progress(100.0);
    s.scene_ready();
    s.advance_to(Millis(1500));
    assert!(s.armed_timers() > 0);
    assert_eq!(s.unmount(), 0);
}
