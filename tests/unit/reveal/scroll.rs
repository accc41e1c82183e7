use super::*;

fn hero() -> ScrollFade {
    ScrollFade {
        trigger: ScrollTrigger::for_container(0.0, 1000.0, 0.4),
        count: 4,
        stagger: 0.1,
        child_duration: 0.5,
        travel: -100.0,
        ease: Ease::OutQuad,
    }
}

#[test]
fn trigger_progress_clamps() {
    let t = ScrollTrigger::new(100.0, 300.0).unwrap();
    assert_eq!(t.progress(0.0), 0.0);
    assert_eq!(t.progress(200.0), 0.5);
    assert_eq!(t.progress(10_000.0), 1.0);
    assert_eq!(t.progress(f64::NAN), 0.0);
    assert!(ScrollTrigger::new(5.0, 5.0).is_err());
}

#[test]
fn container_trigger_spans_the_fraction() {
    let t = ScrollTrigger::for_container(0.0, 900.0, 0.4);
    assert_eq!(t.start, 0.0);
    assert_eq!(t.end, 360.0);
}

#[test]
fn children_are_staggered() {
    let fade = hero();
    assert!((fade.span() - 0.8).abs() < 1e-12);

    // Scroll 200 of 400 => head at 0.4 scrub units.
    let first = fade.child_progress(0, 200.0);
    let last = fade.child_progress(3, 200.0);
    assert!((first - 0.8).abs() < 1e-9);
    assert!((last - 0.2).abs() < 1e-9);

    for i in 0..4 {
        assert_eq!(fade.child_progress(i, 400.0), 1.0);
        assert_eq!(fade.child_progress(i, 0.0), 0.0);
    }
}

#[test]
fn full_scroll_hides_and_lifts() {
    let s = hero().sample(2, 1_000.0);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.offset, Vec2::new(0.0, -100.0));
    assert_eq!(hero().sample(2, 0.0), ScrollSample::IDENTITY);
}

#[test]
fn scrolling_back_restores_bit_for_bit() {
    let fade = hero();
    let before: Vec<_> = (0..4).map(|i| fade.sample(i, 37.5)).collect();
    for y in [120.0, 399.0, 5_000.0, 0.0, 37.5] {
        let _ = (0..4).map(|i| fade.sample(i, y)).count();
    }
    let after: Vec<_> = (0..4).map(|i| fade.sample(i, 37.5)).collect();
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.opacity.to_bits(), b.opacity.to_bits());
        assert_eq!(a.offset.y.to_bits(), b.offset.y.to_bits());
    }
}
