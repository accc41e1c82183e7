use super::*;

#[test]
fn first_raise_wins_and_clones_share() {
    let signal = RevealSignal::new();
    let header = signal.clone();
    assert!(!header.is_revealed());

    assert!(signal.raise(Millis(2500)));
    assert!(!signal.raise(Millis(5000)));
    assert_eq!(header.revealed_at(), Some(Millis(2500)));
}
