use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CurtainError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CurtainError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(
        CurtainError::scenario("x")
            .to_string()
            .contains("scenario error:")
    );
    assert!(
        CurtainError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CurtainError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: CurtainError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, CurtainError::Serde(_)));
}
