use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MicrocosmError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MicrocosmError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        MicrocosmError::capture("x")
            .to_string()
            .contains("capture error:")
    );
    assert!(
        MicrocosmError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        MicrocosmError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MicrocosmError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
