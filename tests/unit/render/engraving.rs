use super::*;

#[test]
fn engraving_is_truncated_to_twenty_chars() {
    let e = Engraving::new("A very long engraving that keeps going");
    assert_eq!(e.as_str().chars().count(), MAX_ENGRAVING_CHARS);
    assert_eq!(Engraving::new("Zen Garden").as_str(), "Zen Garden");
}

#[test]
fn truncation_respects_char_boundaries() {
    let e = Engraving::new("雪".repeat(30));
    assert_eq!(e.as_str().chars().count(), MAX_ENGRAVING_CHARS);
}

#[test]
fn engraving_deserializes_bounded() {
    let e: Engraving = serde_json::from_str("\"012345678901234567890123\"").unwrap();
    assert_eq!(e.as_str(), "01234567890123456789");
}

#[test]
fn svg_escapes_markup() {
    let svg = label_svg("Tom & <Jerry>", Rgba8::hex(0xfbbf24));
    assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
    assert!(svg.contains("fill=\"#fbbf24\""));
}

#[test]
fn shadow_adds_coverage_under_transparent_pixels() {
    let (w, h) = (8u32, 8u32);
    let mut text = vec![0u8; 8 * 8 * 4];
    let i = (3 * 8 + 3) * 4;
    text[i..i + 4].copy_from_slice(&[251, 191, 36, 255]);
    let out = with_drop_shadow(&text, w, h).unwrap();
    assert_eq!(&out[i..i + 4], &[251, 191, 36, 255]);
    let below = ((4 * 8 + 4) * 4) + 3;
    assert!(out[below] > 0);
    assert_eq!(out[0], 0);
}

#[test]
fn empty_text_yields_no_label() {
    let mut engraver = Engraver::new();
    assert!(engraver.label(&Engraving::new("   "), Rgba8::WHITE).is_none());
}
