use super::*;

#[test]
fn fps_counts_whole_frames() {
    let fps = Fps::whole(15).unwrap();
    assert_eq!(fps.frames_in_millis(3000), 45);
    let fps = Fps::whole(30).unwrap();
    assert_eq!(fps.frames_in_millis(5000), 150);
    assert_eq!(fps.frames_in_millis(10), 0);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn hex_parse_accepts_both_lengths() {
    assert_eq!(
        Rgba8::parse_hex("#0f172a").unwrap(),
        Rgba8::rgb(0x0f, 0x17, 0x2a)
    );
    assert_eq!(
        Rgba8::parse_hex("FBBF2480").unwrap(),
        Rgba8 {
            r: 0xfb,
            g: 0xbf,
            b: 0x24,
            a: 0x80
        }
    );
    assert!(Rgba8::parse_hex("#12345").is_err());
    assert!(Rgba8::parse_hex("#zzzzzz").is_err());
}

#[test]
fn hex_literal_matches_parse() {
    assert_eq!(Rgba8::hex(0x78350f), Rgba8::parse_hex("#78350f").unwrap());
    assert_eq!(Rgba8::hex(0x78350f).to_hex(), "#78350f");
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#fbbf24\"").unwrap();
    assert_eq!(c, Rgba8::hex(0xfbbf24));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#fbbf24\"");
}

#[test]
fn fade_and_alpha_clamp() {
    let c = Rgba8::WHITE.with_alpha(2.0);
    assert_eq!(c.a, 255);
    assert_eq!(Rgba8::WHITE.with_alpha(0.5).fade(0.5).a, 64);
}

#[test]
fn globe_canvas_center() {
    let c = Canvas::globe();
    assert_eq!(c.center(), Point::new(350.0, 350.0));
}
