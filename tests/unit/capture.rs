use super::*;
use crate::render::backend::FrameRGBA;

#[test]
fn default_formats_match_their_frame_counts() {
    assert_eq!(CaptureFormat::gif().frame_count(), 45);
    assert_eq!(CaptureFormat::video(VideoContainer::Mp4).frame_count(), 150);
    let odd = CaptureFormat::Gif {
        fps: 15,
        duration: Duration::from_millis(1_050),
    };
    assert_eq!(odd.frame_count(), 15);
}

#[test]
fn artifact_names_encode_the_scene() {
    assert_eq!(
        artifact_name(SceneKind::Aquarium, CaptureFormat::gif()),
        "magic-globe-fish.gif"
    );
    assert_eq!(
        artifact_name(SceneKind::Winter, CaptureFormat::video(VideoContainer::Webm)),
        "magic-globe-winter.webm"
    );
    assert_eq!(CaptureFormat::video(VideoContainer::Mp4).mime(), "video/mp4");
}

#[test]
fn recorder_refuses_a_second_capture() {
    let rec = Recorder::new();
    let guard = rec.try_start().unwrap();
    assert!(rec.is_recording());
    assert!(matches!(rec.try_start(), Err(MicrocosmError::Capture(_))));
    drop(guard);
    assert!(!rec.is_recording());
    assert!(rec.try_start().is_ok());
}

#[test]
fn zero_length_capture_is_invalid() {
    let f = CaptureFormat::Gif {
        fps: 15,
        duration: Duration::from_millis(10),
    };
    assert!(f.validate().is_err());
}

#[test]
fn missing_surface_fails_fast_and_clears_the_flag() {
    let capturer = Capturer::new()
        .with_pacer(Pacer::NoWait)
        .with_first_frame_timeout(Duration::from_millis(10));
    let err = capturer
        .capture(&FrameTap::new(), SceneKind::Winter, CaptureFormat::gif())
        .unwrap_err();
    assert!(matches!(err, MicrocosmError::Surface(_)));
    assert!(!capturer.recorder().is_recording());
}

#[test]
fn encoder_failure_clears_the_flag() {
    let tap = FrameTap::new();
    // A 1-pixel-wide surface cannot be downsampled.
    tap.publish(FrameRGBA::blank(1, 8));
    let capturer = Capturer::new().with_pacer(Pacer::NoWait);
    assert!(
        capturer
            .capture(&tap, SceneKind::Rain, CaptureFormat::gif())
            .is_err()
    );
    assert!(!capturer.recorder().is_recording());
}

#[test]
fn gif_capture_samples_the_tap() {
    let tap = FrameTap::new();
    tap.publish(FrameRGBA::blank(20, 20));
    let capturer = Capturer::new()
        .with_pacer(Pacer::NoWait)
        .with_background(Rgba8::BLACK);
    let short = CaptureFormat::Gif {
        fps: 10,
        duration: Duration::from_millis(500),
    };
    let art = capturer.capture(&tap, SceneKind::Bamboo, short).unwrap();
    assert_eq!(art.frames, 5);
    assert_eq!(art.mime, "image/gif");
    assert_eq!(art.file_name, "magic-globe-bamboo.gif");
    assert_eq!(&art.bytes[..6], b"GIF89a");
}
