use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        container: VideoContainer::Mp4,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    assert!(cfg(700, 700, 30).validate().is_ok());
}

#[test]
fn containers_name_their_files() {
    assert_eq!(VideoContainer::Mp4.extension(), "mp4");
    assert_eq!(VideoContainer::Webm.mime(), "video/webm");
    let parsed: VideoContainer = serde_json::from_str("\"webm\"").unwrap();
    assert_eq!(parsed, VideoContainer::Webm);
}

#[test]
fn temp_file_is_removed_on_drop() {
    let tmp = TempFile::new("bin");
    std::fs::write(tmp.path(), b"x").unwrap();
    let path = tmp.path().to_path_buf();
    drop(tmp);
    assert!(!path.exists());
}

#[test]
fn encodes_a_short_clip_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let mut sink = Box::new(FfmpegSink::new(cfg(16, 16, 30), [0, 0, 0, 255]).unwrap());
    let out = sink.out.path().to_path_buf();
    for _ in 0..3 {
        sink.push(&FrameRGBA::blank(16, 16)).unwrap();
    }
    assert_eq!(sink.frames(), 3);
    let bytes = sink.finish().unwrap();
    assert!(!bytes.is_empty());
    assert!(!out.exists());
}

#[test]
fn wrong_frame_size_is_an_encode_error() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let mut sink = FfmpegSink::new(cfg(16, 16, 30), [0, 0, 0, 255]).unwrap();
    let out = sink.out.path().to_path_buf();
    assert!(matches!(
        sink.push(&FrameRGBA::blank(8, 8)),
        Err(MicrocosmError::Encode(_))
    ));
    drop(sink);
    assert!(!out.exists());
}
