use super::*;

#[test]
fn publish_bumps_sequence_and_replaces_frame() {
    let tap = FrameTap::new();
    assert!(tap.latest().is_none());
    assert_eq!(tap.publish(FrameRGBA::blank(2, 2)), 1);
    assert_eq!(tap.publish(FrameRGBA::blank(4, 4)), 2);
    let (seq, frame) = tap.latest().unwrap();
    assert_eq!(seq, 2);
    assert_eq!(frame.width, 4);
}

#[test]
fn readers_keep_their_frame_after_a_swap() {
    let tap = FrameTap::new();
    tap.publish(FrameRGBA::blank(2, 2));
    let (_, held) = tap.latest().unwrap();
    tap.publish(FrameRGBA::blank(8, 8));
    assert_eq!(held.width, 2);
}

#[test]
fn wait_newer_times_out_without_publisher() {
    let tap = FrameTap::new();
    assert!(tap.wait_newer(0, Duration::from_millis(10)).is_none());
}

#[test]
fn wait_newer_wakes_on_publish() {
    let tap = FrameTap::new();
    let writer = tap.clone();
    let t = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        writer.publish(FrameRGBA::blank(3, 3));
    });
    let (seq, frame) = tap.wait_newer(0, Duration::from_secs(5)).unwrap();
    assert_eq!(seq, 1);
    assert_eq!(frame.height, 3);
    t.join().unwrap();
}

#[test]
fn clear_keeps_the_sequence() {
    let tap = FrameTap::new();
    tap.publish(FrameRGBA::blank(1, 1));
    tap.clear();
    assert!(tap.latest().is_none());
    assert_eq!(tap.seq(), 1);
}
