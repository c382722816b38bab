use super::*;
use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

fn solid(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn downsample_halves_and_floors() {
    let small = downsample_2x(&FrameRGBA::blank(7, 5)).unwrap();
    assert_eq!((small.width, small.height), (3, 2));
    assert!(downsample_2x(&FrameRGBA::blank(1, 8)).is_err());
}

#[test]
fn downsample_averages_blocks() {
    let mut frame = FrameRGBA::blank(2, 2);
    frame.data = vec![
        0, 0, 0, 255, 255, 255, 255, 255, //
        0, 0, 0, 255, 255, 255, 255, 255,
    ];
    let small = downsample_2x(&frame).unwrap();
    assert_eq!(small.data, vec![128, 128, 128, 255]);
}

#[test]
fn transparent_frame_indexes_to_the_background() {
    let indexed = index_frame(&FrameRGBA::blank(8, 8), [1, 2, 3, 255]).unwrap();
    assert_eq!((indexed.width, indexed.height), (4, 4));
    assert_eq!(indexed.palette.colors(), &[[1, 2, 3]]);
    assert!(indexed.indices.iter().all(|i| *i == 0));
}

#[test]
fn finish_writes_a_looping_gif() {
    let mut sink = Box::new(GifSink::new(15, [0, 0, 0, 255]).unwrap());
    sink.push(&solid(8, 8, [255, 0, 0, 255])).unwrap();
    sink.push(&solid(8, 8, [0, 0, 255, 255])).unwrap();
    assert_eq!(sink.frames(), 2);
    let bytes = sink.finish().unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");

    let frames = GifDecoder::new(std::io::Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buffer().dimensions(), (4, 4));
    assert_eq!(frames[0].buffer().get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn size_change_mid_capture_is_rejected() {
    let mut sink = GifSink::new(15, [0, 0, 0, 255]).unwrap();
    sink.push(&FrameRGBA::blank(8, 8)).unwrap();
    assert!(matches!(
        sink.push(&FrameRGBA::blank(16, 16)),
        Err(MicrocosmError::Encode(_))
    ));
}

#[test]
fn empty_gif_is_an_error() {
    let sink = Box::new(GifSink::new(15, [0, 0, 0, 255]).unwrap());
    assert!(sink.finish().is_err());
    assert!(GifSink::new(0, [0, 0, 0, 255]).is_err());
}

#[test]
fn indexing_a_frame_is_reproducible() {
    let (w, h) = (120u32, 80u32);
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x * 2) as u8, (y * 3) as u8, ((x ^ y) * 5) as u8, 255]);
        }
    }
    let frame = FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: true,
    };
    let first = index_frame(&frame, [255, 255, 255, 255]).unwrap();
    assert!(first.palette.len() > 200);
    for _ in 0..5 {
        assert_eq!(index_frame(&frame, [255, 255, 255, 255]).unwrap(), first);
    }
}
