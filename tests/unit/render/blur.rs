use super::*;

#[test]
fn radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4];
    assert_eq!(blur_mask(&src, 2, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_mask_is_unchanged() {
    let src = vec![90u8; 6 * 4];
    assert_eq!(blur_mask(&src, 6, 4, 3, 2.0).unwrap(), src);
}

#[test]
fn single_sample_spreads_and_keeps_energy() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; 25];
    src[12] = 255;
    let out = blur_mask(&src, w, h, 2, 1.2).unwrap();
    assert!(out.iter().filter(|&&a| a != 0).count() > 1);
    let sum: i32 = out.iter().map(|&a| i32::from(a)).sum();
    assert!((sum - 255).abs() <= 6, "sum {sum}");
}

#[test]
fn rejects_bad_sigma_and_len() {
    assert!(blur_mask(&[0u8; 4], 2, 2, 1, 0.0).is_err());
    assert!(blur_mask(&[0u8; 3], 2, 2, 1, 1.0).is_err());
}
