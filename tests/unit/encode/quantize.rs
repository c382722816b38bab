use super::*;

#[test]
fn few_colors_are_kept_exactly() {
    let px = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 0, 0]];
    let pal = Palette::median_cut(&px, 256);
    assert_eq!(pal.len(), 3);
    let idx = pal.index(&px);
    for (i, c) in idx.iter().zip(&px) {
        assert_eq!(pal.colors()[*i as usize], *c);
    }
}

#[test]
fn gradient_is_reduced_to_the_budget() {
    let px: Vec<[u8; 3]> = (0..=255u8)
        .flat_map(|r| (0..4u8).map(move |g| [r, g * 60, 255 - r]))
        .collect();
    let pal = Palette::median_cut(&px, 16);
    assert!(pal.len() <= 16);
    assert!(pal.len() > 8);
    let idx = pal.index(&px);
    assert_eq!(idx.len(), px.len());
    assert!(idx.iter().all(|i| (*i as usize) < pal.len()));
}

#[test]
fn palette_never_exceeds_256() {
    let px: Vec<[u8; 3]> = (0..40_000u32)
        .map(|i| [(i % 251) as u8, (i / 251 % 241) as u8, (i * 7 % 239) as u8])
        .collect();
    let pal = Palette::median_cut(&px, 1_000);
    assert!(pal.len() <= MAX_PALETTE);
}

#[test]
fn nearest_prefers_the_closest_entry() {
    let pal = Palette::median_cut(&[[0, 0, 0], [255, 255, 255]], 2);
    let black = pal.nearest([10, 20, 5]);
    let white = pal.nearest([240, 230, 250]);
    assert_eq!(pal.colors()[black as usize], [0, 0, 0]);
    assert_eq!(pal.colors()[white as usize], [255, 255, 255]);
}

#[test]
fn empty_input_still_has_one_entry() {
    let pal = Palette::median_cut(&[], 256);
    assert_eq!(pal.len(), 1);
    assert!(!pal.is_empty());
}

#[test]
fn same_pixels_give_the_same_palette() {
    let px: Vec<[u8; 3]> = (0..30_000u32)
        .map(|i| [(i % 97) as u8 * 2, (i % 13) as u8 * 19, (i % 7) as u8 * 30])
        .collect();
    let first = Palette::median_cut(&px, 64);
    for _ in 0..8 {
        assert_eq!(Palette::median_cut(&px, 64), first);
    }
    let mut reversed = px.clone();
    reversed.reverse();
    assert_eq!(Palette::median_cut(&reversed, 64), first);
    assert_eq!(first.index(&px), first.index(&px));
}
