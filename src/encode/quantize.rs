//! Median-cut color reduction.

use std::collections::{BTreeMap, HashMap};

pub const MAX_PALETTE: usize = 256;

/// Reduced color table; at most [`MAX_PALETTE`] entries, so indices fit in a byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

/// A set of distinct colors with their pixel counts, and its widest channel.
struct ColorBox {
    colors: Vec<([u8; 3], u32)>,
    channel: usize,
    extent: u8,
}

impl ColorBox {
    fn new(colors: Vec<([u8; 3], u32)>) -> Self {
        let mut b = Self {
            colors,
            channel: 0,
            extent: 0,
        };
        for ch in 0..3 {
            let (lo, hi) = b
                .colors
                .iter()
                .fold((u8::MAX, u8::MIN), |(lo, hi), (c, _)| {
                    (lo.min(c[ch]), hi.max(c[ch]))
                });
            let extent = hi.saturating_sub(lo);
            if extent > b.extent {
                b.channel = ch;
                b.extent = extent;
            }
        }
        b
    }

    /// Split at the pixel-weighted median of the widest channel.
    fn split(self) -> (Self, Self) {
        let ch = self.channel;
        let mut colors = self.colors;
        colors.sort_unstable_by_key(|(c, _)| (c[ch], *c));
        let total: u64 = colors.iter().map(|(_, n)| u64::from(*n)).sum();
        let mut acc = 0u64;
        let mut at = colors.len() / 2;
        for (i, (_, n)) in colors.iter().enumerate() {
            acc += u64::from(*n);
            if acc * 2 >= total {
                at = i + 1;
                break;
            }
        }
        let at = at.clamp(1, colors.len() - 1);
        let hi = colors.split_off(at);
        (Self::new(colors), Self::new(hi))
    }

    fn average(&self) -> [u8; 3] {
        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for (c, n) in &self.colors {
            let n = u64::from(*n);
            for ch in 0..3 {
                sum[ch] += u64::from(c[ch]) * n;
            }
            count += n;
        }
        let count = count.max(1);
        sum.map(|s| ((s + count / 2) / count) as u8)
    }
}

impl Palette {
    /// Build a palette of at most `max_colors` entries for `pixels`.
    ///
    /// When the input has no more distinct colors than allowed, the palette holds them exactly.
    /// The result depends only on the multiset of pixels, not on their order.
    pub fn median_cut(pixels: &[[u8; 3]], max_colors: usize) -> Self {
        let max_colors = max_colors.clamp(1, MAX_PALETTE);
        let mut histogram: BTreeMap<[u8; 3], u32> = BTreeMap::new();
        for px in pixels {
            *histogram.entry(*px).or_insert(0) += 1;
        }
        if histogram.is_empty() {
            return Self {
                colors: vec![[0, 0, 0]],
            };
        }

        let mut boxes = vec![ColorBox::new(histogram.into_iter().collect())];
        while boxes.len() < max_colors {
            let Some((i, _)) = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.colors.len() > 1)
                .max_by_key(|(_, b)| b.extent)
            else {
                break;
            };
            let (lo, hi) = boxes.swap_remove(i).split();
            boxes.push(lo);
            boxes.push(hi);
        }

        let mut colors: Vec<[u8; 3]> = boxes.iter().map(ColorBox::average).collect();
        colors.sort_unstable();
        colors.dedup();
        Self { colors }
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the closest entry by squared RGB distance.
    pub fn nearest(&self, c: [u8; 3]) -> u8 {
        let dist = |p: &[u8; 3]| -> u32 {
            (0..3)
                .map(|ch| {
                    let d = i32::from(p[ch]) - i32::from(c[ch]);
                    (d * d) as u32
                })
                .sum()
        };
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| dist(p))
            .map_or(0, |(i, _)| i as u8)
    }

    /// Map every pixel to its nearest palette index.
    pub fn index(&self, pixels: &[[u8; 3]]) -> Vec<u8> {
        let mut memo: HashMap<[u8; 3], u8> = HashMap::new();
        pixels
            .iter()
            .map(|px| *memo.entry(*px).or_insert_with(|| self.nearest(*px)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/quantize.rs"]
mod tests;
