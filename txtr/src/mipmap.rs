//! Mipmap chain sizing and downsampling.

use image::RgbaImage;

/// Number of times `dimension` can be halved without dropping below `limit`.
fn halvings(mut dimension: u32, limit: u32) -> u32 {
    let limit = limit.max(1);
    let mut steps = 0;
    while dimension / 2 >= limit {
        dimension /= 2;
        steps += 1;
    }
    steps
}

/// Number of levels in a generated mipmap chain.
///
/// Levels are halved until either dimension would drop below its limit, and never past the point
/// where either dimension would reach 0.
///
/// ```
/// # use txtr::mipmap::mipmap_count;
/// assert_eq!(mipmap_count(256, 256, 4, 4, true), 7);
/// assert_eq!(mipmap_count(5, 5, 4, 4, true), 1);
/// ```
pub fn mipmap_count(
    base_width: u32,
    base_height: u32,
    width_limit: u32,
    height_limit: u32,
    include_base: bool,
) -> u32 {
    let steps = halvings(base_width, width_limit).min(halvings(base_height, height_limit));
    let max_steps = halvings(base_width, 1).min(halvings(base_height, 1));
    steps.min(max_steps) + u32::from(include_base)
}

/// Dimensions of mipmap `level`, or `None` once either of them reaches 0.
pub fn level_dimensions(width: u32, height: u32, level: u32) -> Option<(u32, u32)> {
    let width = width.checked_shr(level).unwrap_or(0);
    let height = height.checked_shr(level).unwrap_or(0);
    (width > 0 && height > 0).then_some((width, height))
}

/// Halves an image (rounding down) with a 2x2 box filter. A dimension of 1 stays 1.
pub fn downsample(image: &RgbaImage) -> RgbaImage {
    let (src_width, src_height) = image.dimensions();
    let width = (src_width / 2).max(1);
    let height = (src_height / 2).max(1);

    RgbaImage::from_fn(width, height, |x, y| {
        let xs = [2 * x, (2 * x + 1).min(src_width - 1)];
        let ys = [2 * y, (2 * y + 1).min(src_height - 1)];

        let mut sum = [0u32; 4];
        for &sy in &ys {
            for &sx in &xs {
                let pixel = image.get_pixel(sx, sy);
                for (acc, &c) in sum.iter_mut().zip(&pixel.0) {
                    *acc += u32::from(c);
                }
            }
        }
        image::Rgba(sum.map(|total| ((total + 2) / 4) as u8))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn counts() {
        assert_eq!(mipmap_count(256, 256, 4, 4, true), 7);
        assert_eq!(mipmap_count(256, 256, 4, 4, false), 6);
        assert_eq!(mipmap_count(5, 5, 4, 4, true), 1);
        assert_eq!(mipmap_count(256, 4, 1, 1, true), 3);
        assert_eq!(mipmap_count(64, 32, 1, 1, true), 6);
        assert_eq!(mipmap_count(1, 1, 1, 1, true), 1);
        assert_eq!(mipmap_count(16, 16, 0, 0, true), 5);
    }

    #[test]
    fn level_sizes() {
        assert_eq!(level_dimensions(32, 16, 0), Some((32, 16)));
        assert_eq!(level_dimensions(32, 16, 4), Some((2, 1)));
        assert_eq!(level_dimensions(32, 16, 5), None);
        assert_eq!(level_dimensions(32, 16, 40), None);
    }

    #[test]
    fn box_filter() {
        let image = RgbaImage::from_fn(4, 2, |x, _| Rgba([x as u8 * 10, 0, 0xFF, 1]));
        let half = downsample(&image);
        assert_eq!(half.dimensions(), (2, 1));
        assert_eq!(half.get_pixel(0, 0).0, [5, 0, 0xFF, 1]);
        assert_eq!(half.get_pixel(1, 0).0, [25, 0, 0xFF, 1]);
    }

    #[test]
    fn odd_dimensions_round_down() {
        let image = RgbaImage::from_pixel(5, 3, Rgba([7; 4]));
        let half = downsample(&image);
        assert_eq!(half.dimensions(), (2, 1));
        assert!(half.pixels().all(|p| p.0 == [7; 4]));
    }
}
