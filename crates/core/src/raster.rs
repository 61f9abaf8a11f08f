//! Byte-raster primitives for the content detectors.
//!
//! The renderer hands over a packed sample buffer; everything here works on
//! single-channel row-major rasters derived from it. The operation set is
//! deliberately small: the fixed kernels the detection pipeline needs, not
//! a general image-processing layer.

use crate::error::{AnalysisError, Result};

/// A rendered page bitmap as delivered by the renderer: packed row-major
/// samples with 1 (gray), 3 (RGB) or 4 (RGBA) channels.
#[derive(Debug, Clone)]
pub struct PageBitmap {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub samples: Vec<u8>,
}

impl PageBitmap {
    /// Wraps a sample buffer, checking the declared shape against it.
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Result<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(AnalysisError::UnsupportedChannels { channels });
        }
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(AnalysisError::BitmapSizeMismatch {
                width,
                height,
                channels,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Collapses the bitmap to a single luminance channel. Alpha is ignored;
    /// color uses Rec.601 weights.
    pub fn to_gray(&self) -> GrayImage {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut gray = GrayImage::new(w, h);
        match self.channels {
            1 => gray.data.copy_from_slice(&self.samples),
            c => {
                let c = c as usize;
                for (i, px) in self.samples.chunks_exact(c).enumerate() {
                    let luma =
                        0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
                    gray.data[i] = luma.round().min(255.0) as u8;
                }
            }
        }
        gray
    }
}

/// A single-channel row-major byte raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    /// Fills `[x0, x1) x [y0, y1)` with `value`. Bounds are clamped to the
    /// raster.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0..y1 {
            let row = y * self.width;
            self.data[row + x0.min(x1)..row + x1].fill(value);
        }
    }

    /// Counts pixels equal to 255 in `[x0, x1) x [y0, y1)`.
    pub fn count_set_in_rect(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> usize {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let mut count = 0;
        for y in y0..y1 {
            let row = y * self.width;
            count += self.data[row + x0.min(x1)..row + x1]
                .iter()
                .filter(|&&v| v == 255)
                .count();
        }
        count
    }
}

/// Combined horizontal/vertical 3x3 gradient magnitude, clipped to u8.
pub fn sobel_magnitude(src: &GrayImage) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    if src.width < 3 || src.height < 3 {
        return out;
    }
    for y in 1..src.height - 1 {
        for x in 1..src.width - 1 {
            let p = |dx: isize, dy: isize| {
                src.get((x as isize + dx) as usize, (y as isize + dy) as usize) as i32
            };
            let gx = -p(-1, -1) + p(1, -1) - 2 * p(-1, 0) + 2 * p(1, 0) - p(-1, 1) + p(1, 1);
            let gy = -p(-1, -1) - 2 * p(0, -1) - p(1, -1) + p(-1, 1) + 2 * p(0, 1) + p(1, 1);
            let mag = ((gx * gx + gy * gy) as f64).sqrt();
            out.set(x, y, mag.min(255.0) as u8);
        }
    }
    out
}

/// Binarizes the raster: values strictly above `threshold` become 255,
/// everything else 0.
pub fn threshold(src: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    for (dst, &v) in out.data.iter_mut().zip(&src.data) {
        *dst = if v > threshold { 255 } else { 0 };
    }
    out
}

/// Dilation with a `kernel x kernel` rectangular structuring element.
///
/// The rectangle is separable, so this runs as a horizontal max pass
/// followed by a vertical one. `kernel` must be odd.
pub fn dilate(src: &GrayImage, kernel: usize) -> GrayImage {
    debug_assert!(kernel % 2 == 1, "structuring element must be odd-sized");
    let r = kernel / 2;
    let pass_h = run_pass(src, r, true, 255);
    run_pass(&pass_h, r, false, 255)
}

/// Erosion with a `kernel x kernel` rectangular structuring element.
pub fn erode(src: &GrayImage, kernel: usize) -> GrayImage {
    debug_assert!(kernel % 2 == 1, "structuring element must be odd-sized");
    let r = kernel / 2;
    let pass_h = run_pass(src, r, true, 0);
    run_pass(&pass_h, r, false, 0)
}

/// Morphological opening: erosion then dilation. Removes isolated specks
/// smaller than the structuring element.
pub fn open(src: &GrayImage, kernel: usize) -> GrayImage {
    dilate(&erode(src, kernel), kernel)
}

/// One separable morphology pass over a binary raster. `sticky` is the value
/// that wins inside the window: 255 dilates, 0 erodes. Pixels outside the
/// raster do not participate (border handling matches a clamped window).
fn run_pass(src: &GrayImage, radius: usize, horizontal: bool, sticky: u8) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..src.height {
        for x in 0..src.width {
            let (lo, hi) = if horizontal {
                (x.saturating_sub(radius), (x + radius).min(src.width - 1))
            } else {
                (y.saturating_sub(radius), (y + radius).min(src.height - 1))
            };
            let mut value = src.get(x, y);
            let mut i = lo;
            while i <= hi && value != sticky {
                let v = if horizontal {
                    src.get(i, y)
                } else {
                    src.get(x, i)
                };
                if v == sticky {
                    value = sticky;
                }
                i += 1;
            }
            out.set(x, y, value);
        }
    }
    out
}

/// Bounding rectangle and pixel population of one connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStats {
    /// Left/top of the component, inclusive.
    pub x: usize,
    pub y: usize,
    /// Width/height of the component bounding rectangle.
    pub width: usize,
    pub height: usize,
    /// Number of set pixels in the component.
    pub area: usize,
}

/// Labels 8-connected components of set (255) pixels, returning per-component
/// stats in row-major discovery order. Background pixels form no component.
pub fn connected_components(src: &GrayImage) -> Vec<ComponentStats> {
    let w = src.width;
    let h = src.height;
    let mut visited = vec![false; w * h];
    let mut components = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if visited[idx] || src.data[idx] != 255 {
                continue;
            }
            visited[idx] = true;
            stack.push((x, y));
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            let mut area = 0usize;
            while let Some((cx, cy)) = stack.pop() {
                area += 1;
                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = cx as i64 + dx;
                        let ny = cy as i64 + dy;
                        if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                            continue;
                        }
                        let nidx = ny as usize * w + nx as usize;
                        if !visited[nidx] && src.data[nidx] == 255 {
                            visited[nidx] = true;
                            stack.push((nx as usize, ny as usize));
                        }
                    }
                }
            }
            components.push(ComponentStats {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
                area,
            });
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from_rows(rows: &[&[u8]]) -> GrayImage {
        let height = rows.len();
        let width = rows[0].len();
        let mut img = GrayImage::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                img.set(x, y, v);
            }
        }
        img
    }

    #[test]
    fn test_bitmap_shape_validation() {
        assert!(PageBitmap::new(4, 4, 3, vec![0; 48]).is_ok());
        assert!(PageBitmap::new(4, 4, 3, vec![0; 47]).is_err());
        assert!(PageBitmap::new(4, 4, 2, vec![0; 32]).is_err());
    }

    #[test]
    fn test_dilate_grows_single_pixel() {
        let mut img = GrayImage::new(7, 7);
        img.set(3, 3, 255);
        let dilated = dilate(&img, 3);
        for y in 2..=4 {
            for x in 2..=4 {
                assert_eq!(dilated.get(x, y), 255);
            }
        }
        assert_eq!(dilated.get(1, 3), 0);
        assert_eq!(dilated.get(3, 1), 0);
    }

    #[test]
    fn test_open_removes_specks_keeps_blocks() {
        let mut img = GrayImage::new(12, 12);
        img.set(1, 1, 255); // isolated speck
        img.fill_rect(5, 5, 10, 10, 255); // 5x5 block
        let opened = open(&img, 3);
        assert_eq!(opened.get(1, 1), 0);
        assert_eq!(opened.count_set_in_rect(5, 5, 10, 10), 25);
    }

    #[test]
    fn test_connected_components_two_blobs() {
        let img = image_from_rows(&[
            &[255, 255, 0, 0, 0],
            &[255, 255, 0, 0, 0],
            &[0, 0, 0, 255, 255],
            &[0, 0, 0, 255, 255],
            &[0, 0, 0, 255, 255],
        ]);
        let comps = connected_components(&img);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].area, 4);
        assert_eq!((comps[0].x, comps[0].y), (0, 0));
        assert_eq!(comps[1].area, 6);
        assert_eq!((comps[1].width, comps[1].height), (2, 3));
    }

    #[test]
    fn test_diagonal_pixels_are_one_component() {
        let img = image_from_rows(&[&[255, 0, 0], &[0, 255, 0], &[0, 0, 255]]);
        let comps = connected_components(&img);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 3);
    }
}
