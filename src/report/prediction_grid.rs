use std::io;
use std::path::Path;

use image::{Rgb, RgbImage};

const BORDER: u32 = 2;
const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
const CORRECT: Rgb<u8> = Rgb([40, 160, 60]);
const WRONG: Rgb<u8> = Rgb([200, 50, 50]);

/// One test image with its predicted and true labels, ready for rendering.
#[derive(Debug, Clone)]
pub struct GridSample {
    /// Row-major pixels in [0, 1]; length = width × height × channels.
    pub pixels: Vec<f64>,
    pub width: u32,
    pub height: u32,
    /// 1 (grayscale) or 3 (RGB).
    pub channels: u32,
    pub predicted: usize,
    pub truth: usize,
}

impl GridSample {
    fn pixel_rgb(&self, x: u32, y: u32) -> Rgb<u8> {
        let idx = ((y * self.width + x) * self.channels) as usize;
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0) as u8;
        match self.channels {
            3 => Rgb([
                to_u8(self.pixels[idx]),
                to_u8(self.pixels[idx + 1]),
                to_u8(self.pixels[idx + 2]),
            ]),
            _ => {
                let g = to_u8(self.pixels[idx]);
                Rgb([g, g, g])
            }
        }
    }
}

/// Renders the samples as a two-row grid, each tile bordered green when the
/// prediction matches the true label and red otherwise.
pub fn render_prediction_grid<P: AsRef<Path>>(samples: &[GridSample], path: P) -> io::Result<()> {
    if samples.is_empty() {
        // Nothing to draw; still write a small blank canvas so report links
        // stay valid.
        let img = RgbImage::from_pixel(64, 32, BACKGROUND);
        return img
            .save(path.as_ref())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    }

    let tile_w = samples.iter().map(|s| s.width).max().unwrap_or(1) + 2 * BORDER;
    let tile_h = samples.iter().map(|s| s.height).max().unwrap_or(1) + 2 * BORDER;
    let cols = samples.len().div_ceil(2);
    let rows = if samples.len() > cols { 2 } else { 1 };

    let mut img = RgbImage::from_pixel(
        cols as u32 * tile_w,
        rows as u32 * tile_h,
        BACKGROUND,
    );

    for (idx, sample) in samples.iter().enumerate() {
        let x0 = (idx % cols) as u32 * tile_w;
        let y0 = (idx / cols) as u32 * tile_h;
        let border = if sample.predicted == sample.truth {
            CORRECT
        } else {
            WRONG
        };

        // Border fill first, then the image content inset by the border.
        for y in 0..tile_h {
            for x in 0..tile_w {
                img.put_pixel(x0 + x, y0 + y, border);
            }
        }
        for y in 0..sample.height {
            for x in 0..sample.width {
                img.put_pixel(x0 + BORDER + x, y0 + BORDER + y, sample.pixel_rgb(x, y));
            }
        }
    }

    img.save(path.as_ref())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
