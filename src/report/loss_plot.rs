use std::io;
use std::path::Path;

use image::{Rgb, RgbImage};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const MARGIN: u32 = 24;

const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
const AXIS: Rgb<u8> = Rgb([120, 120, 120]);
const CURVE: Rgb<u8> = Rgb([30, 90, 200]);

/// Slice of `losses` up to (excluding) the index of its minimum — the
/// descending stretch of the curve that is worth looking at.
pub fn truncate_at_min(losses: &[f64]) -> &[f64] {
    let min_idx = losses
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);
    &losses[..min_idx]
}

/// Renders the loss curve, truncated at its minimum, as a PNG.
///
/// With fewer than two visible points only the axes are drawn; the file is
/// still written so report links stay valid.
pub fn render_loss_curve<P: AsRef<Path>>(losses: &[f64], path: P) -> io::Result<()> {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    draw_line(&mut img, MARGIN, MARGIN, MARGIN, HEIGHT - MARGIN, AXIS);
    draw_line(
        &mut img,
        MARGIN,
        HEIGHT - MARGIN,
        WIDTH - MARGIN,
        HEIGHT - MARGIN,
        AXIS,
    );

    let visible = truncate_at_min(losses);
    if visible.len() >= 2 {
        let lo = visible.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = visible.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = if (hi - lo).abs() < f64::EPSILON {
            1.0
        } else {
            hi - lo
        };

        let plot_w = (WIDTH - 2 * MARGIN) as f64;
        let plot_h = (HEIGHT - 2 * MARGIN) as f64;
        let points: Vec<(u32, u32)> = visible
            .iter()
            .enumerate()
            .map(|(i, &loss)| {
                let x = MARGIN as f64 + i as f64 / (visible.len() - 1) as f64 * plot_w;
                let y = MARGIN as f64 + (1.0 - (loss - lo) / span) * plot_h;
                (x as u32, y as u32)
            })
            .collect();

        for pair in points.windows(2) {
            draw_line(&mut img, pair[0].0, pair[0].1, pair[1].0, pair[1].1, CURVE);
        }
    }

    img.save(path.as_ref())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Bresenham segment draw, clamped to the image bounds.
fn draw_line(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let (mut x, mut y) = (x0 as i64, y0 as i64);
    let (x1, y1) = (x1 as i64, y1 as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_before_the_minimum() {
        let losses = [0.9, 0.7, 0.5, 0.6, 0.8];
        assert_eq!(truncate_at_min(&losses), &[0.9, 0.7]);
    }

    #[test]
    fn minimum_at_start_truncates_to_empty() {
        let losses = [0.1, 0.5, 0.9];
        assert!(truncate_at_min(&losses).is_empty());
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(truncate_at_min(&[]).is_empty());
    }
}
