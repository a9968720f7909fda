//! Gradient and edge detection.
//!
//! [`canny`] follows the classic pipeline:
//!
//! 1. 3x3 Sobel derivatives with replicated borders
//! 2. L1 magnitude `|dx| + |dy|`
//! 3. Non-maximum suppression along the quantized gradient direction
//! 4. Double threshold and 8-connected hysteresis
//!
//! Direction quantization uses integer tangent tests (`tan 22.5` in Q15),
//! so results do not depend on floating point.

use crate::border::BorderMode;
use crate::color::grayscale;
use crate::params::CannyParams;
use crate::parallel::for_each_row;
use crate::OpsResult;
use tracing::{debug, trace};
use visioncraft_core::Image;

/// `tan(22.5 deg)` in Q15.
const TG22: i64 = 13573;

/// Value written for edge pixels.
pub const EDGE: u8 = 255;

/// Horizontal and vertical Sobel derivatives of a single-channel image.
///
/// Both buffers are `rows * cols`, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradients {
    /// Image height.
    pub rows: usize,
    /// Image width.
    pub cols: usize,
    /// d/dx, positive where intensity grows to the right.
    pub dx: Vec<i32>,
    /// d/dy, positive where intensity grows downward.
    pub dy: Vec<i32>,
}

/// 3x3 Sobel derivatives of a single-channel image with replicated borders.
pub fn sobel(gray: &Image<'_>) -> Gradients {
    let (rows, cols, _) = gray.dims();
    trace!(rows, cols, "sobel");

    let border = BorderMode::Replicate;
    let at = |x: isize, y: isize| -> i32 {
        // Replicate always resolves
        let sx = border.resolve(x, cols).unwrap_or(0);
        let sy = border.resolve(y, rows).unwrap_or(0);
        gray.row(sy)[sx] as i32
    };

    let mut dx = vec![0i32; rows * cols];
    for_each_row(&mut dx, cols, |y, row| {
        let y = y as isize;
        for (x, d) in row.iter_mut().enumerate() {
            let x = x as isize;
            *d = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
        }
    });

    let mut dy = vec![0i32; rows * cols];
    for_each_row(&mut dy, cols, |y, row| {
        let y = y as isize;
        for (x, d) in row.iter_mut().enumerate() {
            let x = x as isize;
            *d = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
        }
    });

    Gradients { rows, cols, dx, dy }
}

/// Per-pixel classification after suppression and thresholding.
const NOT_EDGE: u8 = 0;
const CANDIDATE: u8 = 1;
const STRONG: u8 = 2;

/// Canny edge detector.
///
/// Color input is converted to luma first; single-channel input is used as
/// is. The result is single-channel with values `0` and [`EDGE`] only.
///
/// A pixel survives suppression if its magnitude exceeds the low threshold
/// and is a local maximum along the gradient direction. Survivors above the
/// high threshold seed the edges; other survivors become edges only when
/// 8-connected to a seed.
///
/// # Example
///
/// ```rust
/// use visioncraft_core::Image;
/// use visioncraft_ops::edge::canny;
/// use visioncraft_ops::params::CannyParams;
///
/// let flat = Image::filled(8, 8, &[90, 90, 90]).unwrap();
/// let edges = canny(&flat, &CannyParams::default()).unwrap();
/// assert!(edges.storage().iter().all(|&v| v == 0));
/// ```
pub fn canny(src: &Image<'_>, params: &CannyParams) -> OpsResult<Image<'static>> {
    params.validate()?;
    let (low, high) = params.int_thresholds();
    let (low, high) = (low as i64, high as i64);

    let gray;
    let gray_ref = if src.channels() == 1 {
        src
    } else {
        gray = grayscale(src)?;
        &gray
    };
    let (rows, cols, _) = gray_ref.dims();
    debug!(rows, cols, low, high, "canny");

    let grad = sobel(gray_ref);
    let mag: Vec<i64> = grad
        .dx
        .iter()
        .zip(&grad.dy)
        .map(|(&dx, &dy)| (dx.abs() + dy.abs()) as i64)
        .collect();
    // Magnitude outside the image counts as zero.
    let mag_at = |x: isize, y: isize| -> i64 {
        if x < 0 || y < 0 || x >= cols as isize || y >= rows as isize {
            0
        } else {
            mag[y as usize * cols + x as usize]
        }
    };

    let mut state = vec![NOT_EDGE; rows * cols];
    for_each_row(&mut state, cols, |y, row| {
        let yi = y as isize;
        for (x, s) in row.iter_mut().enumerate() {
            let i = y * cols + x;
            let m = mag[i];
            if m <= low {
                continue;
            }
            let xi = x as isize;
            let dx = grad.dx[i] as i64;
            let dy = grad.dy[i] as i64;
            let ax = dx.abs();
            let ay = dy.abs() << 15;
            let tg22x = ax * TG22;

            let is_max = if ay < tg22x {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if ay > tg22x + (ax << 16) {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else {
                let s: isize = if (dx ^ dy) < 0 { -1 } else { 1 };
                m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
            };
            if is_max {
                *s = if m > high { STRONG } else { CANDIDATE };
            }
        }
    });

    hysteresis(&mut state, rows, cols);

    let data = state
        .into_iter()
        .map(|s| if s == STRONG { EDGE } else { 0 })
        .collect();
    Ok(Image::from_vec(rows, cols, 1, data)?)
}

/// Promotes candidates 8-connected to a strong pixel.
fn hysteresis(state: &mut [u8], rows: usize, cols: usize) {
    let mut stack: Vec<usize> = state
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == STRONG)
        .map(|(i, _)| i)
        .collect();
    trace!(seeds = stack.len(), "hysteresis");

    while let Some(i) = stack.pop() {
        let (x, y) = ((i % cols) as isize, (i / cols) as isize);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if nx < 0 || ny < 0 || nx >= cols as isize || ny >= rows as isize {
                    continue;
                }
                let j = ny as usize * cols + nx as usize;
                if state[j] == CANDIDATE {
                    state[j] = STRONG;
                    stack.push(j);
                }
            }
        }
    }
}
