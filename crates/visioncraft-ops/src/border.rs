//! Border extrapolation for neighborhood operations.
//!
//! Filters read pixels outside the image; [`BorderMode`] decides where
//! those reads land.
//!
//! ```text
//! Reflect101:  g f | a b c d e f g h | g f
//! Replicate:   a a | a b c d e f g h | h h
//! Constant:    v v | a b c d e f g h | v v
//! ```

/// Strategy for coordinates outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderMode {
    /// Mirror around the edge pixel, which is not repeated.
    #[default]
    Reflect101,
    /// Repeat the edge pixel.
    Replicate,
    /// Read a fixed value.
    Constant(u8),
}

impl BorderMode {
    /// Maps coordinate `p` onto `0..len`.
    ///
    /// Returns `None` for [`BorderMode::Constant`] when `p` is outside; the
    /// caller substitutes the constant.
    #[inline]
    pub fn resolve(self, p: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&p) {
            return Some(p as usize);
        }
        match self {
            Self::Constant(_) => None,
            Self::Replicate => Some(p.clamp(0, n - 1) as usize),
            Self::Reflect101 => {
                if len == 1 {
                    return Some(0);
                }
                // Reflection is periodic in 2 * (len - 1); i128 keeps extreme
                // coordinates from overflowing.
                let n = len as i128;
                let period = 2 * (n - 1);
                let m = (p as i128).rem_euclid(period);
                let r = if m < n { m } else { period - m };
                Some(r as usize)
            }
        }
    }
}
