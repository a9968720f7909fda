//! Operation parameters.
//!
//! Each parameterized operation takes a small options struct. The
//! [`Default`] of every struct is the fixed setting used by the array-level
//! call surface in [`crate::api`]:
//!
//! | Struct | Default |
//! |---|---|
//! | [`BlurParams`] | 15x15 kernel, sigma derived from size |
//! | [`CannyParams`] | thresholds 100 / 200 |
//! | [`RotateParams`] | 0 degrees, scale 1 |
//!
//! With the `serde` feature the structs serialize, so a caller can keep
//! presets in its own configuration.

use crate::border::BorderMode;
use crate::{OpsError, OpsResult};

/// Gaussian blur settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlurParams {
    /// Kernel size in pixels. Must be odd and positive.
    pub ksize: usize,
    /// Standard deviation. Values `<= 0` derive sigma from `ksize`.
    pub sigma: f64,
    /// Border extrapolation.
    pub border: BorderMode,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            ksize: 15,
            sigma: 0.0,
            border: BorderMode::Reflect101,
        }
    }
}

impl BlurParams {
    /// Blur with the given odd kernel size and derived sigma.
    pub fn with_ksize(ksize: usize) -> Self {
        Self {
            ksize,
            ..Self::default()
        }
    }

    /// Checks the kernel size.
    pub fn validate(&self) -> OpsResult<()> {
        if self.ksize == 0 || self.ksize % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "blur kernel size must be odd and positive, got {}",
                self.ksize
            )));
        }
        if !self.sigma.is_finite() {
            return Err(OpsError::InvalidParameter("blur sigma must be finite".into()));
        }
        Ok(())
    }

    /// Sigma actually used: the explicit value, or the size-derived one.
    ///
    /// Derived sigma is `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`, 2.6 for 15.
    pub fn effective_sigma(&self) -> f64 {
        if self.sigma > 0.0 {
            self.sigma
        } else {
            0.3 * ((self.ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
        }
    }
}

/// Canny edge detector thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CannyParams {
    /// Lower hysteresis threshold on the L1 gradient magnitude.
    pub low: f64,
    /// Upper hysteresis threshold on the L1 gradient magnitude.
    pub high: f64,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: 100.0,
            high: 200.0,
        }
    }
}

impl CannyParams {
    /// Checks that thresholds are finite.
    pub fn validate(&self) -> OpsResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(OpsError::InvalidParameter("canny thresholds must be finite".into()));
        }
        Ok(())
    }

    /// Integer thresholds `(low, high)`: floored, and swapped if inverted.
    pub fn int_thresholds(&self) -> (i32, i32) {
        let low = self.low.floor() as i32;
        let high = self.high.floor() as i32;
        if low > high { (high, low) } else { (low, high) }
    }
}

/// Rotation about the image center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotateParams {
    /// Angle in degrees. Positive values rotate counter-clockwise on screen.
    pub angle: f64,
    /// Isotropic scale applied together with the rotation.
    pub scale: f64,
    /// Border extrapolation for newly exposed pixels.
    pub border: BorderMode,
}

impl Default for RotateParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            border: BorderMode::Constant(0),
        }
    }
}

impl RotateParams {
    /// Rotation by `angle` degrees with default scale and border.
    pub fn degrees(angle: f64) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    /// Checks that angle and scale are finite and the scale is non-zero.
    pub fn validate(&self) -> OpsResult<()> {
        if !self.angle.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "rotation angle must be finite, got {}",
                self.angle
            )));
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "rotation scale must be finite and non-zero, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blur_defaults() {
        let p = BlurParams::default();
        assert_eq!(p.ksize, 15);
        assert!(p.validate().is_ok());
        assert_relative_eq!(p.effective_sigma(), 2.6, epsilon = 1e-12);
    }

    #[test]
    fn test_blur_explicit_sigma() {
        let p = BlurParams {
            sigma: 1.5,
            ..BlurParams::default()
        };
        assert_relative_eq!(p.effective_sigma(), 1.5);
    }

    #[test]
    fn test_blur_rejects_even_kernel() {
        assert!(BlurParams::with_ksize(4).validate().is_err());
        assert!(BlurParams::with_ksize(0).validate().is_err());
        assert!(BlurParams::with_ksize(3).validate().is_ok());
    }

    #[test]
    fn test_canny_thresholds() {
        assert_eq!(CannyParams::default().int_thresholds(), (100, 200));
        let swapped = CannyParams { low: 200.7, high: 99.9 };
        assert_eq!(swapped.int_thresholds(), (99, 200));
        assert!(CannyParams { low: f64::NAN, high: 1.0 }.validate().is_err());
    }

    #[test]
    fn test_rotate_validate() {
        assert!(RotateParams::degrees(90.0).validate().is_ok());
        assert!(RotateParams::degrees(f64::INFINITY).validate().is_err());
        let zero_scale = RotateParams {
            scale: 0.0,
            ..RotateParams::default()
        };
        assert!(zero_scale.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_serde() {
        let json = serde_json::to_string(&BlurParams::default()).unwrap();
        let back: BlurParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BlurParams::default());

        let partial: CannyParams = serde_json::from_str(r#"{"low": 50.0}"#).unwrap();
        assert_eq!(partial.high, 200.0);
    }
}
