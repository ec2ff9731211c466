
mod lut;

use std::f64::consts::PI;

pub use lut::LutKernel;

/// A continuous, symmetric reconstruction filter evaluated per tap.
///
/// The convolution engine is generic over this trait so each kernel
/// representation gets its own monomorphized inner loop.
pub trait Weights: Sync {
    /// Weight of a sample at signed distance `x` from the query point.
    #[must_use]
    fn weight(&self, x: f32) -> f32;

    /// Distance beyond which [`Weights::weight`] is zero.
    #[must_use]
    fn radius(&self) -> f32;

    /// Number of taps needed to cover the kernel once stretched by `factor`.
    ///
    /// Always even so the window straddles the query point symmetrically.
    #[must_use]
    fn taps(&self, factor: f32) -> usize {
        let half = (self.radius() * factor.max(1.0)).ceil() as usize;
        2 * half.max(1)
    }
}

/// The analytic kernel families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// Box of width 1 centered on the sample, half-open on the right.
    Nearest,
    /// Triangle (tent) filter.
    Linear,
    /// Mitchell-Netravali two-parameter cubic family.
    ///
    /// The coefficients are resolved from `(B, C)` once in [`Kernel::cubic`].
    Cubic(CubicCoefficients),
    /// Lanczos windowed sinc with lobe count `a`.
    Lanczos(u8),
}

/// Polynomial coefficients of a B,C cubic spline, already divided by 6.
///
/// `near` applies to `|x| < 1`, `far` to `1 <= |x| < 2`, each as
/// `[x^3, x^2, x, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCoefficients {
    near: [f32; 4],
    far: [f32; 4],
}

impl Kernel {
    /// Catmull-Rom spline, the usual "bicubic".
    pub const CATMULL_ROM: Self = Self::cubic(0.0, 0.5);

    /// Mitchell-Netravali with B = C = 1/3.
    pub const MITCHELL: Self = Self::cubic(1.0 / 3.0, 1.0 / 3.0);

    #[must_use]
    pub const fn cubic(b: f32, c: f32) -> Self {
        Self::Cubic(CubicCoefficients {
            near: [
                (12.0 - 9.0 * b - 6.0 * c) / 6.0,
                (-18.0 + 12.0 * b + 6.0 * c) / 6.0,
                0.0,
                (6.0 - 2.0 * b) / 6.0,
            ],
            far: [
                (-b - 6.0 * c) / 6.0,
                (6.0 * b + 30.0 * c) / 6.0,
                (-12.0 * b - 48.0 * c) / 6.0,
                (8.0 * b + 24.0 * c) / 6.0,
            ],
        })
    }
}

impl Weights for Kernel {
    #[inline]
    fn weight(&self, x: f32) -> f32 {
        match *self {
            Self::Nearest => {
                if (-0.5..0.5).contains(&x) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Linear => {
                let x = x.abs();
                if x < 1.0 { 1.0 - x } else { 0.0 }
            }
            Self::Cubic(coeffs) => {
                let x = x.abs();
                let p = if x < 1.0 {
                    coeffs.near
                } else if x < 2.0 {
                    coeffs.far
                } else {
                    return 0.0;
                };
                ((p[0] * x + p[1]) * x + p[2]) * x + p[3]
            }
            Self::Lanczos(a) => {
                let a = f32::from(a);
                if x.abs() >= a {
                    0.0
                } else {
                    let x = f64::from(x);
                    let a = f64::from(a);
                    (sinc(x) * sinc(x / a)) as f32
                }
            }
        }
    }

    #[inline]
    fn radius(&self) -> f32 {
        match *self {
            Self::Nearest | Self::Linear => 1.0,
            Self::Cubic(_) => 2.0,
            Self::Lanczos(a) => f32::from(a),
        }
    }
}

/// Normalized sinc, `sin(pi x) / (pi x)`, with `sinc(0) = 1`.
///
/// Close to zero the quotient loses precision, so a short Taylor series is
/// used below the threshold instead.
#[must_use]
pub fn sinc(x: f64) -> f64 {
    let x = (x * PI).abs();
    if x >= 1.220703e-4 {
        x.sin() / x
    } else {
        1.0 - x * x / 6.0
    }
}
