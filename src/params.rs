
use std::{fmt, num::NonZeroUsize, str::FromStr};

use anyhow::{Result, bail};
use bitflags::bitflags;

use crate::kernel::Kernel;

/// Reconstruction filter used to evaluate the destination grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    NearestNeighbor = 0,
    Bilinear = 1,
    /// Catmull-Rom cubic spline.
    Bicubic = 2,
    MitchellNetravali = 3,
    Lanczos2 = 4,
    /// Lanczos with a = 2, evaluated through a look-up table.
    Lanczos2Lut = 5,
    Lanczos3 = 6,
    /// Lanczos with a = 3, evaluated through a look-up table.
    Lanczos3Lut = 7,
}

impl Interpolation {
    pub const ALL: [Self; 8] = [
        Self::NearestNeighbor,
        Self::Bilinear,
        Self::Bicubic,
        Self::MitchellNetravali,
        Self::Lanczos2,
        Self::Lanczos2Lut,
        Self::Lanczos3,
        Self::Lanczos3Lut,
    ];

    /// The analytic kernel behind this choice.
    #[must_use]
    pub const fn kernel(self) -> Kernel {
        match self {
            Self::NearestNeighbor => Kernel::Nearest,
            Self::Bilinear => Kernel::Linear,
            Self::Bicubic => Kernel::CATMULL_ROM,
            Self::MitchellNetravali => Kernel::MITCHELL,
            Self::Lanczos2 | Self::Lanczos2Lut => Kernel::Lanczos(2),
            Self::Lanczos3 | Self::Lanczos3Lut => Kernel::Lanczos(3),
        }
    }

    /// Whether the kernel is replaced by a table before convolving.
    #[must_use]
    pub const fn uses_lut(self) -> bool {
        matches!(self, Self::Lanczos2Lut | Self::Lanczos3Lut)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
            Self::MitchellNetravali => "mitchell",
            Self::Lanczos2 => "lanczos2",
            Self::Lanczos2Lut => "lanczos2-lut",
            Self::Lanczos3 => "lanczos3",
            Self::Lanczos3Lut => "lanczos3-lut",
        }
    }
}

impl TryFrom<i64> for Interpolation {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::NearestNeighbor,
            1 => Self::Bilinear,
            2 => Self::Bicubic,
            3 => Self::MitchellNetravali,
            4 => Self::Lanczos2,
            5 => Self::Lanczos2Lut,
            6 => Self::Lanczos3,
            7 => Self::Lanczos3Lut,
            _ => bail!("Invalid value for 'interpolation', must be 0-7, got {val}."),
        })
    }
}

impl FromStr for Interpolation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Ok(match lower.as_str() {
            "nearest" | "nearestneighbor" | "nearest-neighbor" => Self::NearestNeighbor,
            "bilinear" | "linear" => Self::Bilinear,
            "bicubic" | "catmull-rom" | "catmullrom" => Self::Bicubic,
            "mitchell" | "mitchellnetravali" | "mitchell-netravali" => Self::MitchellNetravali,
            "lanczos2" => Self::Lanczos2,
            "lanczos2-lut" | "lanczos2lut" => Self::Lanczos2Lut,
            "lanczos3" | "lanczos" => Self::Lanczos3,
            "lanczos3-lut" | "lanczos3lut" => Self::Lanczos3Lut,
            _ => bail!("Unknown interpolation '{s}'."),
        })
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeFlags: u8 {
        /// Blend in linear light instead of on sRGB-encoded values.
        const LINEAR_LIGHT = 1;
    }
}

/// Per-call resize settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeConfig {
    /// Upper bound on worker threads. The actual count never exceeds the
    /// destination height.
    pub threads: NonZeroUsize,
    pub flags: ResizeFlags,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            flags: ResizeFlags::LINEAR_LIGHT,
        }
    }
}

impl ResizeConfig {
    pub fn with_threads(self, threads: usize) -> Result<Self> {
        let Some(threads) = NonZeroUsize::new(threads) else {
            bail!("Invalid value for 'threads', must be at least 1, got {threads}.");
        };
        Ok(Self { threads, ..self })
    }

    #[must_use]
    pub const fn with_flags(self, flags: ResizeFlags) -> Self {
        Self { flags, ..self }
    }

    #[must_use]
    pub const fn linear_light(&self) -> bool {
        self.flags.contains(ResizeFlags::LINEAR_LIGHT)
    }
}
