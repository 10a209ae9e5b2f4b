//! Reading profiles: refresh speed/quality trade-off and paper texture.

use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Refresh profile trading redraw speed against image quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefreshProfile {
    /// Fastest redraws, most ghosting
    Speed,
    Balanced,
    /// Slowest redraws, cleanest image (default)
    #[default]
    Quality,
}

/// Timing figures for a [`RefreshProfile`].
///
/// `full_refresh_time` and `partial_refresh_time` are relative figures shown
/// in the reading UI; only their ordering between profiles is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshProfileTimings {
    pub profile: RefreshProfile,
    /// Frames per second
    pub refresh_rate: u32,
    pub full_refresh_time: u32,
    pub partial_refresh_time: u32,
}

impl RefreshProfile {
    /// All profiles, fastest first.
    pub const ALL: [RefreshProfile; 3] = [
        RefreshProfile::Speed,
        RefreshProfile::Balanced,
        RefreshProfile::Quality,
    ];

    /// Timing figures for this profile.
    ///
    /// # Example
    ///
    /// ```
    /// use reflective_display::RefreshProfile;
    ///
    /// let timings = RefreshProfile::Speed.timings();
    /// assert_eq!(timings.refresh_rate, 30);
    /// assert_eq!(RefreshProfile::default().timings().refresh_rate, 15);
    /// ```
    pub fn timings(self) -> RefreshProfileTimings {
        let (refresh_rate, full_refresh_time, partial_refresh_time) = match self {
            RefreshProfile::Speed => (30, 8, 2),
            RefreshProfile::Balanced => (20, 12, 5),
            RefreshProfile::Quality => (15, 15, 8),
        };
        RefreshProfileTimings {
            profile: self,
            refresh_rate,
            full_refresh_time,
            partial_refresh_time,
        }
    }
}

impl FromStr for RefreshProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "speed" => Ok(RefreshProfile::Speed),
            "balanced" => Ok(RefreshProfile::Balanced),
            "quality" => Ok(RefreshProfile::Quality),
            _ => Err(Error::invalid_input(format!(
                "unknown refresh profile '{}' (expected speed, balanced or quality)",
                s
            ))),
        }
    }
}

/// Coarse paper fiber density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FiberLevel {
    Low,
    Medium,
    High,
}

impl FiberLevel {
    fn for_density(density: u8) -> Self {
        match density {
            0..=19 => FiberLevel::Low,
            20..=59 => FiberLevel::Medium,
            _ => FiberLevel::High,
        }
    }
}

/// Coarse ink bleed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InkBleedLevel {
    Minimal,
    Light,
    Moderate,
    Heavy,
}

impl InkBleedLevel {
    fn for_bleed(bleed: u8) -> Self {
        match bleed {
            0..=9 => InkBleedLevel::Minimal,
            10..=29 => InkBleedLevel::Light,
            30..=59 => InkBleedLevel::Moderate,
            _ => InkBleedLevel::Heavy,
        }
    }
}

/// Simulated paper texture for the reading surface.
///
/// # Example
///
/// ```
/// use reflective_display::{FiberLevel, InkBleedLevel, PaperTexture};
///
/// let texture = PaperTexture::new(40, 25).unwrap();
/// assert_eq!(texture.fiber_level, FiberLevel::Medium);
/// assert_eq!(texture.ink_bleed_level, InkBleedLevel::Light);
///
/// assert!(PaperTexture::new(101, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperTexture {
    /// Fiber density, 0-100
    pub fiber_density: u8,
    pub fiber_level: FiberLevel,
    /// Ink bleed, 0-100
    pub ink_bleed: u8,
    pub ink_bleed_level: InkBleedLevel,
    /// Noise overlay intensity, 0.0-0.15
    pub texture_intensity: f32,
}

/// Highest accepted fiber density / ink bleed value
pub const PAPER_SCALE_MAX: u8 = 100;

/// Noise overlay intensity at full fiber density
const MAX_TEXTURE_INTENSITY: f32 = 0.15;

impl PaperTexture {
    /// Describe a texture. Both inputs must be in `0..=100`.
    pub fn new(fiber_density: u8, ink_bleed: u8) -> Result<Self, Error> {
        for (name, value) in [("fiberDensity", fiber_density), ("inkBleed", ink_bleed)] {
            if value > PAPER_SCALE_MAX {
                return Err(Error::invalid_input(format!(
                    "{} must be between 0 and {}, got {}",
                    name, PAPER_SCALE_MAX, value
                )));
            }
        }

        Ok(Self {
            fiber_density,
            fiber_level: FiberLevel::for_density(fiber_density),
            ink_bleed,
            ink_bleed_level: InkBleedLevel::for_bleed(ink_bleed),
            texture_intensity: f32::from(fiber_density) / 100.0 * MAX_TEXTURE_INTENSITY,
        })
    }
}
