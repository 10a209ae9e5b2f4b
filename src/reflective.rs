//! Reflective display configuration.
//!
//! A reflective panel is lit by the room, not by the device. The engine here
//! owns the light-emission settings (which should all be off) and derives a
//! contrast mode from the ambient light level:
//!
//! | Ambient lux | Contrast mode |
//! |-------------|---------------|
//! | 0 - 100 | `MAXIMUM` |
//! | 101 - 1000 | `STANDARD` |
//! | above 1000 | `SUBDUED` |

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::Error;
use crate::{MAXIMUM_CONTRAST_MAX_LUX, STANDARD_CONTRAST_MAX_LUX};

/// Front light state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrontLight {
    /// Front light is on
    Enabled,
    /// Front light is off
    Disabled,
}

impl FrontLight {
    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            FrontLight::Enabled => FrontLight::Disabled,
            FrontLight::Disabled => FrontLight::Enabled,
        }
    }

    /// Name as it appears in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            FrontLight::Enabled => "ENABLED",
            FrontLight::Disabled => "DISABLED",
        }
    }
}

/// Automatic brightness adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoBrightness {
    On,
    Off,
}

impl AutoBrightness {
    /// Name as it appears in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            AutoBrightness::On => "ON",
            AutoBrightness::Off => "OFF",
        }
    }
}

/// Color temperature of emitted light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorTemperature {
    Neutral,
    Warm,
    Cool,
}

impl ColorTemperature {
    /// Name as it appears in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorTemperature::Neutral => "NEUTRAL",
            ColorTemperature::Warm => "WARM",
            ColorTemperature::Cool => "COOL",
        }
    }
}

/// Light-emission settings of the device.
///
/// `screen_backlight` is a percentage (0-100). It is serialized as a string
/// with a `%` suffix (`"0%"`), which existing clients rely on.
///
/// # Example
///
/// ```
/// use reflective_display::LightEmissionState;
///
/// let json = serde_json::to_string(&LightEmissionState::ALL_OFF).unwrap();
/// assert!(json.contains("\"screenBacklight\":\"0%\""));
/// assert!(json.contains("\"frontLight\":\"DISABLED\""));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightEmissionState {
    /// Backlight level in percent, 0-100.
    ///
    /// Not checked on direct construction; [`ReflectiveDisplayEngine::with_state`]
    /// rejects values above [`MAX_BACKLIGHT_PERCENT`].
    #[serde(serialize_with = "serialize_percent")]
    pub screen_backlight: u8,

    /// Front light on/off
    pub front_light: FrontLight,

    /// Ambient-driven brightness adjustment
    pub auto_brightness: AutoBrightness,

    /// Color temperature of any emitted light
    pub color_temperature: ColorTemperature,
}

/// Highest valid backlight level
pub const MAX_BACKLIGHT_PERCENT: u8 = 100;

impl LightEmissionState {
    /// Baseline with every light source switched off.
    pub const ALL_OFF: LightEmissionState = LightEmissionState {
        screen_backlight: 0,
        front_light: FrontLight::Disabled,
        auto_brightness: AutoBrightness::Off,
        color_temperature: ColorTemperature::Neutral,
    };

    /// Whether any light source is emitting.
    pub fn is_emitting(&self) -> bool {
        self.screen_backlight > 0 || self.front_light == FrontLight::Enabled
    }
}

impl Default for LightEmissionState {
    fn default() -> Self {
        Self::ALL_OFF
    }
}

fn serialize_percent<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{}%", value))
}

/// Contrast setting chosen from the ambient light level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContrastMode {
    /// Dim surroundings: push contrast as high as the panel allows
    Maximum,
    /// Ordinary indoor light
    Standard,
    /// Bright light or sunlight: reflected light already provides contrast
    Subdued,
}

impl ContrastMode {
    /// Select the contrast mode for an ambient light level.
    ///
    /// The three ranges cover every `u32` with no overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use reflective_display::ContrastMode;
    ///
    /// assert_eq!(ContrastMode::for_lux(100), ContrastMode::Maximum);
    /// assert_eq!(ContrastMode::for_lux(101), ContrastMode::Standard);
    /// assert_eq!(ContrastMode::for_lux(1001), ContrastMode::Subdued);
    /// ```
    pub fn for_lux(lux: u32) -> Self {
        if lux <= MAXIMUM_CONTRAST_MAX_LUX {
            ContrastMode::Maximum
        } else if lux <= STANDARD_CONTRAST_MAX_LUX {
            ContrastMode::Standard
        } else {
            ContrastMode::Subdued
        }
    }

    /// Name as it appears in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ContrastMode::Maximum => "MAXIMUM",
            ContrastMode::Standard => "STANDARD",
            ContrastMode::Subdued => "SUBDUED",
        }
    }
}

/// How much of the panel to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefreshEffort {
    /// Full waveform, clears ghosting
    Full,
    /// Partial update of changed regions only
    Partial,
    /// No redraw
    None,
}

/// Refresh effort per reading scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshStrategy {
    /// Turning a page
    pub page_turn: RefreshEffort,
    /// Scrolling within a page
    pub scrolling: RefreshEffort,
    /// Nothing on screen changes
    pub idle: RefreshEffort,
}

impl RefreshStrategy {
    /// The strategy used for every reflective configuration.
    pub const READING: RefreshStrategy = RefreshStrategy {
        page_turn: RefreshEffort::Full,
        scrolling: RefreshEffort::Partial,
        idle: RefreshEffort::None,
    };
}

/// Ambient light level in lux.
///
/// Always a non-negative integer. Parsing accepts plain ASCII digits only:
/// signs, whitespace, decimals and anything that does not fit in a `u32` are
/// rejected.
///
/// # Example
///
/// ```
/// use reflective_display::AmbientLux;
///
/// let lux: AmbientLux = "250".parse().unwrap();
/// assert_eq!(lux.get(), 250);
///
/// assert!("-5".parse::<AmbientLux>().is_err());
/// assert!("12.5".parse::<AmbientLux>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct AmbientLux(u32);

impl AmbientLux {
    /// Wrap a lux value.
    pub const fn new(lux: u32) -> Self {
        Self(lux)
    }

    /// The lux value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for AmbientLux {
    fn from(lux: u32) -> Self {
        Self(lux)
    }
}

impl TryFrom<i64> for AmbientLux {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(Error::invalid_input(format!(
                "ambient lux must not be negative, got {}",
                value
            )));
        }
        u32::try_from(value).map(Self).map_err(|_| {
            Error::invalid_input(format!("ambient lux {} is out of range", value))
        })
    }
}

impl FromStr for AmbientLux {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_input(format!(
                "ambient lux must be a non-negative integer, got '{}'",
                s
            )));
        }
        if digits.len() != s.len() {
            return Err(Error::invalid_input(format!(
                "ambient lux must not be negative, got {}",
                s
            )));
        }
        s.parse().map(Self).map_err(|_| {
            Error::invalid_input(format!("ambient lux {} is out of range", s))
        })
    }
}

impl fmt::Display for AmbientLux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lx", self.0)
    }
}

/// Reflective configuration derived from an ambient light reading.
///
/// # Example
///
/// ```
/// use reflective_display::{reflective_config, ContrastMode};
///
/// let config = reflective_config(50u32);
/// assert_eq!(config.contrast_mode, ContrastMode::Maximum);
///
/// let json = serde_json::to_string(&config).unwrap();
/// assert_eq!(
///     json,
///     r#"{"contrastMode":"MAXIMUM","refreshStrategy":{"pageTurn":"FULL","scrolling":"PARTIAL","idle":"NONE"},"ambientLux":50}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectiveConfig {
    /// Contrast mode for the reading
    pub contrast_mode: ContrastMode,
    /// Refresh effort per scenario (constant)
    pub refresh_strategy: RefreshStrategy,
    /// The input reading, echoed back
    pub ambient_lux: AmbientLux,
}

/// Derive the reflective configuration for an ambient light reading.
///
/// Pure: the result depends only on `ambient_lux`.
pub fn reflective_config(ambient_lux: impl Into<AmbientLux>) -> ReflectiveConfig {
    let ambient_lux = ambient_lux.into();
    ReflectiveConfig {
        contrast_mode: ContrastMode::for_lux(ambient_lux.get()),
        refresh_strategy: RefreshStrategy::READING,
        ambient_lux,
    }
}

/// Owner of the device's light-emission settings.
///
/// One engine is shared by the whole server (the axum integration keeps it
/// behind a lock in its application state).
#[derive(Debug, Clone, Default)]
pub struct ReflectiveDisplayEngine {
    light: LightEmissionState,
}

impl ReflectiveDisplayEngine {
    /// Create an engine with all light sources off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine starting from a specific light state.
    ///
    /// Fails if the backlight level is above 100%.
    pub fn with_state(light: LightEmissionState) -> Result<Self, Error> {
        if light.screen_backlight > MAX_BACKLIGHT_PERCENT {
            return Err(Error::invalid_input(format!(
                "screen backlight must be between 0 and {}%, got {}%",
                MAX_BACKLIGHT_PERCENT, light.screen_backlight
            )));
        }
        Ok(Self { light })
    }

    /// Current light-emission settings.
    pub fn state(&self) -> LightEmissionState {
        self.light
    }

    /// Switch off every light source.
    ///
    /// The result is the same whatever the previous state was.
    pub fn disable_light_emission(&mut self) -> LightEmissionState {
        if self.light.is_emitting() {
            tracing::info!(
                "Disabling light emission (backlight was {}%, front light {})",
                self.light.screen_backlight,
                self.light.front_light.as_str()
            );
        }
        self.light = LightEmissionState::ALL_OFF;
        self.light
    }

    /// Flip the front light and return the new settings.
    pub fn toggle_front_light(&mut self) -> LightEmissionState {
        self.light.front_light = self.light.front_light.toggled();
        tracing::info!("Front light toggled: {}", self.light.front_light.as_str());
        self.light
    }

    /// Derive the reflective configuration for an ambient light reading.
    ///
    /// Does not read or modify the light-emission settings.
    pub fn configure_reflective_settings(
        &self,
        ambient_lux: impl Into<AmbientLux>,
    ) -> ReflectiveConfig {
        let config = reflective_config(ambient_lux);
        tracing::debug!(
            "Reflective settings for {}: contrast={}",
            config.ambient_lux,
            config.contrast_mode.as_str()
        );
        config
    }
}
