//! # reflective-display
//!
//! A small web API for reflective (e-ink) e-reader displays.
//!
//! Reflective panels are lit by the room, so the device should emit no light
//! of its own and adapt contrast to the ambient light instead. This crate
//! provides:
//! - A catalog of supported display panels
//! - A display engine that switches off light emission and picks a contrast
//!   mode from an ambient light reading
//! - Reading profiles (refresh speed/quality, paper texture)
//! - Optional axum router exposing all of the above as JSON
//! - Optional `reflectd` server binary
//!
//! ## Quick Start (axum)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reflective_display::axum_ext::{router, AppState};
//!
//! let app = router(Arc::new(AppState::default()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Contrast Modes
//!
//! | Ambient lux | Contrast mode |
//! |-------------|---------------|
//! | 0 - 100 | `MAXIMUM` |
//! | 101 - 1000 | `STANDARD` |
//! | above 1000 | `SUBDUED` |
//!
//! Every configuration uses the same refresh strategy: full refresh on page
//! turn, partial refresh while scrolling, no refresh when idle.
//!
//! ## Feature Flags
//!
//! - `axum` - Axum router, handlers and extractors
//! - `server` - `reflectd` binary (CLI, YAML config, log output)
//! - `full` - All features

mod catalog;
mod error;
mod page;
mod profile;
mod reflective;

pub use catalog::{list_displays, DisplayDescriptor};
pub use error::Error;
pub use page::render_index_page;
pub use profile::{
    FiberLevel, InkBleedLevel, PaperTexture, RefreshProfile, RefreshProfileTimings,
    PAPER_SCALE_MAX,
};
pub use reflective::{
    reflective_config, AmbientLux, AutoBrightness, ColorTemperature, ContrastMode, FrontLight,
    LightEmissionState, RefreshEffort, RefreshStrategy, ReflectiveConfig, ReflectiveDisplayEngine,
    MAX_BACKLIGHT_PERCENT,
};

/// Highest ambient lux that still gets `MAXIMUM` contrast
pub const MAXIMUM_CONTRAST_MAX_LUX: u32 = 100;

/// Highest ambient lux that still gets `STANDARD` contrast
pub const STANDARD_CONTRAST_MAX_LUX: u32 = 1000;

// Optional modules
#[cfg(feature = "axum")]
pub mod axum_ext;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub use config::ServerConfig;
