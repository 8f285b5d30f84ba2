#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-ring/")]

//! # bubbletea-ring
//!
//! A circular progress indicator for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a background ring plus a foreground arc whose sweep follows a
//! progress value, optionally animated with an easing curve.
//!
//! ## Overview
//!
//! The ring follows the Elm Architecture like the other bubbletea widgets, with
//! `update()` and `view()` methods on its [`Model`](ring::Model). The drawing
//! and animation logic underneath is host-agnostic:
//!
//! - [`geometry`] computes the square bounds and the sweep angle
//! - [`canvas`] is the paint seam, with a terminal rasterizer built in
//! - [`animator`] tweens the progress value and reports start, completion
//!   and cancellation to an optional listener
//! - [`config`] holds the options and their defaults, and parses them from
//!   string attributes
//! - [`color`] provides ARGB colors and the `lighten` / `adjust_alpha` helpers
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_ring::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     ring: Ring,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut ring = ring_new(&[with_size(16.0, 16.0), with_color(Color::rgb(0x75, 0x71, 0xF9))]);
//!         let cmd = ring.animate_progress_to(75.0, None);
//!         (Self { ring }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.ring.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.ring.view()
//!     }
//! }
//! ```
//!
//! ## Listening to an animation
//!
//! ```rust
//! use bubbletea_ring::prelude::*;
//!
//! struct Done;
//!
//! impl ProgressListener for Done {
//!     fn on_progress_complete(&mut self) {
//!         println!("done");
//!     }
//! }
//!
//! let mut ring = ring_new(&[]);
//! let _cmd = ring.animate_progress_to(100.0, Some(Box::new(Done)));
//! ```

pub mod animator;
pub mod canvas;
pub mod color;
pub mod config;
pub mod easing;
pub mod geometry;
pub mod ring;

pub use animator::{AnimatorState, ProgressAnimator, ProgressListener};
pub use canvas::{Canvas, CellCanvas, Paint, StrokeCap};
pub use color::{adjust_alpha, lighten, Color, ColorParseError};
pub use config::{ConfigError, RingConfig};
pub use easing::Easing;
pub use geometry::{compute_bounds, sweep_angle, RectF};
pub use ring::{
    from_config as ring_from_config, new as ring_new, FrameMsg, Invalidation, Model as Ring,
    RingOption, RingProgressState,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_ring::prelude::*;
///
/// let ring = ring_new(&[with_max(200), with_progress(50.0)]);
/// assert_eq!(ring.sweep_angle(), 90.0);
/// ```
pub mod prelude {
    pub use crate::animator::{AnimatorState, ProgressListener};
    pub use crate::canvas::{Canvas, CellCanvas, Paint, StrokeCap};
    pub use crate::color::{adjust_alpha, lighten, Color};
    pub use crate::config::RingConfig;
    pub use crate::easing::Easing;
    pub use crate::geometry::RectF;
    pub use crate::ring::{
        from_config as ring_from_config, new as ring_new, with_color, with_colors, with_config,
        with_duration, with_max, with_min, with_progress, with_size, with_stroke_cap,
        with_stroke_width, FrameMsg, Model as Ring, RingOption,
    };
}
