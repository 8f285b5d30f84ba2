//! Ring progress component for Bubble Tea applications.
//!
//! The ring draws a full background track and a foreground arc that starts at
//! twelve o'clock and sweeps clockwise in proportion to `progress / maximum`.
//! Progress can be set directly or animated with an easing curve.
//!
//! The component is split in two layers:
//!
//! - [`RingProgressState`] holds style, range and progress and knows nothing
//!   about terminals or frames. Every setter records what it invalidated.
//! - [`Model`] binds that state to bubbletea-rs: it measures itself, paints
//!   onto any [`Canvas`], renders a string view and drives animations from
//!   [`FrameMsg`] ticks.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_ring::ring::{new, with_max, with_progress, with_size};
//!
//! let ring = new(&[with_size(20.0, 20.0), with_max(200), with_progress(50.0)]);
//! assert_eq!(ring.sweep_angle(), 90.0);
//! println!("{}", ring.view());
//! ```
//!
//! # Animation
//!
//! ```rust
//! use bubbletea_ring::ring::new;
//!
//! let mut ring = new(&[]);
//! // Returns the first frame command; hand it to the bubbletea runtime.
//! let _cmd = ring.animate_progress_to(80.0, None);
//! assert!(ring.is_animating());
//!
//! ring.reset_progress();
//! assert!(!ring.is_animating());
//! assert_eq!(ring.progress(), 0.0);
//! ```

use crate::animator::{AnimatorState, ProgressAnimator, ProgressListener};
use crate::canvas::{Canvas, CellCanvas, Paint, StrokeCap};
use crate::color::Color;
use crate::config::{floor_duration, RingConfig};
use crate::easing::Easing;
use crate::geometry::{clamp_sweep, compute_bounds, sweep_angle, RectF, START_ANGLE};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for ring instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;
/// Side, in cells, used until the host reports a size.
pub const DEFAULT_SIZE: f32 = 12.0;

/// What a state change requires the host to redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    /// The ring must be painted again.
    pub repaint: bool,
    /// The ring must be measured again before painting.
    pub layout: bool,
}

impl Invalidation {
    /// True if nothing needs to be redone.
    pub fn is_clean(&self) -> bool {
        !self.repaint && !self.layout
    }
}

/// Style, range and progress of a ring, independent of any host.
#[derive(Debug, Clone, PartialEq)]
pub struct RingProgressState {
    progress: f32,
    stroke_width: f32,
    stroke_cap: StrokeCap,
    minimum: i32,
    maximum: i32,
    duration_ms: u32,
    color: Color,
    background_color: Color,
    invalidation: Invalidation,
}

impl RingProgressState {
    /// Builds state from `config`, flooring its duration.
    pub fn new(config: &RingConfig) -> Self {
        let mut state = Self {
            progress: 0.0,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Round,
            minimum: 0,
            maximum: 0,
            duration_ms: 0,
            color: Color::DARK_GRAY,
            background_color: Color::LIGHT_GRAY,
            invalidation: Invalidation::default(),
        };
        state.configure(config);
        state.invalidation = Invalidation::default();
        state
    }

    /// Replaces every option with the values of `config`.
    pub fn configure(&mut self, config: &RingConfig) {
        self.progress = config.progress;
        self.stroke_width = config.stroke_width;
        self.stroke_cap = config.stroke_cap;
        self.minimum = config.minimum;
        self.maximum = config.maximum;
        self.duration_ms = floor_duration(config.duration_ms as i64);
        self.color = config.color;
        self.background_color = config.background_color;
        if config.maximum == 0 {
            tracing::warn!("ring maximum is 0, the arc will stay empty");
        }
        self.invalidate(true);
    }

    /// Snapshot of the current options.
    pub fn config(&self) -> RingConfig {
        RingConfig {
            stroke_width: self.stroke_width,
            stroke_cap: self.stroke_cap,
            progress: self.progress,
            color: self.color,
            background_color: self.background_color,
            minimum: self.minimum,
            maximum: self.maximum,
            duration_ms: self.duration_ms,
        }
    }

    /// Sets the raw progress value. Not clamped; only requests a repaint.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
        self.invalidate(false);
    }

    /// Current raw progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Sets the thickness of both layers. Bounds depend on it, so this also
    /// requests a layout pass.
    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        self.stroke_width = stroke_width;
        self.invalidate(true);
    }

    /// Current stroke thickness.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Sets the arc end shape. Takes effect on the next paint.
    pub fn set_stroke_cap(&mut self, stroke_cap: StrokeCap) {
        self.stroke_cap = stroke_cap;
    }

    /// Current arc end shape.
    pub fn stroke_cap(&self) -> StrokeCap {
        self.stroke_cap
    }

    /// Sets the range minimum. It is kept for callers and does not affect the sweep.
    pub fn set_minimum(&mut self, minimum: i32) {
        self.minimum = minimum;
        self.invalidate(false);
    }

    /// Range minimum.
    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    /// Sets the value a full turn represents. Zero leaves the arc empty.
    pub fn set_maximum(&mut self, maximum: i32) {
        if maximum == 0 {
            tracing::warn!("ring maximum set to 0, the arc will stay empty");
        }
        self.maximum = maximum;
        self.invalidate(false);
    }

    /// Range maximum.
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Stores the animation duration, raised to at least 500ms.
    pub fn set_progress_duration(&mut self, duration_ms: i32) {
        self.duration_ms = floor_duration(duration_ms as i64);
    }

    /// Animation duration in milliseconds.
    pub fn progress_duration(&self) -> u32 {
        self.duration_ms
    }

    /// Sets the foreground and resets the background to light gray.
    pub fn set_color(&mut self, color: Color) {
        self.set_colors(color, Color::LIGHT_GRAY);
    }

    /// Sets both the foreground and background colors.
    pub fn set_colors(&mut self, color: Color, background_color: Color) {
        self.color = color;
        self.background_color = background_color;
        self.invalidate(true);
    }

    /// Foreground arc color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Background ring color.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Paint for the foreground arc.
    pub fn foreground_paint(&self) -> Paint {
        Paint::new(self.color, self.stroke_width, self.stroke_cap)
    }

    /// Paint for the background track. A closed oval has no ends, so the cap
    /// is irrelevant.
    pub fn background_paint(&self) -> Paint {
        Paint::new(self.background_color, self.stroke_width, StrokeCap::Butt)
    }

    /// Current sweep in degrees, `360 * progress / maximum`, unclamped.
    pub fn sweep_angle(&self) -> f32 {
        sweep_angle(self.progress, self.maximum)
    }

    /// Pending invalidation, without clearing it.
    pub fn invalidation(&self) -> Invalidation {
        self.invalidation
    }

    /// Returns and clears the pending invalidation.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    fn invalidate(&mut self, layout: bool) {
        self.invalidation.repaint = true;
        self.invalidation.layout |= layout;
    }
}

impl Default for RingProgressState {
    fn default() -> Self {
        Self::new(&RingConfig::default())
    }
}

/// Configuration options for a ring, applied in order by [`new`].
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_colors, with_stroke_width};
/// use bubbletea_ring::color::Color;
///
/// let ring = new(&[
///     with_stroke_width(2.0),
///     with_colors(Color::rgb(0x75, 0x71, 0xF9), Color::rgb(0x60, 0x60, 0x60)),
/// ]);
/// assert_eq!(ring.stroke_width(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub enum RingOption {
    /// Replaces every option with the given config.
    WithConfig(RingConfig),
    /// Ring thickness in cells.
    WithStrokeWidth(f32),
    /// End shape of the foreground arc.
    WithStrokeCap(StrokeCap),
    /// Initial raw progress.
    WithProgress(f32),
    /// Foreground color; the background resets to light gray.
    WithColor(Color),
    /// Foreground and background colors.
    WithColors(Color, Color),
    /// Range minimum.
    WithMin(i32),
    /// Range maximum.
    WithMax(i32),
    /// Animation duration in milliseconds, floored to 500.
    WithDuration(i32),
    /// Available width and height in cells.
    WithSize(f32, f32),
}

impl RingOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RingOption::WithConfig(config) => m.configure(config),
            RingOption::WithStrokeWidth(w) => m.set_stroke_width(*w),
            RingOption::WithStrokeCap(cap) => m.set_stroke_cap(*cap),
            RingOption::WithProgress(p) => m.set_progress(*p),
            RingOption::WithColor(c) => m.set_color(*c),
            RingOption::WithColors(fg, bg) => m.set_colors(*fg, *bg),
            RingOption::WithMin(n) => m.set_minimum(*n),
            RingOption::WithMax(n) => m.set_maximum(*n),
            RingOption::WithDuration(ms) => m.set_progress_duration(*ms),
            RingOption::WithSize(w, h) => {
                m.resize(*w, *h);
            }
        }
    }
}

/// Creates an option that replaces every setting with `config`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_config};
/// use bubbletea_ring::config::RingConfig;
///
/// let ring = new(&[with_config(RingConfig { maximum: 200, ..RingConfig::default() })]);
/// assert_eq!(ring.maximum(), 200);
/// ```
pub fn with_config(config: RingConfig) -> RingOption {
    RingOption::WithConfig(config)
}

/// Creates an option that sets the ring thickness.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_stroke_width};
///
/// let ring = new(&[with_stroke_width(5.0)]);
/// assert_eq!(ring.stroke_width(), 5.0);
/// ```
pub fn with_stroke_width(w: f32) -> RingOption {
    RingOption::WithStrokeWidth(w)
}

/// Creates an option that sets the arc end shape.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_stroke_cap};
/// use bubbletea_ring::canvas::StrokeCap;
///
/// let ring = new(&[with_stroke_cap(StrokeCap::Square)]);
/// assert_eq!(ring.stroke_cap(), StrokeCap::Square);
/// ```
pub fn with_stroke_cap(cap: StrokeCap) -> RingOption {
    RingOption::WithStrokeCap(cap)
}

/// Creates an option that sets the initial raw progress.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_progress};
///
/// let ring = new(&[with_progress(25.0)]);
/// assert_eq!(ring.sweep_angle(), 90.0);
/// ```
pub fn with_progress(p: f32) -> RingOption {
    RingOption::WithProgress(p)
}

/// Creates an option that sets the foreground color and resets the background to light gray.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_color};
/// use bubbletea_ring::color::Color;
///
/// let ring = new(&[with_color(Color::WHITE)]);
/// assert_eq!(ring.background_color(), Color::LIGHT_GRAY);
/// ```
pub fn with_color(color: Color) -> RingOption {
    RingOption::WithColor(color)
}

/// Creates an option that sets both colors.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_colors};
/// use bubbletea_ring::color::Color;
///
/// let ring = new(&[with_colors(Color::WHITE, Color::BLACK)]);
/// assert_eq!(ring.background_color(), Color::BLACK);
/// ```
pub fn with_colors(color: Color, background_color: Color) -> RingOption {
    RingOption::WithColors(color, background_color)
}

/// Creates an option that sets the range minimum.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_min};
///
/// let ring = new(&[with_min(10)]);
/// assert_eq!(ring.minimum(), 10);
/// ```
pub fn with_min(n: i32) -> RingOption {
    RingOption::WithMin(n)
}

/// Creates an option that sets the range maximum.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_max};
///
/// let ring = new(&[with_max(200)]);
/// assert_eq!(ring.maximum(), 200);
/// ```
pub fn with_max(n: i32) -> RingOption {
    RingOption::WithMax(n)
}

/// Creates an option that sets the animation duration, floored to 500ms.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_duration};
///
/// let ring = new(&[with_duration(100)]);
/// assert_eq!(ring.progress_duration(), 500);
/// ```
pub fn with_duration(ms: i32) -> RingOption {
    RingOption::WithDuration(ms)
}

/// Creates an option that measures the ring for the given space, in cells.
///
/// # Examples
///
/// ```rust
/// use bubbletea_ring::ring::{new, with_size};
///
/// let ring = new(&[with_size(30.0, 20.0)]);
/// assert_eq!(ring.side(), 20.0);
/// ```
pub fn with_size(width: f32, height: f32) -> RingOption {
    RingOption::WithSize(width, height)
}

/// Message that advances a running animation by one frame.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    /// Ring the frame belongs to.
    pub id: i64,
    tag: i64,
}

/// The ring component.
#[derive(Debug)]
pub struct Model {
    id: i64,
    // Bumped for every new session and on reset so in-flight frames of an
    // older session are dropped.
    tag: i64,
    state: RingProgressState,
    animator: ProgressAnimator,
    available: (f32, f32),
    side: f32,
    bounds: RectF,
}

/// Creates a ring with the default config, then applies `opts` in order.
pub fn new(opts: &[RingOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        state: RingProgressState::default(),
        animator: ProgressAnimator::new(),
        available: (DEFAULT_SIZE, DEFAULT_SIZE),
        side: 0.0,
        bounds: RectF::default(),
    };
    m.resize(DEFAULT_SIZE, DEFAULT_SIZE);

    for opt in opts {
        opt.apply(&mut m);
    }
    m.state.take_invalidation();
    m
}

/// Creates a ring from a config, as a host would from parsed attributes.
pub fn from_config(config: &RingConfig) -> Model {
    new(&[with_config(*config)])
}

impl Model {
    /// Unique identifier used to route [`FrameMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Pure state behind this ring.
    pub fn state(&self) -> &RingProgressState {
        &self.state
    }

    /// Applies a full config. Does not touch a running animation.
    pub fn configure(&mut self, config: &RingConfig) {
        self.state.configure(config);
        self.relayout();
    }

    /// Sets the thickness of both layers and recomputes the bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::geometry::RectF;
    /// use bubbletea_ring::ring::{new, with_size};
    ///
    /// let mut ring = new(&[with_size(100.0, 100.0)]);
    /// ring.set_stroke_width(10.0);
    /// assert_eq!(ring.bounds(), RectF::new(5.0, 5.0, 95.0, 95.0));
    /// ```
    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        self.state.set_stroke_width(stroke_width);
        self.relayout();
    }

    /// Current stroke thickness.
    pub fn stroke_width(&self) -> f32 {
        self.state.stroke_width()
    }

    /// Sets the arc end shape. No repaint is requested.
    pub fn set_stroke_cap(&mut self, stroke_cap: StrokeCap) {
        self.state.set_stroke_cap(stroke_cap);
    }

    /// Current arc end shape.
    pub fn stroke_cap(&self) -> StrokeCap {
        self.state.stroke_cap()
    }

    /// Sets the range minimum and requests a repaint.
    pub fn set_minimum(&mut self, minimum: i32) {
        self.state.set_minimum(minimum);
    }

    /// Range minimum.
    pub fn minimum(&self) -> i32 {
        self.state.minimum()
    }

    /// Sets the range maximum and requests a repaint. Zero leaves the arc empty.
    pub fn set_maximum(&mut self, maximum: i32) {
        self.state.set_maximum(maximum);
    }

    /// Range maximum.
    pub fn maximum(&self) -> i32 {
        self.state.maximum()
    }

    /// Sets the animation duration, raised to at least 500ms.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::ring::new;
    ///
    /// let mut ring = new(&[]);
    /// ring.set_progress_duration(200);
    /// assert_eq!(ring.progress_duration(), 500);
    /// ring.set_progress_duration(1500);
    /// assert_eq!(ring.progress_duration(), 1500);
    /// ```
    pub fn set_progress_duration(&mut self, duration_ms: i32) {
        self.state.set_progress_duration(duration_ms);
    }

    /// Animation duration in milliseconds.
    pub fn progress_duration(&self) -> u32 {
        self.state.progress_duration()
    }

    /// Sets the foreground color and resets the background to light gray.
    pub fn set_color(&mut self, color: Color) {
        self.state.set_color(color);
        self.relayout();
    }

    /// Sets both the foreground and background colors.
    pub fn set_colors(&mut self, color: Color, background_color: Color) {
        self.state.set_colors(color, background_color);
        self.relayout();
    }

    /// Foreground arc color.
    pub fn color(&self) -> Color {
        self.state.color()
    }

    /// Background ring color.
    pub fn background_color(&self) -> Color {
        self.state.background_color()
    }

    /// Sets the raw progress. This is also the path every animation frame
    /// takes.
    pub fn set_progress(&mut self, progress: f32) {
        self.state.set_progress(progress);
    }

    /// Current raw progress.
    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    /// Current sweep in degrees, `360 * progress / maximum`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::ring::{new, with_max, with_progress};
    ///
    /// let ring = new(&[with_max(200), with_progress(50.0)]);
    /// assert_eq!(ring.sweep_angle(), 90.0);
    /// ```
    pub fn sweep_angle(&self) -> f32 {
        self.state.sweep_angle()
    }

    /// Returns and clears what changed since the last call.
    pub fn take_invalidation(&mut self) -> Invalidation {
        self.state.take_invalidation()
    }

    /// Measures the ring for the available space and returns its side.
    ///
    /// The ring is always square. Sizes are in cells; each cell renders as
    /// two terminal columns, so a host passing terminal columns should halve
    /// them first. Non-finite sizes measure as zero and the side never
    /// exceeds [`CellCanvas::MAX_SIDE`].
    pub fn resize(&mut self, width: f32, height: f32) -> f32 {
        self.available = (width, height);
        let fit = |v: f32| {
            if v.is_finite() {
                v.clamp(0.0, CellCanvas::MAX_SIDE as f32)
            } else {
                0.0
            }
        };
        let (side, bounds) = compute_bounds(fit(width), fit(height), self.state.stroke_width());
        self.side = side;
        self.bounds = bounds;
        side
    }

    /// Measured side in cells.
    pub fn side(&self) -> f32 {
        self.side
    }

    /// Stroke-inset rectangle the ring is drawn in.
    pub fn bounds(&self) -> RectF {
        self.bounds
    }

    /// Paints the background track, then the foreground arc.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_oval(&self.bounds, &self.state.background_paint());
        canvas.draw_arc(
            &self.bounds,
            START_ANGLE,
            clamp_sweep(self.sweep_angle()),
            &self.state.foreground_paint(),
        );
    }

    /// Animates progress to `target` over the configured duration with the
    /// decelerate curve and returns the first frame command.
    pub fn animate_progress_to(&mut self, target: f32, listener: Option<Box<dyn ProgressListener>>) -> Cmd {
        let duration = Duration::from_millis(self.state.progress_duration() as u64);
        self.start_animation(target, duration, Easing::decelerate(), listener)
    }

    /// Like [`animate_progress_to`](Self::animate_progress_to) with an
    /// explicit duration (floored to 500ms) and curve.
    ///
    /// A running animation is superseded: its listener is told it was
    /// cancelled and the new one starts from the current progress.
    pub fn animate_progress_to_with(
        &mut self,
        target: f32,
        duration_ms: i32,
        easing: Easing,
        listener: Option<Box<dyn ProgressListener>>,
    ) -> Cmd {
        let duration = Duration::from_millis(floor_duration(duration_ms as i64) as u64);
        self.start_animation(target, duration, easing, listener)
    }

    fn start_animation(
        &mut self,
        target: f32,
        duration: Duration,
        easing: Easing,
        listener: Option<Box<dyn ProgressListener>>,
    ) -> Cmd {
        self.tag += 1;
        self.animator
            .start(self.state.progress(), target, duration, easing, listener);
        self.next_frame()
    }

    /// Cancels any animation and sets progress to zero.
    ///
    /// Only a running session moves to [`AnimatorState::Cancelled`] and
    /// notifies its listener. An idle or completed animator keeps its state,
    /// so [`animator_state`](Self::animator_state) still reports the outcome
    /// of the last session.
    pub fn reset_progress(&mut self) {
        self.tag += 1;
        self.animator.cancel();
        self.state.set_progress(0.0);
    }

    /// True while an animation session is playing.
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Lifecycle state of the animator.
    pub fn animator_state(&self) -> AnimatorState {
        self.animator.state()
    }

    /// A frame message addressed to this ring's current animation.
    pub fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Advances a running animation on [`FrameMsg`] and schedules the next
    /// frame while it keeps running. Other messages are ignored.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        if let Some(frame_msg) = msg.downcast_ref::<FrameMsg>() {
            if frame_msg.id != self.id || frame_msg.tag != self.tag {
                return None;
            }

            let state = &mut self.state;
            let status = self
                .animator
                .advance(Self::frame_period(), &mut |v| state.set_progress(v));

            if status == AnimatorState::Running {
                return Some(self.next_frame());
            }
        }

        None
    }

    /// Renders the ring as styled text, one line per cell row.
    pub fn view(&self) -> String {
        let side = self.side.max(0.0).round() as usize;
        let mut canvas = CellCanvas::new(side, side);
        self.render(&mut canvas);
        canvas.render()
    }

    fn relayout(&mut self) {
        let (width, height) = self.available;
        self.resize(width, height);
    }

    fn frame_period() -> Duration {
        Duration::from_nanos(1_000_000_000 / FPS as u64)
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(Self::frame_period(), move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let model = new(&[]);
        (model, std::option::Option::None)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
