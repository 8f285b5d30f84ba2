//! Layout and angle math for the ring.
//!
//! Angles are in degrees with 0° pointing east and positive angles sweeping
//! clockwise, which matches a y-down screen coordinate system. The arc always
//! starts at [`START_ANGLE`] (twelve o'clock).

/// Start of the foreground arc: twelve o'clock.
pub const START_ANGLE: f32 = -90.0;

/// Sweeps beyond a full turn in either direction are clamped to this.
pub const MAX_SWEEP: f32 = 360.0;

/// An axis-aligned rectangle in float coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl RectF {
    /// Creates a rectangle from its four edges.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::geometry::RectF;
    ///
    /// let rect = RectF::new(5.0, 5.0, 95.0, 95.0);
    /// assert_eq!(rect.width(), 90.0);
    /// assert_eq!(rect.center_x(), 50.0);
    /// ```
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// True when the rectangle has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// Computes the measured side and the stroke-inset bounding rectangle.
///
/// The widget is always square: the side is the smaller of the two available
/// dimensions. The rectangle is inset by half the stroke on every side so the
/// stroke is not clipped.
///
/// ```rust
/// use bubbletea_ring::geometry::{compute_bounds, RectF};
///
/// let (side, rect) = compute_bounds(100.0, 120.0, 10.0);
/// assert_eq!(side, 100.0);
/// assert_eq!(rect, RectF::new(5.0, 5.0, 95.0, 95.0));
/// ```
pub fn compute_bounds(available_width: f32, available_height: f32, stroke_width: f32) -> (f32, RectF) {
    let side = available_width.min(available_height).max(0.0);
    let half = stroke_width / 2.0;
    (side, RectF::new(half, half, side - half, side - half))
}

/// Sweep angle in degrees for `progress` on a `0..maximum` scale.
///
/// The minimum does not take part in the math. A maximum of zero yields an
/// empty arc instead of dividing by zero. The result is not clamped.
pub fn sweep_angle(progress: f32, maximum: i32) -> f32 {
    if maximum == 0 {
        return 0.0;
    }
    360.0 * progress / maximum as f32
}

/// Clamps a sweep into `[-360, 360]` for renderers that do not wrap.
pub fn clamp_sweep(sweep: f32) -> f32 {
    if sweep.is_nan() {
        return 0.0;
    }
    sweep.clamp(-MAX_SWEEP, MAX_SWEEP)
}

/// Normalizes an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// True if `angle` lies on the arc that starts at `start` and sweeps `sweep`
/// degrees (negative sweeps go counter-clockwise).
pub fn angle_in_arc(angle: f32, start: f32, sweep: f32) -> bool {
    if sweep.abs() >= MAX_SWEEP {
        return true;
    }
    let (from, span) = if sweep >= 0.0 {
        (start, sweep)
    } else {
        (start + sweep, -sweep)
    };
    normalize_degrees(angle - from) <= span
}

/// Point on the ellipse inscribed in `rect` at `angle` degrees.
pub fn point_on_oval(rect: &RectF, angle: f32) -> (f32, f32) {
    let radians = angle.to_radians();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    (
        rx.mul_add(radians.cos(), rect.center_x()),
        ry.mul_add(radians.sin(), rect.center_y()),
    )
}
