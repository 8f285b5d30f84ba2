//! Drawing seam between the ring and whatever host paints it.
//!
//! The ring only ever issues two calls per frame: [`Canvas::draw_oval`] for the
//! background track and [`Canvas::draw_arc`] for the foreground sweep. Hosts
//! with a real 2D surface implement [`Canvas`] directly; terminal programs use
//! [`CellCanvas`], which rasterizes both shapes onto a grid of colored cells.

use crate::color::Color;
use crate::geometry::{angle_in_arc, clamp_sweep, point_on_oval, RectF};
use lipgloss_extras::lipgloss::Style;

/// Shape drawn at both ends of the foreground arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    /// Flat end exactly at the arc endpoint.
    Butt,
    /// Half-disc end that extends past the endpoint by half the stroke.
    #[default]
    Round,
    /// Square end that extends past the endpoint by half the stroke.
    Square,
}

impl StrokeCap {
    /// Maps the integer attribute value (`0` butt, `1` round, `2` square).
    ///
    /// Returns `None` for any other value.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(StrokeCap::Butt),
            1 => Some(StrokeCap::Round),
            2 => Some(StrokeCap::Square),
            _ => None,
        }
    }
}

/// Stroke settings for one of the ring's two layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Stroke color.
    pub color: Color,
    /// Stroke thickness, centered on the path.
    pub stroke_width: f32,
    /// End shape for open paths; ignored for closed ovals.
    pub stroke_cap: StrokeCap,
}

impl Paint {
    /// Creates a stroke paint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::canvas::{Paint, StrokeCap};
    /// use bubbletea_ring::color::Color;
    ///
    /// let paint = Paint::new(Color::WHITE, 2.0, StrokeCap::Round);
    /// assert_eq!(paint.stroke_width, 2.0);
    /// ```
    pub fn new(color: Color, stroke_width: f32, stroke_cap: StrokeCap) -> Self {
        Self {
            color,
            stroke_width,
            stroke_cap,
        }
    }
}

/// A surface the ring can paint onto.
pub trait Canvas {
    /// Strokes the ellipse inscribed in `rect`.
    fn draw_oval(&mut self, rect: &RectF, paint: &Paint);

    /// Strokes the part of the inscribed ellipse from `start_angle` through
    /// `sweep_angle` degrees. The sweep is already clamped to `[-360, 360]`.
    fn draw_arc(&mut self, rect: &RectF, start_angle: f32, sweep_angle: f32, paint: &Paint);
}

/// A grid of terminal cells, each either empty or holding a color.
///
/// Cell `(col, row)` covers the unit square whose top-left corner is at
/// `(col, row)` in ring coordinates; a cell is painted when its center falls
/// inside the stroke. When rendered, each cell becomes two terminal columns
/// so the ring keeps its aspect ratio on typical fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct CellCanvas {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
}

impl CellCanvas {
    /// Characters used for one painted cell.
    pub const FILLED: &'static str = "██";
    /// Characters used for one empty cell.
    pub const EMPTY: &'static str = "  ";
    /// Largest grid side; larger requests are clamped to it.
    pub const MAX_SIDE: usize = 1024;

    /// Creates an empty grid of `width` by `height` cells, each clamped to
    /// [`MAX_SIDE`](Self::MAX_SIDE).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::canvas::CellCanvas;
    ///
    /// let canvas = CellCanvas::new(4, 3);
    /// assert_eq!((canvas.width(), canvas.height()), (4, 3));
    /// assert_eq!(canvas.cell(0, 0), None);
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.min(Self::MAX_SIDE);
        let height = height.min(Self::MAX_SIDE);
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Number of cell columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cell rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color of the cell at `(col, row)`, `None` if empty or out of range.
    pub fn cell(&self, col: usize, row: usize) -> Option<Color> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col]
    }

    /// Number of cells currently holding `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Renders the grid as styled lines joined with `\n`.
    ///
    /// Transparent colors render as empty cells since terminals cannot blend.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.height);
        for row in 0..self.height {
            let mut line = String::new();
            for col in 0..self.width {
                match self.cell(col, row) {
                    Some(color) if color.alpha() > 0 => {
                        let styled = Style::new()
                            .foreground(color.to_lipgloss())
                            .render(Self::FILLED);
                        line.push_str(&styled);
                    }
                    _ => line.push_str(Self::EMPTY),
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    // Visits every cell center lying within half a stroke of the circle
    // inscribed in `rect`, passing the cell index and its angle in degrees.
    fn for_each_stroke_cell(&mut self, rect: &RectF, paint: &Paint, mut f: impl FnMut(&mut Self, usize, f32)) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let radius = rect.width().min(rect.height()) / 2.0;
        if radius < 0.0 {
            return;
        }
        // Thin strokes would fall between cell centers.
        let half = (paint.stroke_width / 2.0).max(0.5);
        let (cx, cy) = (rect.center_x(), rect.center_y());

        for row in 0..self.height {
            for col in 0..self.width {
                let dx = col as f32 + 0.5 - cx;
                let dy = row as f32 + 0.5 - cy;
                let dist = dx.hypot(dy);
                if (dist - radius).abs() <= half {
                    let angle = dy.atan2(dx).to_degrees();
                    f(self, row * self.width + col, angle);
                }
            }
        }
    }

    // Cells within `radius` of `(x, y)` for round caps.
    fn paint_disc(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        for row in 0..self.height {
            for col in 0..self.width {
                let dx = col as f32 + 0.5 - x;
                let dy = row as f32 + 0.5 - y;
                if dx.hypot(dy) <= radius {
                    self.cells[row * self.width + col] = Some(color);
                }
            }
        }
    }
}

impl Canvas for CellCanvas {
    fn draw_oval(&mut self, rect: &RectF, paint: &Paint) {
        let color = paint.color;
        self.for_each_stroke_cell(rect, paint, |canvas, index, _| {
            canvas.cells[index] = Some(color);
        });
    }

    fn draw_arc(&mut self, rect: &RectF, start_angle: f32, sweep_angle: f32, paint: &Paint) {
        let sweep = clamp_sweep(sweep_angle);
        if sweep == 0.0 {
            return;
        }
        let color = paint.color;
        let radius = rect.width().min(rect.height()) / 2.0;

        // Square caps stretch the arc by half a stroke along the tangent.
        let (start, sweep) = if paint.stroke_cap == StrokeCap::Square && radius > 0.0 {
            let ext = (paint.stroke_width / 2.0 / radius).to_degrees();
            let dir = sweep.signum();
            (start_angle - ext * dir, sweep + 2.0 * ext * dir)
        } else {
            (start_angle, sweep)
        };

        self.for_each_stroke_cell(rect, paint, |canvas, index, angle| {
            if angle_in_arc(angle, start, sweep) {
                canvas.cells[index] = Some(color);
            }
        });

        if paint.stroke_cap == StrokeCap::Round && sweep.abs() < 360.0 {
            let half = paint.stroke_width / 2.0;
            let (x0, y0) = point_on_oval(rect, start_angle);
            let (x1, y1) = point_on_oval(rect, start_angle + sweep_angle.clamp(-360.0, 360.0));
            self.paint_disc(x0, y0, half, color);
            self.paint_disc(x1, y1, half, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute_bounds, START_ANGLE};

    const FG: Color = Color(0xFFFF0000);
    const BG: Color = Color(0xFF00FF00);

    fn ring(side: f32, stroke: f32) -> (CellCanvas, RectF) {
        let (side, rect) = compute_bounds(side, side, stroke);
        (CellCanvas::new(side as usize, side as usize), rect)
    }

    #[test]
    fn test_stroke_cap_from_index() {
        assert_eq!(StrokeCap::from_index(0), Some(StrokeCap::Butt));
        assert_eq!(StrokeCap::from_index(1), Some(StrokeCap::Round));
        assert_eq!(StrokeCap::from_index(2), Some(StrokeCap::Square));
        assert_eq!(StrokeCap::from_index(3), None);
        assert_eq!(StrokeCap::default(), StrokeCap::Round);
    }

    #[test]
    fn test_oval_is_hollow_and_symmetric() {
        let (mut canvas, rect) = ring(20.0, 2.0);
        canvas.draw_oval(&rect, &Paint::new(BG, 2.0, StrokeCap::Butt));

        assert_eq!(canvas.cell(10, 10), None);
        assert_eq!(canvas.cell(10, 1), Some(BG));
        assert_eq!(canvas.cell(10, 18), Some(BG));
        assert_eq!(canvas.cell(1, 10), Some(BG));
        assert_eq!(canvas.cell(18, 10), Some(BG));
        assert_eq!(canvas.cell(0, 0), None);
    }

    #[test]
    fn test_quarter_arc_covers_top_right() {
        let (mut canvas, rect) = ring(20.0, 2.0);
        canvas.draw_arc(&rect, START_ANGLE, 90.0, &Paint::new(FG, 2.0, StrokeCap::Butt));

        // upper right quadrant, on the stroke
        assert_eq!(canvas.cell(15, 3), Some(FG));
        // lower left quadrant is untouched
        assert_eq!(canvas.cell(4, 16), None);
        assert_eq!(canvas.cell(3, 4), None);
    }

    #[test]
    fn test_full_arc_matches_oval() {
        let (mut oval, rect) = ring(16.0, 3.0);
        let (mut arc, _) = ring(16.0, 3.0);
        let paint = Paint::new(FG, 3.0, StrokeCap::Butt);
        oval.draw_oval(&rect, &paint);
        arc.draw_arc(&rect, START_ANGLE, 360.0, &paint);
        assert_eq!(oval, arc);

        // overshoot is clamped to a single turn
        let (mut over, _) = ring(16.0, 3.0);
        over.draw_arc(&rect, START_ANGLE, 900.0, &paint);
        assert_eq!(oval, over);
    }

    #[test]
    fn test_zero_sweep_draws_nothing() {
        let (mut canvas, rect) = ring(16.0, 3.0);
        canvas.draw_arc(&rect, START_ANGLE, 0.0, &Paint::new(FG, 3.0, StrokeCap::Round));
        assert_eq!(canvas.count(FG), 0);
    }

    #[test]
    fn test_caps_extend_the_arc() {
        let (mut butt, rect) = ring(24.0, 3.0);
        let (mut round, _) = ring(24.0, 3.0);
        let (mut square, _) = ring(24.0, 3.0);
        butt.draw_arc(&rect, START_ANGLE, 90.0, &Paint::new(FG, 3.0, StrokeCap::Butt));
        round.draw_arc(&rect, START_ANGLE, 90.0, &Paint::new(FG, 3.0, StrokeCap::Round));
        square.draw_arc(&rect, START_ANGLE, 90.0, &Paint::new(FG, 3.0, StrokeCap::Square));

        assert!(round.count(FG) > butt.count(FG));
        assert!(square.count(FG) > butt.count(FG));
    }

    #[test]
    fn test_negative_sweep_goes_counter_clockwise() {
        let (mut canvas, rect) = ring(20.0, 2.0);
        canvas.draw_arc(&rect, START_ANGLE, -90.0, &Paint::new(FG, 2.0, StrokeCap::Butt));
        assert_eq!(canvas.cell(4, 3), Some(FG));
        assert_eq!(canvas.cell(15, 3), None);
    }

    #[test]
    fn test_render_dimensions() {
        let (mut canvas, rect) = ring(8.0, 2.0);
        canvas.draw_oval(&rect, &Paint::new(BG, 2.0, StrokeCap::Butt));
        let out = canvas.render();
        let plain = strip_ansi_escapes::strip_str(&out);

        let lines: Vec<&str> = plain.split('\n').collect();
        assert_eq!(lines.len(), 8);
        for line in lines {
            assert_eq!(line.chars().count(), 16);
        }
        assert!(plain.contains('█'));
    }

    #[test]
    fn test_transparent_cells_render_empty() {
        let (mut canvas, rect) = ring(8.0, 2.0);
        canvas.draw_oval(&rect, &Paint::new(Color::TRANSPARENT, 2.0, StrokeCap::Butt));
        let plain = strip_ansi_escapes::strip_str(canvas.render());
        assert!(!plain.contains('█'));
    }

    #[test]
    fn test_empty_canvas() {
        let mut canvas = CellCanvas::new(0, 0);
        canvas.draw_oval(&RectF::default(), &Paint::new(BG, 1.0, StrokeCap::Butt));
        assert_eq!(canvas.render(), "");
        assert_eq!(canvas.cell(0, 0), None);
    }

    #[test]
    fn test_new_clamps_dimensions() {
        let canvas = CellCanvas::new(usize::MAX, usize::MAX);
        assert_eq!(canvas.width(), CellCanvas::MAX_SIDE);
        assert_eq!(canvas.height(), CellCanvas::MAX_SIDE);
        assert_eq!(canvas.cell(CellCanvas::MAX_SIDE - 1, CellCanvas::MAX_SIDE - 1), None);

        let canvas = CellCanvas::new(3, usize::MAX);
        assert_eq!((canvas.width(), canvas.height()), (3, CellCanvas::MAX_SIDE));
    }
}
