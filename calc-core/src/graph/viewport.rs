use crate::config::Config;
use super::point::{CanvasPoint, GraphPoint};

/// The region of the graph that is visible on the canvas.
///
/// The viewport is square in graph units: it extends [`Viewport::range`] units from the pan
/// offset in every direction, and the range shrinks as the zoom level grows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// The point at the center of the canvas.
    ///
    /// The default value is `(0.0, 0.0)`.
    pub pan: GraphPoint<f64>,

    /// The zoom level, always within the configured limits.
    ///
    /// The default value is `1.0`.
    zoom: f64,

    /// The width and height of the canvas, in pixels. Both are at least `1`.
    canvas_size: CanvasPoint<u32>,

    /// The range at a zoom level of `1.0`.
    base_range: f64,

    /// The allowed zoom levels.
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Viewport {
    /// Creates a viewport centered on the origin, using the range and zoom limits of the given
    /// configuration and a `600 x 600` canvas.
    pub fn new(config: &Config) -> Self {
        Self {
            pan: GraphPoint(0.0, 0.0),
            zoom: 1.0,
            canvas_size: CanvasPoint(600, 600),
            base_range: config.base_range,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    /// Set the canvas size. Returns an updated [`Viewport`] for chaining.
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.resize(width, height);
        self
    }

    /// Returns the zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the canvas size, in pixels.
    pub fn canvas_size(&self) -> CanvasPoint<u32> {
        self.canvas_size
    }

    /// Returns the distance, in graph units, from the center of the viewport to its edges.
    pub fn range(&self) -> f64 {
        self.base_range / self.zoom
    }

    /// Returns the bottom-left and top-right corners of the visible region.
    pub fn bounds(&self) -> (GraphPoint<f64>, GraphPoint<f64>) {
        let range = self.range();
        (
            GraphPoint(self.pan.0 - range, self.pan.1 - range),
            GraphPoint(self.pan.0 + range, self.pan.1 + range),
        )
    }

    /// Changes the canvas size. Zero dimensions are raised to `1`.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas_size = CanvasPoint(width.max(1), height.max(1));
    }

    /// Multiplies the zoom level by `factor`, clamping it to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Restores the pan offset to the origin and the zoom level to `1.0`.
    pub fn reset(&mut self) {
        self.pan = GraphPoint(0.0, 0.0);
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }

    /// Moves the viewport so that the graph follows a pointer that moved by `delta` pixels.
    /// Non-finite deltas are ignored.
    pub fn pan_by_pixels(&mut self, delta: CanvasPoint<f64>) {
        if !delta.0.is_finite() || !delta.1.is_finite() {
            return;
        }

        let graph_space_range = self.range() * 2.0;
        // the canvas y-axis points down, the graph y-axis points up
        self.pan.0 -= delta.0 * graph_space_range / self.canvas_size.0 as f64;
        self.pan.1 += delta.1 * graph_space_range / self.canvas_size.1 as f64;
    }
}

impl Viewport {
    /// Converts an x-value in **graph** space to an x-value in **canvas** space.
    pub fn x_to_canvas(&self, x: f64) -> f64 {
        let graph_space_range = self.range() * 2.0;

        // normalize x-value to [0.0, 1.0], where 0.0 indicates left-edge of visible graph, 1.0
        // indicates right-edge of visible graph
        let normalized = (x - self.pan.0) / graph_space_range + 0.5;
        normalized * self.canvas_size.0 as f64
    }

    /// Converts a y-value in **graph** space to a y-value in **canvas** space.
    pub fn y_to_canvas(&self, y: f64) -> f64 {
        let graph_space_range = self.range() * 2.0;

        // flipped, so 0.0 is the top edge
        let normalized = 0.5 - (y - self.pan.1) / graph_space_range;
        normalized * self.canvas_size.1 as f64
    }

    /// Converts a point in **graph** space to **canvas** space.
    pub fn to_canvas(&self, point: GraphPoint<f64>) -> CanvasPoint<f64> {
        CanvasPoint(
            self.x_to_canvas(point.0),
            self.y_to_canvas(point.1),
        )
    }

    /// Converts an x-value in **canvas** space to an x-value in **graph** space.
    pub fn x_to_graph(&self, x: f64) -> f64 {
        let normalized = x / self.canvas_size.0 as f64;
        let left_edge_graph_space = self.pan.0 - self.range();
        normalized * self.range() * 2.0 + left_edge_graph_space
    }

    /// Converts a y-value in **canvas** space to a y-value in **graph** space.
    pub fn y_to_graph(&self, y: f64) -> f64 {
        // flipped, so 0.0 is the bottom edge
        let normalized = 1.0 - y / self.canvas_size.1 as f64;
        let bottom_edge_graph_space = self.pan.1 - self.range();
        normalized * self.range() * 2.0 + bottom_edge_graph_space
    }

    /// Converts a point in **canvas** space to **graph** space.
    pub fn to_graph(&self, point: CanvasPoint<f64>) -> GraphPoint<f64> {
        GraphPoint(
            self.x_to_graph(point.0),
            self.y_to_graph(point.1),
        )
    }
}

/// Positions of grid lines across the visible region.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLines {
    /// The distance between adjacent grid lines, in graph units.
    pub spacing: f64,

    /// The x-values of the vertical grid lines.
    pub x: Vec<f64>,

    /// The y-values of the horizontal grid lines.
    pub y: Vec<f64>,
}

/// Returns a spacing of `1`, `2` or `5` times a power of ten, close to `raw`.
fn nice_spacing(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Returns the multiples of `spacing` within `min..=max`.
fn ticks(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;
    (first..=last).map(|k| k as f64 * spacing).collect()
}

impl Viewport {
    /// The number of grid lines to aim for across the visible region.
    const TARGET_GRID_LINES: f64 = 10.0;

    /// Returns evenly spaced grid lines covering the visible region, at a "nice" spacing.
    pub fn grid_lines(&self) -> GridLines {
        let spacing = nice_spacing(self.range() * 2.0 / Self::TARGET_GRID_LINES);
        let (min, max) = self.bounds();
        GridLines {
            spacing,
            x: ticks(min.0, max.0, spacing),
            y: ticks(min.1, max.1, spacing),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn viewport() -> Viewport {
        let mut viewport = Viewport::default().with_canvas_size(465, 917);
        viewport.pan = GraphPoint(-3.0, 2.41);
        viewport.zoom_by(2.5);
        viewport
    }

    /// Test the conversion functions from canvas to graph space.
    #[test]
    fn canvas_to_graph() {
        let viewport = viewport();
        let (min, max) = viewport.bounds();

        assert_float_absolute_eq!(viewport.x_to_graph(0.0), min.0);
        assert_float_absolute_eq!(viewport.x_to_graph(465.0), max.0);
        assert_float_absolute_eq!(viewport.y_to_graph(0.0), max.1);
        assert_float_absolute_eq!(viewport.y_to_graph(917.0), min.1);
    }

    /// Test the conversion functions from graph to canvas space.
    #[test]
    fn graph_to_canvas() {
        let viewport = viewport();
        let (min, max) = viewport.bounds();

        assert_float_absolute_eq!(viewport.x_to_canvas(min.0), 0.0);
        assert_float_absolute_eq!(viewport.x_to_canvas(max.0), 465.0);
        assert_float_absolute_eq!(viewport.y_to_canvas(max.1), 0.0);
        assert_float_absolute_eq!(viewport.y_to_canvas(min.1), 917.0);

        let point = GraphPoint(1.25, -0.5);
        let back = viewport.to_graph(viewport.to_canvas(point));
        assert_float_absolute_eq!(back.0, point.0);
        assert_float_absolute_eq!(back.1, point.1);
    }

    #[test]
    fn range_follows_zoom() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.range(), 10.0);
        viewport.zoom_by(2.0);
        assert_eq!(viewport.range(), 5.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.zoom_by(1.2);
        }
        assert_eq!(viewport.zoom(), 10.0);
        for _ in 0..100 {
            viewport.zoom_by(0.8);
        }
        assert_eq!(viewport.zoom(), 0.1);

        viewport.pan = GraphPoint(4.0, -2.0);
        viewport.reset();
        assert_eq!(viewport.pan, GraphPoint(0.0, 0.0));
        assert_eq!(viewport.zoom(), 1.0);
    }

    #[test]
    fn dragging_moves_against_the_pointer() {
        let mut viewport = Viewport::default().with_canvas_size(200, 100);
        viewport.pan_by_pixels(CanvasPoint(20.0, 10.0));

        // 20 px of 200 px is a tenth of the 20 unit wide view
        assert_float_absolute_eq!(viewport.pan.0, -2.0);
        assert_float_absolute_eq!(viewport.pan.1, 2.0);
    }

    #[test]
    fn non_finite_drag_is_ignored() {
        let mut viewport = Viewport::default().with_canvas_size(200, 100);
        viewport.pan_by_pixels(CanvasPoint(f64::NAN, 10.0));
        viewport.pan_by_pixels(CanvasPoint(0.0, f64::INFINITY));
        assert_eq!(viewport.pan, GraphPoint(0.0, 0.0));
    }

    #[test]
    fn zero_sized_canvas() {
        let viewport = Viewport::default().with_canvas_size(0, 0);
        assert_eq!(viewport.canvas_size(), CanvasPoint(1, 1));
        assert!(viewport.x_to_graph(0.5).is_finite());
    }

    #[test]
    fn grid_lines() {
        let grid = Viewport::default().grid_lines();
        assert_eq!(grid.spacing, 2.0);
        assert_eq!(grid.x.first(), Some(&-10.0));
        assert_eq!(grid.x.last(), Some(&10.0));
        assert_eq!(grid.x.len(), 11);

        let mut viewport = Viewport::default();
        viewport.zoom_by(4.0);
        viewport.pan = GraphPoint(0.3, 0.0);
        let grid = viewport.grid_lines();
        assert_eq!(grid.spacing, 0.5);
        assert!(grid.x.iter().all(|x| (-2.2..=2.8).contains(x)));
    }
}
