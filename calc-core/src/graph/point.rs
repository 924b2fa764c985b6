/// A pair of `(x, y)` values in **graph** units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphPoint<T>(pub T, pub T);

impl<T> From<(T, T)> for GraphPoint<T> {
    fn from((x, y): (T, T)) -> GraphPoint<T> {
        GraphPoint(x, y)
    }
}

/// A pair of `(x, y)` values in **canvas** units (pixels), with the origin at the top-left
/// corner and the y-axis pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasPoint<T>(pub T, pub T);

impl<T> From<(T, T)> for CanvasPoint<T> {
    fn from((x, y): (T, T)) -> CanvasPoint<T> {
        CanvasPoint(x, y)
    }
}

impl CanvasPoint<f64> {
    /// Returns the offset from `other` to this point.
    pub fn delta_from(self, other: CanvasPoint<f64>) -> CanvasPoint<f64> {
        CanvasPoint(self.0 - other.0, self.1 - other.1)
    }
}
