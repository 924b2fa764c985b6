use calc_eval::ctxt::Ctxt;
use crate::eval::Function;
use super::{point::{CanvasPoint, GraphPoint}, viewport::Viewport};

/// A continuous run of sampled points, to be drawn as a polyline.
pub type Segment = Vec<GraphPoint<f64>>;

/// Evaluates the function at the x-value of every pixel column of the canvas, from the left edge
/// to the right edge inclusive.
///
/// Columns where the function has no finite value break the curve: the points on either side
/// end up in different segments. Segments with a single point are kept, so isolated values can
/// still be drawn as dots.
pub fn sample(function: &Function, viewport: &Viewport) -> Vec<Segment> {
    let mut ctxt = Ctxt::default();
    let mut segments = Vec::new();
    let mut current = Segment::new();

    for column in 0..=viewport.canvas_size().0 {
        let x = viewport.x_to_graph(column as f64);
        match function.eval_with(&mut ctxt, x) {
            Some(y) => current.push(GraphPoint(x, y)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => (),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Maps sampled segments to canvas space.
pub fn to_canvas(segments: &[Segment], viewport: &Viewport) -> Vec<Vec<CanvasPoint<f64>>> {
    segments
        .iter()
        .map(|segment| segment.iter().map(|point| viewport.to_canvas(*point)).collect())
        .collect()
}

/// Returns the point of the function directly above or below the given pixel column, or
/// [`None`] if the function has no finite value there.
pub fn hover(function: &Function, viewport: &Viewport, canvas_x: f64) -> Option<GraphPoint<f64>> {
    let x = viewport.x_to_graph(canvas_x);
    function.eval_at(x).map(|y| GraphPoint(x, y))
}
