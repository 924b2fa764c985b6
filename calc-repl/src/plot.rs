//! Text rendering of the active graph, one character per canvas cell.

use calc_core::graph::{point::CanvasPoint, Graph};
use std::fmt::Write;

const CURVE: char = '*';
const HOVER: char = 'o';
const AXIS_X: char = '-';
const AXIS_Y: char = '|';
const ORIGIN: char = '+';

/// Returns the cell containing the canvas point, if it is on the canvas.
fn cell(point: CanvasPoint<f64>, width: usize, height: usize) -> Option<(usize, usize)> {
    let (col, row) = (point.0.floor(), point.1.floor());
    if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
        return None;
    }
    Some((col as usize, row as usize))
}

/// Draws the axes, the curve and the hovered point of the graph.
pub fn render(graph: &Graph) -> String {
    let viewport = graph.viewport();
    let size = viewport.canvas_size();
    let (width, height) = (size.0 as usize, size.1 as usize);
    let mut cells = vec![vec![' '; width]; height];

    let origin = viewport.to_canvas((0.0, 0.0).into());
    if let Some((_, row)) = cell(CanvasPoint(0.0, origin.1), width, height) {
        cells[row].iter_mut().for_each(|c| *c = AXIS_X);
    }
    if let Some((col, _)) = cell(CanvasPoint(origin.0, 0.0), width, height) {
        cells.iter_mut().for_each(|line| line[col] = AXIS_Y);
    }
    if let Some((col, row)) = cell(origin, width, height) {
        cells[row][col] = ORIGIN;
    }

    for point in graph.canvas_curve().into_iter().flatten() {
        if let Some((col, row)) = cell(point, width, height) {
            cells[row][col] = CURVE;
        }
    }

    let hovered = graph.hovered();
    if let Some((col, row)) = hovered.and_then(|point| cell(viewport.to_canvas(point), width, height)) {
        cells[row][col] = HOVER;
    }

    let mut out = String::new();
    for line in cells {
        out.extend(line);
        out.push('\n');
    }

    let (min, max) = viewport.bounds();
    let _ = write!(
        out,
        "x: [{:.3}, {:.3}]  y: [{:.3}, {:.3}]  zoom: {:.2}  grid: {}",
        min.0, max.0, min.1, max.1, viewport.zoom(), viewport.grid_lines().spacing,
    );
    if let Some(point) = hovered {
        let _ = write!(out, "  hover: ({:.4}, {:.4})", point.0, point.1);
    }
    out
}

#[cfg(test)]
mod tests {
    use calc_core::{history::History, variables::Variables, Config};
    use super::*;

    fn graph(body: &str) -> Graph {
        let mut graph = Graph::new(&Config::default());
        graph.resize(21, 11);
        graph.set_expression(body, &Variables::new(), &History::new(100));
        graph
    }

    #[test]
    fn axes_cross_at_the_origin() {
        let plot = render(&graph("x +"));
        let lines = plot.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[5], format!("{}+{}", "-".repeat(10), "-".repeat(10)));
        assert_eq!(lines[0].chars().nth(10), Some('|'));
        assert!(lines[11].starts_with("x: [-10.000, 10.000]"));
        assert!(lines[11].ends_with("grid: 2"));
    }

    #[test]
    fn curve_is_drawn() {
        let plot = render(&graph("3"));
        let lines = plot.lines().collect::<Vec<_>>();

        // y = 3 sits 0.35 of the way down the 11 rows
        assert!(lines[3].chars().filter(|c| *c == '*').count() > 10);
        assert!(!lines[4].contains('*'));
    }
}
