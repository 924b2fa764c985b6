//! Graphing of functions of `x` on a pannable, zoomable viewport.
//!
//! The coordinate transforms in [`viewport`] and the sampling in [`sample`] are pure; a [`Graph`]
//! ties them to the active expression and the pointer state, and is driven by the events of a
//! [`Calculator`](crate::session::Calculator). Drawing is left to the shell, which receives
//! polylines in canvas coordinates.

pub mod interact;
pub mod point;
pub mod sample;
pub mod viewport;

use crate::{
    config::Config,
    eval::{Failure, Function},
    history::History,
    resolve::resolve,
    variables::Variables,
};
use interact::Interaction;
use log::debug;
use point::{CanvasPoint, GraphPoint};
use sample::Segment;
use viewport::Viewport;

/// The expression being graphed.
#[derive(Debug)]
struct Plot {
    /// The body as typed, before resolution.
    body: String,

    /// The resolved body, compiled.
    function: Result<Function, Failure>,
}

impl Plot {
    fn compile(body: &str, variables: &Variables, history: &History) -> Self {
        Self {
            body: body.to_string(),
            function: Function::compile(&resolve(body, variables, history)),
        }
    }
}

/// The active graph: the expression being plotted, the viewport and the pointer state.
#[derive(Debug)]
pub struct Graph {
    plot: Option<Plot>,
    viewport: Viewport,
    interaction: Interaction,
}

impl Graph {
    /// Creates a graph with nothing to plot.
    pub fn new(config: &Config) -> Self {
        Self {
            plot: None,
            viewport: Viewport::new(config),
            interaction: Interaction::default(),
        }
    }

    /// Sets the expression to graph. If the body differs from the current one, the viewport is
    /// reset to the origin at zoom level `1.0`. Returns true if the body changed.
    pub fn set_expression(&mut self, body: &str, variables: &Variables, history: &History) -> bool {
        let changed = self.body() != Some(body);
        if changed {
            debug!("graphing `{}`", body);
            self.viewport.reset();
        }
        self.plot = Some(Plot::compile(body, variables, history));
        changed
    }

    /// Resolves and compiles the current expression again, after variables or history changed.
    /// The viewport is kept.
    pub fn recompile(&mut self, variables: &Variables, history: &History) {
        if let Some(plot) = &mut self.plot {
            *plot = Plot::compile(&plot.body, variables, history);
        }
    }

    /// Returns the body of the graphed expression.
    pub fn body(&self) -> Option<&str> {
        self.plot.as_ref().map(|plot| plot.body.as_str())
    }

    /// Returns the compiled function, if there is an expression and it parsed successfully.
    pub fn function(&self) -> Option<&Function> {
        self.plot.as_ref().and_then(|plot| plot.function.as_ref().ok())
    }

    /// Returns why the graphed expression could not be parsed, if it could not.
    pub fn failure(&self) -> Option<&Failure> {
        self.plot.as_ref().and_then(|plot| plot.function.as_ref().err())
    }

    /// Returns the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the pointer state.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Samples the function across the canvas.
    pub fn curve(&self) -> Vec<Segment> {
        self.function()
            .map(|function| sample::sample(function, &self.viewport))
            .unwrap_or_default()
    }

    /// Samples the function across the canvas, in canvas coordinates.
    pub fn canvas_curve(&self) -> Vec<Vec<CanvasPoint<f64>>> {
        sample::to_canvas(&self.curve(), &self.viewport)
    }

    /// Returns the point of the function under the hovering pointer, if any.
    pub fn hovered(&self) -> Option<GraphPoint<f64>> {
        let position = self.interaction.hover()?;
        sample::hover(self.function()?, &self.viewport, position.0)
    }

    pub fn pointer_down(&mut self, position: CanvasPoint<f64>) {
        self.interaction.pointer_down(position);
    }

    /// Returns true if the viewport was panned.
    pub fn pointer_move(&mut self, position: CanvasPoint<f64>) -> bool {
        self.interaction.pointer_move(position, &mut self.viewport)
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// Multiplies the zoom level by `factor`, within the configured limits.
    pub fn zoom_by(&mut self, factor: f64) {
        self.viewport.zoom_by(factor);
        debug!("zoom level is now {}", self.viewport.zoom());
    }

    /// Restores the pan offset and zoom level.
    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    /// Changes the canvas size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }
}
