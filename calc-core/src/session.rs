//! The event-driven calculator session consumed by a UI shell.

use chrono::Utc;
use crate::{
    classify::{classify, Classified},
    config::Config,
    eval::Failure,
    fmt::format_number,
    graph::{point::CanvasPoint, Graph},
    history::{History, Recall, ERR, GRAPH},
    persist::{self, BlobStore},
    trace::{display_expression, trace},
    variables::Variables,
};
use log::{debug, warn};

/// How the preview of the current input should be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    /// There is no input.
    Empty,

    /// The input evaluates to a number.
    Number,

    /// The input assigns a number to a variable.
    Assignment,

    /// The input is a function to graph.
    Graph,

    /// The input cannot be evaluated.
    Error,
}

/// The live preview of the current input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    /// The formatted result, the graphed body, or an empty string.
    pub value: String,

    /// How the preview should be displayed.
    pub kind: PreviewKind,
}

impl Preview {
    fn empty() -> Self {
        Self { value: String::new(), kind: PreviewKind::Empty }
    }

    fn of(classified: &Classified, precision: usize) -> Self {
        let (value, kind) = match classified {
            Classified::Empty => (String::new(), PreviewKind::Empty),
            Classified::Assignment { value: Ok(value), .. } => {
                (format_number(*value, precision), PreviewKind::Assignment)
            },
            Classified::Graph { body } => (body.clone(), PreviewKind::Graph),
            Classified::TrigNumeric(eval) | Classified::Plain(eval) => match eval.finite() {
                Some(value) => (format_number(value, precision), PreviewKind::Number),
                None => (String::new(), PreviewKind::Error),
            },
            Classified::Assignment { value: Err(_), .. } => (String::new(), PreviewKind::Error),
        };
        Self { value, kind }
    }
}

/// A semantic action sent by the shell.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Commit the given input.
    Submit(String),

    /// Discard the current input.
    Cancel,

    /// Recall the input of the next older history entry.
    RecallPrevious,

    /// Recall the input of the next newer history entry.
    RecallNext,

    /// The input was edited.
    TextChanged(String),

    /// Load the input of the history entry with the given id.
    SelectHistoryEntry(u64),

    /// Remove every history entry.
    ClearHistory,

    /// Remove every variable.
    ClearVariables,

    /// The pointer was pressed on the canvas.
    PointerDown(CanvasPoint<f64>),

    /// The pointer moved over the canvas.
    PointerMove(CanvasPoint<f64>),

    /// The pointer was released.
    PointerUp,

    /// The pointer left the canvas.
    PointerLeave,

    /// The mouse wheel turned by the given number of ticks. Negative values zoom in.
    Wheel(f64),

    ZoomIn,
    ZoomOut,

    /// Restore the pan offset and zoom level.
    ResetZoom,

    /// The canvas was resized to the given width and height, in pixels.
    Resize(u32, u32),
}

/// What the shell should show after handling an event.
#[derive(Debug)]
pub struct Response {
    /// The contents of the input box.
    pub input: String,

    /// The preview of the input.
    pub preview: Preview,

    /// The id of the history entry created by this event, if any.
    pub committed: Option<u64>,

    /// Why the committed input could not be evaluated, if the evaluator reported errors.
    pub failure: Option<Failure>,

    /// Whether the graph needs to be drawn again.
    pub redraw: bool,
}

/// An interactive calculator: the input box, history, variables and graph, persisted to a
/// [`BlobStore`] after every change.
#[derive(Debug)]
pub struct Calculator<S: BlobStore> {
    config: Config,
    store: S,
    history: History,
    variables: Variables,
    input: String,
    preview: Preview,
    recall: Recall,
    graph: Graph,
}

impl<S: BlobStore> Calculator<S> {
    /// Creates a calculator, loading the history and variables from the store.
    ///
    /// An invalid configuration is logged and replaced with the default one. Stored data that
    /// cannot be read is logged and replaced with empty data.
    pub fn new(config: Config, store: S) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!("{}, using the default configuration", err);
                Config::default()
            },
        };
        let history = persist::load_history(&store, &config.history_key, config.history_limit)
            .unwrap_or_else(|err| {
                warn!("could not load history: {}", err);
                History::new(config.history_limit)
            });
        let variables = persist::load_variables(&store, &config.variables_key)
            .unwrap_or_else(|err| {
                warn!("could not load variables: {}", err);
                Variables::new()
            });
        debug!("loaded {} history entries and {} variables", history.len(), variables.len());

        Self {
            graph: Graph::new(&config),
            config,
            store,
            history,
            variables,
            input: String::new(),
            preview: Preview::empty(),
            recall: Recall::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the blob store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the history, oldest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the variables.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Returns the contents of the input box.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the preview of the current input.
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Returns the recall cursor.
    pub fn recall(&self) -> Recall {
        self.recall
    }

    /// Returns the active graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Handles a single event to completion.
    pub fn handle(&mut self, event: Event) -> Response {
        let mut committed = None;
        let mut failure = None;
        let mut redraw = false;

        match event {
            Event::Submit(text) => {
                if let Some((id, err)) = self.commit(&text) {
                    committed = Some(id);
                    failure = err;
                    redraw = true;
                }
            },
            Event::Cancel => {
                self.recall.reset();
                self.set_input(String::new());
            },
            Event::RecallPrevious => {
                let recalled = self.recall
                    .previous(&self.history)
                    .map(|entry| entry.input().to_string());
                if let Some(input) = recalled {
                    redraw = self.set_input(input);
                }
            },
            Event::RecallNext if self.recall.cursor().is_some() => {
                let input = self.recall
                    .next(&self.history)
                    .map(|entry| entry.input().to_string())
                    .unwrap_or_default();
                redraw = self.set_input(input);
            },
            Event::RecallNext => (),
            Event::TextChanged(text) => redraw = self.set_input(text),
            Event::SelectHistoryEntry(id) => {
                if let Some(input) = self.history.get(id).map(|entry| entry.input().to_string()) {
                    redraw = self.set_input(input);
                }
            },
            Event::ClearHistory => {
                self.clear_history();
                redraw = true;
            },
            Event::ClearVariables => {
                self.clear_variables();
                redraw = true;
            },
            Event::PointerDown(position) => self.graph.pointer_down(position),
            Event::PointerMove(position) => {
                self.graph.pointer_move(position);
                redraw = true;
            },
            Event::PointerUp => self.graph.pointer_up(),
            Event::PointerLeave => {
                self.graph.pointer_leave();
                redraw = true;
            },
            Event::Wheel(ticks) => {
                let step = self.config.wheel_zoom_step;
                self.graph.zoom_by((1.0 - step * ticks.signum()).powf(ticks.abs()));
                redraw = true;
            },
            Event::ZoomIn => {
                self.graph.zoom_by(1.0 + self.config.zoom_step);
                redraw = true;
            },
            Event::ZoomOut => {
                self.graph.zoom_by(1.0 - self.config.zoom_step);
                redraw = true;
            },
            Event::ResetZoom => {
                self.graph.reset_zoom();
                redraw = true;
            },
            Event::Resize(width, height) => {
                self.graph.resize(width, height);
                redraw = true;
            },
        }

        Response {
            input: self.input.clone(),
            preview: self.preview.clone(),
            committed,
            failure,
            redraw,
        }
    }

    /// Replaces the input and updates the preview. If the input is a graph, it becomes the active
    /// graph. Returns true if the active graph changed.
    fn set_input(&mut self, input: String) -> bool {
        let classified = classify(&input, &self.variables, &self.history);
        self.preview = Preview::of(&classified, self.config.precision);
        self.input = input;

        match classified {
            Classified::Graph { body } => {
                self.graph.set_expression(&body, &self.variables, &self.history)
            },
            _ => false,
        }
    }

    /// Commits the input to the history, applying it if it is an assignment. Returns the id of
    /// the new entry and the evaluator's failure, if any, or [`None`] if the input is empty.
    fn commit(&mut self, text: &str) -> Option<(u64, Option<Failure>)> {
        let input = text.trim();
        let classified = classify(input, &self.variables, &self.history);
        let precision = self.config.precision;

        let (expression, result) = match &classified {
            Classified::Empty => return None,
            Classified::Assignment { name, value: Ok(value) } => {
                self.variables.set(*name, *value);
                self.save_variables();
                (input.to_string(), format_number(*value, precision))
            },
            Classified::Assignment { value: Err(_), .. } => (input.to_string(), ERR.to_string()),
            Classified::Graph { body } => {
                self.graph.set_expression(body, &self.variables, &self.history);
                (input.to_string(), GRAPH.to_string())
            },
            Classified::TrigNumeric(eval) | Classified::Plain(eval) => match eval.finite() {
                Some(value) => {
                    let steps = trace(input, &self.variables, &self.history, precision);
                    (display_expression(input, &steps), format_number(value, precision))
                },
                None => (input.to_string(), ERR.to_string()),
            },
        };

        let id = self.history.push(expression, result, Utc::now().timestamp_millis());
        debug!("committed `{}` as entry {}", input, id);
        self.save_history();

        self.recall.reset();
        self.input.clear();
        self.preview = Preview::empty();
        self.graph.recompile(&self.variables, &self.history);

        Some((id, classified.into_failure()))
    }

    /// Appends informational entries, each given as an `(expression, result)` pair. Returns the
    /// ids of the new entries.
    pub fn insert_info(&mut self, entries: &[(&str, &str)]) -> Vec<u64> {
        let timestamp = Utc::now().timestamp_millis();
        let ids = entries
            .iter()
            .map(|(expression, result)| self.history.push(*expression, *result, timestamp))
            .collect();
        self.save_history();
        self.graph.recompile(&self.variables, &self.history);
        ids
    }

    /// Removes every history entry.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.recall.reset();
        if let Err(err) = self.store.clear(&self.config.history_key) {
            warn!("could not clear history: {}", err);
        }
        self.graph.recompile(&self.variables, &self.history);
        self.refresh_preview();
    }

    /// Removes every variable.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
        if let Err(err) = self.store.clear(&self.config.variables_key) {
            warn!("could not clear variables: {}", err);
        }
        self.graph.recompile(&self.variables, &self.history);
        self.refresh_preview();
    }

    /// Evaluates the current input again, after the environment changed.
    fn refresh_preview(&mut self) {
        let classified = classify(&self.input, &self.variables, &self.history);
        self.preview = Preview::of(&classified, self.config.precision);
    }

    fn save_history(&mut self) {
        if let Err(err) = persist::save_history(&mut self.store, &self.config.history_key, &self.history) {
            warn!("could not save history: {}", err);
        }
    }

    fn save_variables(&mut self) {
        if let Err(err) = persist::save_variables(&mut self.store, &self.config.variables_key, &self.variables) {
            warn!("could not save variables: {}", err);
        }
    }
}
