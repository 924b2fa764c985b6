use serde::{Deserialize, Serialize};
use std::fmt;

/// The most significant digits an `f64` can carry.
pub const MAX_PRECISION: usize = 17;

/// A [`Config`] field holding a value outside its allowed range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidConfig {
    /// The name of the field.
    pub field: &'static str,

    /// What the value of the field must be.
    pub expected: &'static str,
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid `{}`: expected {}", self.field, self.expected)
    }
}

impl std::error::Error for InvalidConfig {}

/// Options controlling the behavior of a [`Calculator`](crate::session::Calculator).
///
/// Every field can be omitted when deserializing, in which case the default value is used.
/// Deserialized or hand-built values should be checked with [`Config::validate`]; a
/// [`Calculator`](crate::session::Calculator) falls back to the default configuration if they
/// are invalid.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The maximum number of history entries to keep. The oldest entries are dropped first.
    ///
    /// The default value is `100`.
    pub history_limit: usize,

    /// The number of significant digits used when formatting results.
    ///
    /// The default value is `14`.
    pub precision: usize,

    /// The distance, in graph units, from the center of the viewport to its edge at a zoom level
    /// of `1.0`.
    ///
    /// The default value is `10.0`.
    pub base_range: f64,

    /// The smallest allowed zoom level.
    ///
    /// The default value is `0.1`.
    pub min_zoom: f64,

    /// The largest allowed zoom level.
    ///
    /// The default value is `10.0`.
    pub max_zoom: f64,

    /// The relative change in zoom level of a single zoom in / zoom out action. Zooming in
    /// multiplies the zoom level by `1 + zoom_step`, zooming out by `1 - zoom_step`.
    ///
    /// The default value is `0.2`.
    pub zoom_step: f64,

    /// The relative change in zoom level of a single mouse wheel tick.
    ///
    /// The default value is `0.05`.
    pub wheel_zoom_step: f64,

    /// The key under which the history is persisted.
    ///
    /// The default value is `"calculator-history"`.
    pub history_key: String,

    /// The key under which the variables are persisted.
    ///
    /// The default value is `"calculator-variables"`.
    pub variables_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: 100,
            precision: 14,
            base_range: 10.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 0.2,
            wheel_zoom_step: 0.05,
            history_key: "calculator-history".to_string(),
            variables_key: "calculator-variables".to_string(),
        }
    }
}

impl Config {
    /// Set the maximum number of history entries. Returns an updated [`Config`] for chaining.
    pub fn history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Set the number of significant digits of results. Returns an updated [`Config`] for
    /// chaining.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the visible range at a zoom level of `1.0`. Returns an updated [`Config`] for chaining.
    pub fn base_range(mut self, base_range: f64) -> Self {
        self.base_range = base_range;
        self
    }

    /// Set the allowed range of zoom levels. Returns an updated [`Config`] for chaining.
    pub fn zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Set the relative zoom step of buttons and of the mouse wheel. Returns an updated
    /// [`Config`] for chaining.
    pub fn zoom_steps(mut self, zoom_step: f64, wheel_zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self.wheel_zoom_step = wheel_zoom_step;
        self
    }

    /// Set the keys under which history and variables are persisted. Returns an updated
    /// [`Config`] for chaining.
    pub fn keys(mut self, history_key: impl Into<String>, variables_key: impl Into<String>) -> Self {
        self.history_key = history_key.into();
        self.variables_key = variables_key.into();
        self
    }

    /// Checks that every field is within its allowed range, returning the first field that is not.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let check = |valid: bool, field, expected| {
            if valid {
                Ok(())
            } else {
                Err(InvalidConfig { field, expected })
            }
        };

        check(self.history_limit > 0, "history_limit", "at least 1")?;
        check((1..=MAX_PRECISION).contains(&self.precision), "precision", "between 1 and 17")?;
        check(self.base_range.is_finite() && self.base_range > 0.0, "base_range", "a positive number")?;
        check(self.min_zoom.is_finite() && self.min_zoom > 0.0, "min_zoom", "a positive number")?;
        check(
            self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom,
            "max_zoom",
            "a number no smaller than `min_zoom`",
        )?;
        check(self.zoom_step > 0.0 && self.zoom_step < 1.0, "zoom_step", "between 0 and 1")?;
        check(
            self.wheel_zoom_step > 0.0 && self.wheel_zoom_step < 1.0,
            "wheel_zoom_step",
            "between 0 and 1",
        )?;
        check(!self.history_key.is_empty(), "history_key", "a non-empty key")?;
        check(
            !self.variables_key.is_empty() && self.variables_key != self.history_key,
            "variables_key",
            "a non-empty key different from `history_key`",
        )?;
        Ok(())
    }
}
