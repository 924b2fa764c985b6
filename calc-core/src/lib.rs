//! The core of an interactive calculator: classifying and evaluating input, keeping the history
//! and variables, tracing simplification steps, and graphing functions of `x`.
//!
//! A UI shell creates a [`Calculator`] over a [`BlobStore`](persist::BlobStore) and sends it
//! [`Event`]s; every event runs to completion and returns a [`Response`] describing what to show.
//!
//! ```
//! use calc_core::{persist::MemoryStore, Calculator, Config, Event};
//!
//! let mut calc = Calculator::new(Config::default(), MemoryStore::new());
//! calc.handle(Event::Submit("a = 3".to_string()));
//! calc.handle(Event::Submit("(a + 1) * 2".to_string()));
//!
//! let entry = calc.history().latest().unwrap();
//! assert_eq!(entry.expression, "(a + 1) * 2 → 4 * 2");
//! assert_eq!(entry.result, "8");
//! ```

pub mod classify;
pub mod config;
pub mod eval;
pub mod fmt;
pub mod graph;
pub mod history;
pub mod persist;
pub mod resolve;
pub mod session;
pub mod trace;
pub mod variables;

pub use config::Config;
pub use session::{Calculator, Event, Preview, PreviewKind, Response};
