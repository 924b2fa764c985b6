use std::{fmt, str::FromStr};

/// Which store to clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    History,
    Variables,
}

/// How to change the zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zoom {
    In,
    Out,
    Reset,
}

/// A REPL command, entered as a line starting with `:`.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `:prev`
    Previous,

    /// `:next`
    Next,

    /// `:history`
    History,

    /// `:vars`
    Variables,

    /// `:clear history|vars`
    Clear(Target),

    /// `:select <id>`
    Select(u64),

    /// `:plot [width height]`
    Plot(Option<(u32, u32)>),

    /// `:zoom in|out|reset`
    Zoom(Zoom),

    /// `:pan <dx> <dy>`, in canvas cells.
    Pan(f64, f64),

    /// `:hover <column> <row>`
    Hover(f64, f64),

    /// `:about`
    About,

    /// `:help`
    Help,
}

/// The largest canvas `:plot` accepts, in cells.
pub const MAX_PLOT_SIZE: (u32, u32) = (1000, 500);

/// The usage text listing every command.
pub const USAGE: &str = "\
commands:
  :prev, :next           recall older / newer inputs
  :history               list the history, newest first
  :vars                  list the variables
  :clear history|vars    clear the history or the variables
  :select <id>           load the input of a history entry
  :plot [width height]   draw the active graph, optionally resizing the canvas
  :zoom in|out|reset     zoom the graph
  :pan <dx> <dy>         drag the graph by the given number of cells
  :hover <col> <row>     show the function value under a cell
  :about                 add information about the calculator to the history
  :help                  show this message

anything else is evaluated: `a = 3` assigns, `y = x^2` graphs, `ans` and `ans<id>` refer to results";

/// A line that starts with `:` but is not a valid command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type :help for a list of commands)", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

/// Parses a single argument.
fn arg<T: FromStr>(args: &[&str], index: usize, what: &str) -> Result<T, ParseCommandError> {
    let raw = args
        .get(index)
        .ok_or_else(|| ParseCommandError(format!("missing {}", what)))?;
    raw.parse()
        .map_err(|_| ParseCommandError(format!("`{}` is not a valid {}", raw, what)))
}

/// Parses a single argument that must be a finite number.
fn finite_arg(args: &[&str], index: usize, what: &str) -> Result<f64, ParseCommandError> {
    let value: f64 = arg(args, index, what)?;
    if !value.is_finite() {
        return Err(ParseCommandError(format!("`{}` is not a valid {}", args[index], what)));
    }
    Ok(value)
}

/// Parses a canvas dimension between `1` and `max`.
fn size_arg(args: &[&str], index: usize, what: &str, max: u32) -> Result<u32, ParseCommandError> {
    let value: u32 = arg(args, index, what)?;
    if value == 0 || value > max {
        return Err(ParseCommandError(format!("the {} must be between 1 and {}", what, max)));
    }
    Ok(value)
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim().trim_start_matches(':');
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args = words.collect::<Vec<_>>();

        let command = match name {
            "prev" => Self::Previous,
            "next" => Self::Next,
            "history" => Self::History,
            "vars" => Self::Variables,
            "clear" => match args.first().copied() {
                Some("history") => Self::Clear(Target::History),
                Some("vars") => Self::Clear(Target::Variables),
                _ => return Err(ParseCommandError("expected `:clear history` or `:clear vars`".to_string())),
            },
            "select" => Self::Select(arg(&args, 0, "history id")?),
            "plot" if args.is_empty() => Self::Plot(None),
            "plot" => Self::Plot(Some((
                size_arg(&args, 0, "width", MAX_PLOT_SIZE.0)?,
                size_arg(&args, 1, "height", MAX_PLOT_SIZE.1)?,
            ))),
            "zoom" => match args.first().copied() {
                Some("in") => Self::Zoom(Zoom::In),
                Some("out") => Self::Zoom(Zoom::Out),
                Some("reset") => Self::Zoom(Zoom::Reset),
                _ => return Err(ParseCommandError("expected `:zoom in`, `:zoom out` or `:zoom reset`".to_string())),
            },
            "pan" => Self::Pan(
                finite_arg(&args, 0, "horizontal offset")?,
                finite_arg(&args, 1, "vertical offset")?,
            ),
            "hover" => Self::Hover(finite_arg(&args, 0, "column")?, finite_arg(&args, 1, "row")?),
            "about" => Self::About,
            "help" => Self::Help,
            _ => return Err(ParseCommandError(format!("unknown command `:{}`", name))),
        };
        Ok(command)
    }
}
