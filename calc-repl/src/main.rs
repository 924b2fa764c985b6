mod command;
mod plot;

use calc_core::{
    history::{ERR, GRAPH},
    persist::FileStore,
    Calculator,
    Config,
    Event,
    PreviewKind,
    Response,
};
use command::{Command, Target, Zoom, USAGE};
use log::{debug, warn};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, BufRead, IsTerminal}, path::{Path, PathBuf}};

/// The canvas size used until the user picks another one with `:plot`.
const DEFAULT_CANVAS: (u32, u32) = (61, 21);

/// Returns the directory holding the persisted history, variables and optional `config.json`.
fn data_dir() -> PathBuf {
    std::env::var_os("CALC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".calc"))
}

/// Reads `config.json` from the data directory, falling back to the default configuration.
fn load_config(dir: &Path) -> Config {
    let path = dir.join("config.json");
    let Ok(contents) = fs::read_to_string(&path) else {
        return Config::default();
    };

    let config = serde_json::from_str::<Config>(&contents)
        .map_err(|err| err.to_string())
        .and_then(|config| config.validate().map(|_| config).map_err(|err| err.to_string()));
    config.unwrap_or_else(|err| {
        warn!("ignoring invalid {}: {}", path.display(), err);
        Config::default()
    })
}

/// Prints the outcome of a submitted input.
fn print_commit(calc: &Calculator<FileStore>, response: Response) {
    let Some(id) = response.committed else {
        return;
    };
    let Some(entry) = calc.history().get(id) else {
        return;
    };

    match entry.result.as_str() {
        GRAPH => println!("{}", plot::render(calc.graph())),
        ERR => match response.failure {
            Some(failure) => failure.report_to_stderr(),
            None => eprintln!("error: the result is not a finite number"),
        },
        result => println!("[{}] {}", id, result),
    }
}

/// Prints the recalled input and its preview.
fn print_input(response: &Response) {
    match response.preview.kind {
        PreviewKind::Empty => println!("(empty input)"),
        PreviewKind::Error => println!("{}  = ?", response.input),
        _ => println!("{}  = {}", response.input, response.preview.value),
    }
}

/// Runs a `:` command.
fn run_command(calc: &mut Calculator<FileStore>, command: Command) {
    debug!("running {:?}", command);
    match command {
        Command::Previous => print_input(&calc.handle(Event::RecallPrevious)),
        Command::Next => print_input(&calc.handle(Event::RecallNext)),
        Command::History => {
            if calc.history().is_empty() {
                println!("(no history)");
            }
            for entry in calc.history().entries().iter().rev() {
                println!("[{}] {} = {}", entry.id, entry.expression, entry.result);
            }
        },
        Command::Variables => {
            if calc.variables().is_empty() {
                println!("(no variables)");
            }
            for (name, value) in calc.variables().iter() {
                println!("{} = {}", name, calc_core::fmt::format_number(value, calc.config().precision));
            }
        },
        Command::Clear(Target::History) => {
            calc.handle(Event::ClearHistory);
        },
        Command::Clear(Target::Variables) => {
            calc.handle(Event::ClearVariables);
        },
        Command::Select(id) => {
            if calc.history().get(id).is_none() {
                eprintln!("error: there is no history entry with id {}", id);
                return;
            }
            print_input(&calc.handle(Event::SelectHistoryEntry(id)));
        },
        Command::Plot(size) => {
            if let Some((width, height)) = size {
                calc.handle(Event::Resize(width, height));
            }
            print_plot(calc);
        },
        Command::Zoom(zoom) => {
            calc.handle(match zoom {
                Zoom::In => Event::ZoomIn,
                Zoom::Out => Event::ZoomOut,
                Zoom::Reset => Event::ResetZoom,
            });
            print_plot(calc);
        },
        Command::Pan(dx, dy) => {
            let size = calc.graph().viewport().canvas_size();
            let center = (size.0 as f64 / 2.0, size.1 as f64 / 2.0);
            calc.handle(Event::PointerDown(center.into()));
            calc.handle(Event::PointerMove((center.0 + dx, center.1 + dy).into()));
            calc.handle(Event::PointerUp);
            print_plot(calc);
        },
        Command::Hover(col, row) => {
            // aim at the middle of the cell
            calc.handle(Event::PointerMove((col + 0.5, row + 0.5).into()));
            match calc.graph().hovered() {
                Some(point) => println!("({}, {})", point.0, point.1),
                None => println!("the function has no value here"),
            }
        },
        Command::About => {
            calc.insert_info(&[
                ("calculator", env!("CARGO_PKG_NAME")),
                ("version", env!("CARGO_PKG_VERSION")),
                ("type :help", "for a list of commands"),
            ]);
            println!("added to the history, see :history");
        },
        Command::Help => println!("{}", USAGE),
    }
}

/// Prints the active graph, or explains why there is none.
fn print_plot(calc: &Calculator<FileStore>) {
    match (calc.graph().body(), calc.graph().failure()) {
        (None, _) => println!("nothing to plot yet; enter a function of x, such as `y = x^2`"),
        (Some(_), Some(failure)) => failure.report_to_stderr(),
        (Some(_), None) => println!("{}", plot::render(calc.graph())),
    }
}

/// Handles a single line of input.
fn process(calc: &mut Calculator<FileStore>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    if line.starts_with(':') {
        match line.parse::<Command>() {
            Ok(command) => run_command(calc, command),
            Err(err) => eprintln!("error: {}", err),
        }
    } else {
        let response = calc.handle(Event::Submit(line.to_string()));
        print_commit(calc, response);
    }
}

/// Handles every line read from a file or a pipe.
fn process_all(calc: &mut Calculator<FileStore>, reader: impl BufRead) {
    for line in reader.lines() {
        match line {
            Ok(line) => process(calc, &line),
            Err(err) => {
                eprintln!("{}", err);
                break;
            },
        }
    }
}

fn main() {
    env_logger::init();

    let dir = data_dir();
    let config = load_config(&dir);
    let mut calc = Calculator::new(config, FileStore::new(&dir));
    calc.handle(Event::Resize(DEFAULT_CANVAS.0, DEFAULT_CANVAS.1));

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // evaluate each line of the file
        match fs::File::open(&filename) {
            Ok(file) => process_all(&mut calc, io::BufReader::new(file)),
            Err(err) => eprintln!("could not open {}: {}", filename, err),
        }
        return;
    } else if !io::stdin().is_terminal() {
        process_all(&mut calc, io::stdin().lock());
        return;
    }

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("could not start the editor: {}", err);
            return;
        },
    };

    fn process_line(rl: &mut DefaultEditor, calc: &mut Calculator<FileStore>) -> Result<(), ReadlineError> {
        // recalled inputs are pre-filled so they can be edited before submitting
        let initial = calc.input().to_string();
        let input = rl.readline_with_initial("> ", (initial.as_str(), ""))?;
        if input.trim().is_empty() {
            calc.handle(Event::Cancel);
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        process(calc, &input);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut calc) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
}
