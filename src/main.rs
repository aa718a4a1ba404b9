//! Twisty Puzzle
//!
//! Plays a 3x3x3 twisty puzzle from the terminal: moves in standard notation,
//! named sequences, scrambles, one-step solving from the recorded history and
//! an interactive 3D view.

mod visualization;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use twisty::cube::{Cube, DEFAULT_SCRAMBLE_LENGTH};
use twisty::kinds::{CubeType, ThreeByThree};
use twisty::persistence::{Store, SAVES_JSON, SEQUENCES_JSON};
use twisty::pieces::Face;
use twisty::sequences::SequenceMap;
use twisty::CubeOps;

/// Turns, scrambles and solves a virtual twisty puzzle.
#[derive(Parser)]
#[command(name = "twisty")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Named sequences document.
    #[arg(long, default_value = SEQUENCES_JSON)]
    sequences: PathBuf,
    /// Saved histories document.
    #[arg(long, default_value = SAVES_JSON)]
    saves: PathBuf,
    #[arg(long, value_enum, default_value_t = CubeKind::ThreeByThree)]
    cube: CubeKind,
    /// Log filter, overrides `RUST_LOG` (e.g. `debug`, `twisty=info`).
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive command loop.
    Play,
    /// Perform a sequence of moves and print the result.
    Moves { sequence: String },
    /// Perform random moves and print the result.
    Scramble {
        #[arg(default_value_t = DEFAULT_SCRAMBLE_LENGTH)]
        length: usize,
    },
    /// Replay a saved history.
    Replay { save: String },
    /// Open the 3D viewer, optionally performing a sequence first.
    Display { sequence: Option<String> },
    /// List the named sequences for the chosen cube.
    Sequences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CubeKind {
    ThreeByThree,
}

impl CubeKind {
    fn name(self) -> &'static str {
        match self {
            CubeKind::ThreeByThree => ThreeByThree.name(),
        }
    }

    fn build(self, sequences: SequenceMap) -> Box<dyn CubeOps> {
        match self {
            CubeKind::ThreeByThree => Box::new(Cube::with_sequences(ThreeByThree, sequences)),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let store = Store::new(cli.sequences, cli.saves);
    let sequences = match store.load_sequences(cli.cube.name()) {
        Ok(sequences) => sequences,
        Err(e) => {
            eprintln!("Failed to load sequences: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut cube = cli.cube.build(sequences);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            if let Err(e) = play(cube.as_mut(), &store, stdin.lock(), io::stdout()) {
                eprintln!("Input failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Command::Moves { sequence } => {
            cube.do_sequence(&sequence);
            print!("{}", report(cube.as_ref()));
        }
        Command::Scramble { length } => {
            println!("Scramble: {}", cube.scramble(length));
            print!("{}", report(cube.as_ref()));
        }
        Command::Replay { save } => match store.load_history(cube.name(), &save) {
            Ok(Some(history)) => {
                cube.do_sequence(&history);
                print!("{}", report(cube.as_ref()));
            }
            Ok(None) => {
                eprintln!("No save named {:?}", save);
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("Failed to load saves: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Command::Display { sequence } => {
            if let Some(sequence) = sequence {
                cube.enqueue(&sequence);
            }
            println!("Controls: S scramble, Space solve, R reset, mouse to orbit");
            visualization::display(cube);
        }
        Command::Sequences => {
            for (name, body) in cube.sequences().iter() {
                println!("{name}: {body}");
            }
        }
    }
    ExitCode::SUCCESS
}

fn init_tracing(level: Option<&str>) {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

/// The net, whether the cube is solved and its history.
fn report(cube: &dyn CubeOps) -> String {
    format!(
        "{}Solved = {}\n{}\n",
        cube.grid().format_net(),
        cube.is_solved(),
        cube.history()
    )
}

/// Reads one line after printing `question`. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// The interactive command loop. An empty line or `quit` leaves it.
///
/// Commands are matched case-insensitively anywhere in the line, first match
/// wins: `add seq`, `save seq`, `move`, `scramble [N]`, `solve`, `save`,
/// `show [side]`, `quit`.
fn play<R: BufRead, W: Write>(
    cube: &mut dyn CubeOps,
    store: &Store,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    while let Some(line) = prompt(&mut input, &mut output, "What to do? ")? {
        let command = line.to_lowercase();
        if command.is_empty() || command.contains("quit") {
            break;
        } else if command.contains("add seq") {
            let Some(name) = prompt(&mut input, &mut output, "What is the name of the sequence? ")?
            else {
                break;
            };
            let Some(body) = prompt(&mut input, &mut output, "What is the sequence? ")? else {
                break;
            };
            match cube.edit_sequence(&name, &body) {
                Ok(()) => writeln!(output, "Added sequence {name}")?,
                Err(e) => writeln!(output, "Rejected: {e}")?,
            }
        } else if command.contains("save seq") {
            match store.save_sequences(cube.name(), cube.sequences()) {
                Ok(()) => writeln!(output, "Saved sequences")?,
                Err(e) => eprintln!("Failed to save sequences: {}", e),
            }
        } else if command.contains("move") {
            while let Some(moves) = prompt(&mut input, &mut output, "What moves to do? ")? {
                if moves.is_empty() {
                    break;
                }
                for error in cube.do_sequence(&moves) {
                    writeln!(output, "Skipped: {error}")?;
                }
                write!(output, "{}", report(cube))?;
            }
        } else if command.contains("scramble") {
            let length = first_number(&command).unwrap_or(DEFAULT_SCRAMBLE_LENGTH);
            cube.scramble(length);
            write!(output, "{}", report(cube))?;
        } else if command.contains("solve") {
            cube.solve();
            write!(output, "{}", report(cube))?;
        } else if command.contains("save") {
            let Some(save_name) = prompt(&mut input, &mut output, "What to save as? ")? else {
                break;
            };
            match store.save_history(cube.name(), &save_name, cube.history()) {
                Ok(()) => writeln!(output, "Saved {save_name}")?,
                Err(e) => eprintln!("Failed to save history: {}", e),
            }
        } else if command.contains("show") {
            match Face::ALL.into_iter().find(|face| command.contains(face.name())) {
                Some(face) => write!(output, "{}", cube.grid().format_side(face))?,
                None => write!(output, "{}", report(cube))?,
            }
        } else {
            writeln!(output, "Unknown command: {line}")?;
        }
    }
    Ok(())
}

/// The first run of ASCII digits in `text`, if it fits a `usize`.
fn first_number(text: &str) -> Option<usize> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn run(script: &str, store: &Store) -> (String, Box<dyn CubeOps>) {
        let mut cube = CubeKind::ThreeByThree.build(SequenceMap::new());
        let mut output = Vec::new();
        play(cube.as_mut(), store, script.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), cube)
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("scramble 20 please"), Some(20));
        assert_eq!(first_number("scramble"), None);
        assert_eq!(first_number("x7y"), Some(7));
    }

    #[test]
    fn test_move_session_snapshot() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("s.json"), dir.path().join("v.json"));
        let (output, cube) = run("move\nR\n\nquit\n", &store);
        assert!(output.starts_with("What to do? What moves to do? "));
        assert!(output.ends_with("What moves to do? What to do? "));
        assert_eq!(cube.history(), "R");
        insta::assert_snapshot!(report(cube.as_ref()), @r"
                              [white |white |green ]
                              [white |white |green ]
                              [white |white |green ]
        [orange|orange|orange][green |green |yellow][red   |red   |red   ][white |blue  |blue  ]
        [orange|orange|orange][green |green |yellow][red   |red   |red   ][white |blue  |blue  ]
        [orange|orange|orange][green |green |yellow][red   |red   |red   ][white |blue  |blue  ]
                              [yellow|yellow|blue  ]
                              [yellow|yellow|blue  ]
                              [yellow|yellow|blue  ]
        Solved = false
        R
        ");
    }

    #[test]
    fn test_sequences_and_saves() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("s.json"), dir.path().join("v.json"));
        let script = "ADD SEQ\nsexy\nR U R' U'\nsave seq\nmove\nsexy2\n\nsave\nmine\n\n";
        let (output, cube) = run(script, &store);
        assert!(output.contains("Added sequence sexy"));
        assert!(output.contains("Saved sequences"));
        assert!(output.contains("Saved mine"));
        assert_eq!(
            store.load_sequences("ThreeByThree").unwrap().get("sexy"),
            Some("R U R' U'")
        );
        assert_eq!(
            store.load_history("ThreeByThree", "mine").unwrap().as_deref(),
            Some(cube.history())
        );
    }

    #[test]
    fn test_scramble_then_solve() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("s.json"), dir.path().join("v.json"));
        let (output, cube) = run("scramble 5\nsolve\n", &store);
        assert!(output.contains("Solved = true"));
        assert!(cube.is_solved());
    }

    #[test]
    fn test_show_one_side() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("s.json"), dir.path().join("v.json"));
        let (output, _) = run("show down\n", &store);
        assert!(output.contains(
            "Printing down:\n[yellow|yellow|yellow]\n[yellow|yellow|yellow]\n[yellow|yellow|yellow]\n"
        ));
    }

    #[test]
    fn test_rejected_name_is_reported() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("s.json"), dir.path().join("v.json"));
        let (output, cube) = run("add seq\nR2\nU\n", &store);
        assert!(output.contains("Rejected: sequence name \"R2\" is already a move token"));
        assert!(cube.sequences().is_empty());
    }
}
