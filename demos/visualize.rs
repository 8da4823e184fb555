//! Terminal pathfinding visualizer.
//!
//! Generates a random obstacle layout and animates the search over it:
//!
//! Run: cargo run --bin visualize -- [--size N] [--rate R] [--octile] [--weight W]

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc;

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use pathgrid_core::{CellState, CellUpdate};
use pathgrid_search::{CostPolicy, Engine, Outcome, Pacing, Runner};

struct Options {
    size: i32,
    policy: CostPolicy,
    rate: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = parse_args()?;

    let grid = pathgrid_gen::generate(opts.size, &mut rand::rng())?;
    let engine = Engine::new(grid, opts.policy);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new();

    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All)
    )?;

    let run = (|| -> Result<(), Box<dyn Error>> {
        runner.start_run(
            engine,
            Pacing {
                steps_per_second: opts.rate,
            },
            tx,
        )?;

        // The channel closes when the pacing thread exits.
        for update in rx {
            draw_cell(&mut stdout, &update)?;
            stdout.flush()?;
        }
        Ok(())
    })();

    let outcome = runner.finish();

    execute!(
        stdout,
        ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    run?;

    match outcome {
        Some((_, Ok(Some(Outcome::Succeeded(path))))) => {
            println!("path found: {} cells", path.len());
        }
        Some((_, Ok(Some(Outcome::Exhausted)))) => println!("no path exists"),
        Some((_, Ok(None))) => println!("run cancelled"),
        Some((_, Err(e))) => return Err(e.into()),
        None => {}
    }
    Ok(())
}

fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::Black,
        CellState::Start => Color::Blue,
        CellState::Destination => Color::Magenta,
        CellState::Obstacle => Color::Grey,
        CellState::Visited => Color::DarkYellow,
        CellState::OnPath => Color::Green,
    }
}

fn draw_cell(out: &mut impl Write, update: &CellUpdate) -> io::Result<()> {
    queue!(
        out,
        // Two columns per cell so the grid is roughly square on screen.
        cursor::MoveTo((update.pos.x * 2) as u16, update.pos.y as u16),
        SetBackgroundColor(cell_color(update.state)),
        Print("  "),
    )
}

fn parse_args() -> Result<Options, Box<dyn Error>> {
    let mut opts = Options {
        size: 16,
        policy: CostPolicy::Chebyshev,
        rate: 12.0,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => opts.size = next_value(&mut args, "--size")?,
            "--rate" => opts.rate = next_value(&mut args, "--rate")?,
            "--octile" => opts.policy = CostPolicy::weighted_octile(),
            "--weight" => {
                opts.policy = CostPolicy::WeightedOctile {
                    weight: next_value(&mut args, "--weight")?,
                }
            }
            "--help" | "-h" => {
                println!(
                    "usage: visualize [--size N] [--rate R] [--octile] [--weight W]"
                );
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }
    Ok(opts)
}

fn next_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, Box<dyn Error>>
where
    T::Err: std::fmt::Display,
{
    let v = args
        .next()
        .ok_or_else(|| format!("{flag} needs a value"))?;
    v.parse()
        .map_err(|e| format!("invalid value for {flag}: {e}").into())
}
