//! Terminal front-end for the ColorSpeak engine
//!
//! Renders the tile board as text and forwards stdin commands as clicks,
//! standing in for a graphical presentation layer. The engine's staged
//! resolutions are driven by polling `tick()` between inputs.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use colorspeak::engine::{GameClock, SystemClock};
use colorspeak::{
    default_palette, AudioSubsystem, ClickOutcome, Cues, Difficulty, DifficultySet, GameEngine,
    GameStatus, MutedCues,
};

const DEFAULT_ASSET_DIR: &str = "assets/audio";
const TICK_INTERVAL: Duration = Duration::from_millis(25);

struct Options {
    assets: PathBuf,
    difficulty: Difficulty,
    muted: bool,
}

fn print_usage() {
    println!("Usage: colorspeak [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --assets <DIR>        Spoken color asset directory (default: {})", DEFAULT_ASSET_DIR);
    println!("  --difficulty <LEVEL>  easy | medium | hard (default: easy)");
    println!("  --muted               Run without audio");
    println!("  -h, --help            Show this help");
    println!();
    println!("In-game commands: tile number to flip, e = easy, m = medium,");
    println!("h = hard, r = restart, q = quit.");
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        assets: PathBuf::from(DEFAULT_ASSET_DIR),
        difficulty: Difficulty::Easy,
        muted: false,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--assets" => {
                let dir = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--assets requires a directory"))?;
                options.assets = PathBuf::from(dir);
            }
            "--difficulty" => {
                let level = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--difficulty requires a level"))?;
                options.difficulty = level.parse()?;
            }
            "--muted" => options.muted = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(options)
}

/// Drive the engine until every scheduled stage has fired
fn settle(engine: &mut GameEngine) {
    while engine.is_settling() {
        thread::sleep(TICK_INTERVAL);
        if engine.tick() {
            render(engine);
        }
    }
}

fn render(engine: &GameEngine) {
    let session = engine.session();
    println!();
    println!(
        "Score: {:<6} Moves: {:<4} {}",
        session.score(),
        session.moves(),
        match session.status() {
            GameStatus::Idle => "",
            GameStatus::Playing => "",
            GameStatus::Won => "*** YOU WON! (r to play again) ***",
        }
    );

    let columns = engine
        .difficulties()
        .get(current_difficulty(engine))
        .columns
        .max(1) as usize;
    for (row_idx, row) in session.tiles().chunks(columns).enumerate() {
        let mut line = String::new();
        for (i, tile) in row.iter().enumerate() {
            let index = row_idx * columns + i + 1;
            let cell = if tile.is_matched {
                format!("[{}]", color_name(engine, &tile.color_id))
            } else if tile.is_selected {
                format!("({})", color_name(engine, &tile.color_id))
            } else {
                format!("#{}", index)
            };
            line.push_str(&format!("{:<12}", cell));
        }
        println!("  {}", line.trim_end());
    }
}

fn color_name<'a>(engine: &'a GameEngine, color_id: &'a str) -> &'a str {
    engine
        .palette()
        .iter()
        .find(|c| c.id == color_id)
        .map(|c| c.name.as_str())
        .unwrap_or(color_id)
}

/// Infer the active difficulty from the dealt board size
fn current_difficulty(engine: &GameEngine) -> Difficulty {
    let pairs = engine.session().tiles().len() / 2;
    for difficulty in Difficulty::ALL {
        if engine.difficulties().get(difficulty).pairs == pairs {
            return difficulty;
        }
    }
    Difficulty::Easy
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("colorspeak=info")),
        )
        .init();

    let options = parse_args()?;
    let cues: Arc<dyn Cues> = if options.muted {
        Arc::new(MutedCues)
    } else {
        Arc::new(AudioSubsystem::new(options.assets.clone()))
    };
    let clock: Arc<dyn GameClock> = Arc::new(SystemClock::new());
    let mut engine = GameEngine::new(default_palette(), DifficultySet::default(), cues, clock);

    let mut difficulty = options.difficulty;
    engine.start_game(difficulty)?;
    println!("ColorSpeak -- flip tiles by number, match the colors.");
    render(&engine);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "q" | "quit" => break,
            "r" | "restart" => {
                engine.start_game(difficulty)?;
            }
            "e" | "easy" => {
                difficulty = Difficulty::Easy;
                engine.start_game(difficulty)?;
            }
            "m" | "medium" => {
                difficulty = Difficulty::Medium;
                engine.start_game(difficulty)?;
            }
            "h" | "hard" => {
                difficulty = Difficulty::Hard;
                engine.start_game(difficulty)?;
            }
            input => match input.parse::<usize>() {
                Ok(index) if index >= 1 && index <= engine.session().tiles().len() => {
                    let id = engine.session().tiles()[index - 1].id.clone();
                    if engine.handle_tile_click(&id) == ClickOutcome::Ignored {
                        println!("(that tile can't be flipped right now)");
                    }
                }
                _ => println!("Unknown command: {}", input),
            },
        }

        settle(&mut engine);
        render(&engine);
    }

    Ok(())
}
