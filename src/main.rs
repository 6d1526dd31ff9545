//! Goban-Dojo command line.
//!
//! ## Usage
//!
//! - `goban-dojo` - Show a demo game between two bots
//! - `goban-dojo gtp` - Start a GTP server for GUI integration
//! - `goban-dojo play` - Play against a bot in the terminal
//! - `goban-dojo puzzle --seed 2026-10-16` - Show (and optionally solve) the daily puzzle

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use goban_dojo::board::Color;
use goban_dojo::bot::{BotTurn, Personality, play_bot_turn};
use goban_dojo::config::AppConfig;
use goban_dojo::constants::DEFAULT_CONFIG_FILE;
use goban_dojo::engine::Engine;
use goban_dojo::gtp::{GtpEngine, format_vertex, parse_vertex};
use goban_dojo::puzzle::{AttemptStatus, PuzzleAttempt, PuzzleCatalog};
use goban_dojo::session::PlaySession;

/// Goban-Dojo: a Go rule engine with practice bots and puzzles
#[derive(Parser)]
#[command(name = "goban-dojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON config file [default: goban-dojo.json if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Board size (overrides the config file)
    #[arg(short, long, global = true)]
    size: Option<usize>,

    /// Bot personality (overrides the config file)
    #[arg(short, long, global = true)]
    personality: Option<Personality>,

    /// RNG seed (overrides the config file)
    #[arg(long, global = true)]
    rng_seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play against the bot, entering vertices such as D4, "pass", or
    /// "personality <name>" to switch opponents and start over
    Play {
        /// Let the bot take black and move first
        #[arg(long)]
        bot_black: bool,
    },
    /// Show the daily puzzle
    Puzzle {
        /// Seed string, usually the date
        #[arg(long, default_value = "today")]
        seed: String,
        /// Play the stored solution to check it
        #[arg(long)]
        solve: bool,
    },
    /// Run a game between two bots
    Demo {
        /// Personality playing white
        #[arg(long, default_value = "aggressive")]
        white: Personality,
        /// Maximum number of moves
        #[arg(long, default_value_t = 60)]
        moves: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialize_logging(cli.log_level);

    let config = load_config(&cli)?;
    info!(?config, "configuration");

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new(&config)?;
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Play { bot_black }) => {
            let config = AppConfig {
                bot_color: if bot_black { Color::Black } else { config.bot_color },
                ..config
            };
            run_play(&config)?;
        }
        Some(Commands::Puzzle { seed, solve }) => run_puzzle(&config, &seed, solve)?,
        Some(Commands::Demo { white, moves }) => run_demo(&config, white, moves)?,
        None => run_demo(&config, Personality::Aggressive, 60)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("loading config {DEFAULT_CONFIG_FILE}"))?,
    };
    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(personality) = cli.personality {
        config.personality = personality;
    }
    if cli.rng_seed.is_some() {
        config.seed = cli.rng_seed;
    }
    config.validate()?;
    Ok(config)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

fn run_play(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = PlaySession::new(config)?;
    let size = session.engine().size();
    println!(
        "Playing against {}. You are {}.",
        session.personality(),
        session.human_color()
    );
    if session.bot_color() == Color::Black {
        report_bot(&session.bot_turn(), size);
    }
    println!("{}", session.engine().board());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let vertex = line.trim();
        if vertex.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(name) = vertex.strip_prefix("personality ") {
            match <Personality as clap::ValueEnum>::from_str(name.trim(), true) {
                Ok(personality) => {
                    session.set_personality(personality);
                    println!("New game against {}.", session.personality());
                    if session.bot_color() == Color::Black {
                        report_bot(&session.bot_turn(), size);
                    }
                    println!("{}", session.engine().board());
                }
                Err(e) => println!("{e}"),
            }
        } else if !vertex.is_empty() {
            match parse_vertex(vertex, size) {
                Err(e) => println!("{e}"),
                Ok(point) => match session.human_turn(point) {
                    Err(e) => println!("Invalid move: {e}"),
                    Ok(report) => {
                        if let Some(outcome) = &report.human {
                            if outcome.captured_count() > 0 {
                                println!("You captured {} stone(s).", outcome.captured_count());
                            }
                        }
                        if let Some(turn) = &report.bot {
                            report_bot(turn, size);
                        }
                        let captures = session.engine().captures();
                        println!("{}", session.engine().board());
                        println!("Captures: black {}, white {}", captures.black, captures.white);
                        if report.game_over {
                            println!("Both players passed. Game over.");
                            break;
                        }
                    }
                },
            }
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}

fn report_bot(turn: &BotTurn, size: usize) {
    match turn {
        BotTurn::Played { point, outcome } => {
            println!("Bot played {}.", format_vertex(*point, size));
            if outcome.captured_count() > 0 {
                println!("Bot captured {} stone(s).", outcome.captured_count());
            }
        }
        BotTurn::Passed => println!("Bot passes."),
    }
}

fn run_puzzle(config: &AppConfig, seed: &str, solve: bool) -> anyhow::Result<()> {
    let catalog = match &config.puzzle_file {
        Some(path) => PuzzleCatalog::load(path)
            .with_context(|| format!("loading puzzles from {}", path.display()))?,
        None => PuzzleCatalog::builtin(),
    };
    let instance = catalog.daily_puzzle(seed);
    let size = instance.board.size();

    println!(
        "Puzzle {} ({:?}): {}",
        instance.record.id, instance.record.difficulty, instance.record.description
    );
    println!(
        "Transform: {}, colors swapped: {}, you play {}",
        instance.transform,
        instance.color_swapped,
        instance.player_color()
    );
    println!("{}", instance.board);

    if !solve {
        return Ok(());
    }

    let solution = instance.solution();
    let mut attempt = PuzzleAttempt::new(instance);
    for &point in solution.iter().step_by(2) {
        let mv = attempt
            .attempt(point.0, point.1)
            .with_context(|| format!("solution move {} rejected", format_vertex(point, size)))?;
        println!(
            "{} captures {}",
            format_vertex(point, size),
            mv.outcome.captured_count()
        );
        match mv.status {
            AttemptStatus::Solved => {
                println!("{}", attempt.engine().board());
                println!("Solved.");
                break;
            }
            AttemptStatus::Continue { reply: Some(r) } => {
                println!("Reply: {}", format_vertex(r, size));
            }
            AttemptStatus::Continue { reply: None } => {}
            AttemptStatus::Wrong => anyhow::bail!("stored solution did not match"),
        }
    }
    Ok(())
}

fn run_demo(config: &AppConfig, white: Personality, moves: usize) -> anyhow::Result<()> {
    println!("Goban-Dojo: {} (black) vs {} (white)\n", config.personality, white);

    let mut engine = Engine::new(config.board_size)?;
    let mut rng = config.rng();
    let size = engine.size();
    let mut color = Color::Black;
    let mut passes = 0;

    for n in 1..=moves {
        let personality = match color {
            Color::Black => config.personality,
            Color::White => white,
        };
        match play_bot_turn(&mut engine, color, personality, &mut rng) {
            BotTurn::Played { point, outcome } => {
                passes = 0;
                print!("{n:3}. {color} {}", format_vertex(point, size));
                if outcome.captured_count() > 0 {
                    print!(" (captures {})", outcome.captured_count());
                }
                println!();
            }
            BotTurn::Passed => {
                passes += 1;
                println!("{n:3}. {color} pass");
                if passes >= 2 {
                    break;
                }
            }
        }
        color = color.opponent();
    }

    let snapshot = engine.snapshot();
    println!("\n{}", snapshot.board);
    println!(
        "Captures: black {}, white {}",
        snapshot.captures.black, snapshot.captures.white
    );
    Ok(())
}
