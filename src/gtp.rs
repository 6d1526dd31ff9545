//! Go Text Protocol (GTP) front end.
//!
//! A local, line-oriented driver for one game at a time: a GUI or a script
//! feeds moves through `play` and asks the configured bot for answers
//! through `genmove`. Every move goes through [`Engine::play`], so the
//! engine stays the only judge of legality.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Start a new game on a `size`x`size` board
//! - `clear_board` - Empty the board and reset capture counts
//! - `play <color> <vertex>` - Play a move (`pass` is accepted)
//! - `genmove <color>` - Ask the bot for a move and play it
//! - `showboard` - Print the board
//! - `captures <color>` - Stones captured so far by `color`
//! - `personality [name]` - Show or change the bot personality
//!
//! Vertices use columns `A`..`T` without `I` and rows counted from the bottom,
//! so `A1` is the bottom-left corner.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Color, Point};
use crate::bot::{BotTurn, Personality, play_bot_turn};
use crate::config::AppConfig;
use crate::engine::Engine;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "personality",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    engine: Engine,
    personality: Personality,
    rng: fastrand::Rng,
}

impl GtpEngine {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            engine: Engine::new(config.board_size)?,
            personality: config.personality,
            rng: config.rng(),
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = arg.parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                match Engine::new(size) {
                    Ok(engine) => {
                        info!(size, "new board");
                        self.engine = engine;
                        (true, String::new())
                    }
                    Err(e) => (false, format!("unacceptable size: {e}")),
                }
            }

            "clear_board" => {
                self.engine.reset();
                (true, String::new())
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = parse_color(color) else {
                    return (false, "invalid color".to_string());
                };
                let point = match parse_vertex(vertex, self.engine.size()) {
                    Ok(Some(p)) => p,
                    Ok(None) => return (true, String::new()),
                    Err(e) => return (false, e),
                };
                match self.engine.play(point.0, point.1, color) {
                    Ok(outcome) => {
                        debug!(%color, vertex, captured = outcome.captured_count(), "play");
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| parse_color(c)) else {
                    return (false, "invalid color".to_string());
                };
                match play_bot_turn(&mut self.engine, color, self.personality, &mut self.rng) {
                    BotTurn::Played { point, .. } => (true, format_vertex(point, self.engine.size())),
                    BotTurn::Passed => (true, "pass".to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.engine.board())),

            "captures" => {
                let Some(color) = args.first().and_then(|c| parse_color(c)) else {
                    return (false, "invalid color".to_string());
                };
                (true, self.engine.captures().get(color).to_string())
            }

            "personality" => match args.first() {
                None => (true, self.personality.display_name().to_string()),
                Some(name) => match <Personality as clap::ValueEnum>::from_str(name, true) {
                    Ok(p) => {
                        self.personality = p;
                        (true, String::new())
                    }
                    Err(_) => (false, format!("unknown personality: {name}")),
                },
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// Parse a vertex such as `D4` into a point. `pass` yields `Ok(None)`.
///
/// Columns skip `I` by Go convention; rows count up from the bottom edge.
pub fn parse_vertex(s: &str, size: usize) -> Result<Option<Point>, String> {
    if s.eq_ignore_ascii_case("pass") {
        return Ok(None);
    }
    let invalid = || format!("invalid vertex: {s}");

    let mut chars = s.chars();
    let col_char = chars
        .next()
        .filter(char::is_ascii_alphabetic)
        .ok_or_else(invalid)?
        .to_ascii_uppercase();
    if col_char == 'I' {
        return Err(invalid());
    }
    let mut col = (col_char as u8 - b'A') as usize;
    if col_char > 'I' {
        col -= 1;
    }
    let row: usize = chars.as_str().parse().map_err(|_| invalid())?;

    if col >= size || row == 0 || row > size {
        return Err(format!("vertex off board: {s}"));
    }
    Ok(Some((col, size - row)))
}

/// Convert a point to a vertex string (e.g., `D4`).
pub fn format_vertex((x, y): Point, size: usize) -> String {
    let mut c = (b'A' + x as u8) as char;
    if c >= 'I' {
        c = (c as u8 + 1) as char;
    }
    format!("{c}{}", size - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        let config = AppConfig {
            seed: Some(17),
            ..AppConfig::default()
        };
        GtpEngine::new(&config).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "goban-dojo");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["unknown_cmd"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();

        let (success, _) = engine.execute("boardsize", &["13"]);
        assert!(success);
        assert_eq!(engine.engine().size(), 13);

        let (success, _) = engine.execute("boardsize", &["42"]);
        assert!(!success);
        assert_eq!(engine.engine().size(), 13);
    }

    #[test]
    fn test_vertex_round_trip() {
        for size in [9, 13, 19] {
            for y in 0..size {
                for x in 0..size {
                    let v = format_vertex((x, y), size);
                    assert_eq!(parse_vertex(&v, size), Ok(Some((x, y))), "{v}");
                }
            }
        }
    }

    #[test]
    fn test_vertex_conventions() {
        assert_eq!(parse_vertex("A1", 9), Ok(Some((0, 8))));
        assert_eq!(parse_vertex("J9", 9), Ok(Some((8, 0))));
        assert_eq!(parse_vertex("pass", 9), Ok(None));
        assert!(parse_vertex("I5", 9).is_err());
        assert!(parse_vertex("K1", 9).is_err());
        assert!(parse_vertex("A0", 9).is_err());
        assert!(parse_vertex("5A", 9).is_err());
    }

    #[test]
    fn test_play_capture_and_counts() {
        let mut engine = engine();
        // White E5 surrounded on three sides, black captures at F5.
        for (color, v) in [("w", "E5"), ("b", "E6"), ("b", "E4"), ("b", "D5")] {
            assert!(engine.execute("play", &[color, v]).0);
        }
        assert!(engine.execute("play", &["b", "F5"]).0);
        assert_eq!(engine.execute("captures", &["black"]), (true, "1".to_string()));
        assert_eq!(engine.engine().board().get(4, 4), None);
    }

    #[test]
    fn test_play_illegal() {
        let mut engine = engine();
        assert!(engine.execute("play", &["b", "C3"]).0);
        let (success, msg) = engine.execute("play", &["w", "C3"]);
        assert!(!success);
        assert!(msg.contains("not empty"));
        assert!(!engine.execute("play", &["x", "C4"]).0);
        assert!(!engine.execute("play", &["b"]).0);
    }

    #[test]
    fn test_genmove_plays_a_stone() {
        let mut engine = engine();
        let (success, vertex) = engine.execute("genmove", &["white"]);
        assert!(success);
        let (x, y) = parse_vertex(&vertex, 9).unwrap().unwrap();
        assert_eq!(engine.engine().board().get(x, y), Some(Color::White));
    }

    #[test]
    fn test_personality() {
        let mut engine = engine();
        assert_eq!(engine.execute("personality", &[]), (true, "Cautious Cal".to_string()));
        assert!(engine.execute("personality", &["aggressive"]).0);
        assert_eq!(engine.execute("personality", &[]), (true, "Aggressive Al".to_string()));
        assert!(!engine.execute("personality", &["sneaky"]).0);
    }

    #[test]
    fn test_serve_session() {
        let mut engine = engine();
        let input = "1 play black D4\n# comment\n2 showboard\nclear_board\n3 quit\nname\n";
        let mut output = Vec::new();
        engine.serve(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("=1 \n\n"));
        assert!(text.contains("=2 \n"));
        assert!(text.ends_with("=3 \n\n"));
        assert!(!text.contains("goban-dojo"));
        assert_eq!(engine.engine().board().stone_count(Color::Black), 0);
    }
}
