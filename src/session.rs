//! A human-versus-bot game.
//!
//! The session owns one [`Engine`] for its whole lifetime. After every
//! accepted human move (or pass) the bot answers once. Two passes in a row
//! end the game; no score is computed.

use tracing::info;

use crate::board::{Color, Point};
use crate::bot::{BotTurn, Personality, play_bot_turn};
use crate::config::AppConfig;
use crate::engine::{Engine, MoveOutcome};
use crate::error::{ConfigError, MoveError};

/// Result of one human turn and the bot's answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// `None` when the human passed
    pub human: Option<MoveOutcome>,
    /// `None` when the game ended before the bot moved
    pub bot: Option<BotTurn>,
    pub game_over: bool,
}

pub struct PlaySession {
    engine: Engine,
    bot_color: Color,
    personality: Personality,
    rng: fastrand::Rng,
    consecutive_passes: usize,
}

impl PlaySession {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine: Engine::new(config.board_size)?,
            bot_color: config.bot_color,
            personality: config.personality,
            rng: config.rng(),
            consecutive_passes: 0,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn human_color(&self) -> Color {
        self.bot_color.opponent()
    }

    pub fn bot_color(&self) -> Color {
        self.bot_color
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= 2
    }

    /// Switch opponents. Starts a new game.
    pub fn set_personality(&mut self, personality: Personality) {
        self.personality = personality;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.consecutive_passes = 0;
        info!(personality = %self.personality, "new game");
    }

    /// Let the bot move. Used directly when the bot plays black and opens.
    pub fn bot_turn(&mut self) -> BotTurn {
        let turn = play_bot_turn(&mut self.engine, self.bot_color, self.personality, &mut self.rng);
        match turn {
            BotTurn::Played { .. } => self.consecutive_passes = 0,
            BotTurn::Passed => self.consecutive_passes += 1,
        }
        turn
    }

    /// Play the human's move at `p`, or pass with `None`, then answer with the bot.
    ///
    /// An illegal human move is returned as an error and the bot does not move.
    /// Once the game is over nothing is played until [`reset`](Self::reset).
    pub fn human_turn(&mut self, p: Option<Point>) -> Result<TurnReport, MoveError> {
        if self.is_over() {
            return Ok(TurnReport {
                human: None,
                bot: None,
                game_over: true,
            });
        }
        let human = match p {
            Some((x, y)) => {
                let outcome = self.engine.play(x, y, self.human_color())?;
                self.consecutive_passes = 0;
                Some(outcome)
            }
            None => {
                self.consecutive_passes += 1;
                None
            }
        };
        let bot = (!self.is_over()).then(|| self.bot_turn());
        Ok(TurnReport {
            human,
            bot,
            game_over: self.is_over(),
        })
    }
}
