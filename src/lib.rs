//! Goban-Dojo: a Go rule engine with practice opponents and puzzle variations.
//!
//! ## Modules
//!
//! - [`board`] - Board state (fixed-size grid of stones)
//! - [`group`] - Connected groups and liberty counting
//! - [`engine`] - Move legality, captures and the suicide rule
//! - [`transform`] - The 8 board symmetries, with optional color swap
//! - [`puzzle`] - Puzzle records, daily selection and solution checking
//! - [`bot`] - Heuristic opponents (random, contact-seeking, cautious)
//! - [`session`] - A human-versus-bot game
//! - [`gtp`] - Go Text Protocol front end
//! - [`config`] - Runtime configuration
//! - [`constants`] - Board size bounds and text symbols
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use goban_dojo::board::Color;
//! use goban_dojo::engine::Engine;
//!
//! let mut engine = Engine::new(9).unwrap();
//! engine.play(4, 4, Color::White).unwrap();
//! engine.play(4, 3, Color::Black).unwrap();
//! engine.play(4, 5, Color::Black).unwrap();
//! engine.play(3, 4, Color::Black).unwrap();
//!
//! let outcome = engine.play(5, 4, Color::Black).unwrap();
//! assert_eq!(outcome.captured, vec![(4, 4)]);
//! assert_eq!(engine.captures().black, 1);
//! ```

#[cfg(test)]
mod arbitrary;
pub mod board;
pub mod bot;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod group;
pub mod gtp;
pub mod puzzle;
pub mod session;
pub mod transform;
