//! Turn engine for the party game. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod effects;
pub mod events;
pub mod minigame;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod state;
pub mod store;
pub mod timers;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use minigame::*;
pub use rng::*;
pub use scoring::*;
pub use session::*;
pub use state::*;
pub use store::*;
pub use timers::*;
