//! Asset loading and on-disk persistence for the party game.

pub mod load;
pub mod persist;
pub mod store;

pub use load::*;
pub use persist::*;
pub use store::*;
