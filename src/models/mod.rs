//! Core data models for the coach agent.

mod agenda;
mod game;
mod insight;
mod player;
mod scenario;
mod team;
mod telemetry;
mod timeline;

pub use agenda::*;
pub use game::*;
pub use insight::*;
pub use player::*;
pub use scenario::*;
pub use team::*;
pub use telemetry::*;
pub use timeline::*;
