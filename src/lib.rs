pub mod behavior;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod interface;
pub mod kinds;
pub mod registry;
pub mod scores;
pub mod sprites;
pub mod timestep;
pub mod vec2f;
