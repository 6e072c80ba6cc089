pub mod config;
pub mod error;
pub mod harbor;
pub mod hex;
pub mod interior;
pub mod island;
pub mod map;
pub mod perimeter;

pub use config::{IslandParams, RecenterMode};
pub use error::{ConfigError, GenerationError};
pub use hex::{Cube, HexSet};
pub use island::{IndexSource, RngSource, ScriptedSource, generate_island};
pub use map::{IslandMap, Tile, TileFlags, build_island_map, generate_island_map};
