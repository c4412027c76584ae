//! Line-oriented text map format.
//!
//! ```text
//! vertex <y> <x1> <x2> ...                  one row of vertices
//! sector <floor> <ceil> <v..k> <n..k>      k vertex indices, k neighbors (-1 = wall)
//! player <x> <y> <angle> <sector>
//! # comment
//! ```
mod loader;
mod parser;

pub use loader::{dump, load_map};
pub use parser::{LineError, MapData, MapError, NO_NEIGHBOR, parse_str};
