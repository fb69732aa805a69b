//! Game module: shared state, prompt assembly, tools, hints, and the
//! turn engine driving a full match.

pub mod engine;
pub mod hints;
pub mod prompt;
pub mod state;
pub mod tools;

pub use engine::{connect_providers, Game};
pub use hints::{generate_hint, HINTS_EXHAUSTED};
pub use state::{GameReport, GameState, Player};
pub use tools::{execute_tool, lenient_match};
