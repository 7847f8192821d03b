use shadow_rs::shadow;

shadow!(build);

// Search space and problems
// -------------------------
pub mod problem;
pub mod search;
pub mod space;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;

// Replay
// ------
pub mod graph;

pub mod error;
pub use error::Error;
pub use error::Result;
