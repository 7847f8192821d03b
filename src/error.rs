use thiserror::Error;

use crate::algorithms::UnknownAlgorithmError;
use crate::problems::maze_2d::Maze2DProblemParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] Maze2DProblemParseError),
    #[error(transparent)]
    AlgorithmUnrecognized(#[from] UnknownAlgorithmError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
