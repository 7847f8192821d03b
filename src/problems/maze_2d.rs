use std::hash::Hash;

use derive_more::Display;
use nonmax::NonMaxU32;
use thiserror::Error;

use crate::problem::ObjectiveHeuristic;
use crate::problem::Problem;
use crate::space::Cost;
use crate::space::Neighbours;
use crate::space::Space;
use crate::space::State;

pub(crate) type CoordIntrinsic = u32;
pub type Coord = NonMaxU32;

/// A cell position, `x` being the column and `y` the row.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("({x},{y})")]
pub struct Maze2DState {
    pub(crate) x: Coord,
    pub(crate) y: Coord,
}

impl Maze2DState {
    pub fn new(x: CoordIntrinsic, y: CoordIntrinsic) -> Option<Maze2DState> {
        Some(Maze2DState {
            x: Coord::new(x)?,
            y: Coord::new(y)?,
        })
    }
    pub fn new_from_usize(x: usize, y: usize) -> Option<Maze2DState> {
        let x = CoordIntrinsic::try_from(x).ok()?;
        let y = CoordIntrinsic::try_from(y).ok()?;
        Self::new(x, y)
    }
    fn new_from_i64(x: i64, y: i64) -> Option<Maze2DState> {
        let x = CoordIntrinsic::try_from(x).ok()?;
        let y = CoordIntrinsic::try_from(y).ok()?;
        Self::new(x, y)
    }

    /// The column.
    #[inline(always)]
    pub fn x(&self) -> usize {
        self.x.get() as usize
    }
    /// The row.
    #[inline(always)]
    pub fn y(&self) -> usize {
        self.y.get() as usize
    }
}
impl State for Maze2DState {}

pub type Maze2DCost = CoordIntrinsic;
impl Cost for Maze2DCost {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Maze2DCell {
    #[display("█")]
    Wall,
    #[display(" ")]
    Empty,
    #[display("♣")]
    Tree,
}

impl Maze2DCell {
    #[inline(always)]
    pub fn is_traversable(&self) -> bool {
        *self == Maze2DCell::Empty
    }
}

impl std::convert::From<char> for Maze2DCell {
    fn from(ch: char) -> Self {
        match ch {
            'x' | 'X' => Maze2DCell::Wall,
            ' ' => Maze2DCell::Empty,
            _ => Maze2DCell::Tree,
        }
    }
}

/// A grid of cells.
///
/// Rows may have different lengths, bounds are always checked against the
/// row being accessed.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
}

impl Maze2DSpace {
    pub fn new_from_map(map: Vec<Vec<Maze2DCell>>) -> Self {
        Self { map }
    }

    /// The (widest row, number of rows) of the map.
    pub fn dimensions(&self) -> (usize, usize) {
        let max_x = self.map.iter().map(Vec::len).max().unwrap_or(0);
        (max_x, self.map.len())
    }

    pub fn rows(&self) -> &[Vec<Maze2DCell>] {
        &self.map
    }

    /// The cell at `state`, `None` when out of the map.
    #[inline(always)]
    pub fn at(&self, state: &Maze2DState) -> Option<Maze2DCell> {
        self.map.get(state.y())?.get(state.x()).copied()
    }
}

impl Space<Maze2DState> for Maze2DSpace {
    #[inline(always)]
    fn valid(&self, state: &Maze2DState) -> bool {
        self.at(state).is_some()
    }

    /// Gets the traversable neighbours of a given position.
    ///
    /// Neighbours come in a fixed order: left, right, up, down.
    fn adjacent(&self, state: &Maze2DState) -> Neighbours<Maze2DState> {
        let x = state.x.get();
        let y = state.y.get();

        let mut v = Neighbours::<Maze2DState>::new();
        // Out of range coordinates wrap into `CoordIntrinsic::MAX`, which
        // `NonMaxU32` refuses.
        #[rustfmt::skip]
        let candidates = [
            (x.wrapping_sub(1), y                ), // Left
            (x.wrapping_add(1), y                ), // Right
            (x,                 y.wrapping_sub(1)), // Up
            (x,                 y.wrapping_add(1)), // Down
        ];
        for (new_x, new_y) in candidates {
            let Some(s) = Maze2DState::new(new_x, new_y) else {
                continue;
            };
            if self.at(&s).is_some_and(|c| c.is_traversable()) {
                v.push(s);
            }
        }
        v
    }

    fn size(&self) -> Option<usize> {
        Some(self.map.iter().map(Vec::len).sum())
    }
}

impl std::fmt::Display for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.map {
            for cell in line {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

#[derive(Debug, Error)]
pub enum Maze2DProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Missing the {label} position line")]
    MissingPosition { label: &'static str },
    #[error("Invalid {label} position on line {line_number}: '{line}'")]
    InvalidPosition {
        label: &'static str,
        line_number: usize,
        line: String,
    },
    #[error("The {label} position ({x},{y}) is outside of the maze")]
    OutOfBounds { label: &'static str, x: i64, y: i64 },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    start: Maze2DState,
    end: Maze2DState,
}

impl Maze2DProblem {
    /// Builds a problem, checking that both ends lie within the space.
    pub fn new(
        space: Maze2DSpace,
        start: Maze2DState,
        end: Maze2DState,
    ) -> Result<Self, Maze2DProblemParseError> {
        for (label, s) in [("start", start), ("end", end)] {
            if !space.valid(&s) {
                return Err(Maze2DProblemParseError::OutOfBounds {
                    label,
                    x: s.x() as i64,
                    y: s.y() as i64,
                });
            }
        }
        Ok(Self { space, start, end })
    }
}

impl Problem<Maze2DSpace, Maze2DState> for Maze2DProblem {
    fn space(&self) -> &Maze2DSpace {
        &self.space
    }
    fn start(&self) -> Maze2DState {
        self.start
    }
    fn end(&self) -> Maze2DState {
        self.end
    }
}

/// Extracts the two integers of a `<label> <x> <label> <y>` line.
///
/// Commas separate tokens too, so `start 1, 7` reads as `(1, 7)`.
fn position_numbers(line: &str) -> Option<(i64, i64)> {
    let mut numbers = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .skip(1)
        .filter_map(|t| t.parse::<i64>().ok());

    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(x), Some(y), None) => Some((x, y)),
        _ => None,
    }
}

fn parse_position(
    label: &'static str,
    line_index: usize,
    line: &str,
) -> Result<Maze2DState, Maze2DProblemParseError> {
    let (x, y) =
        position_numbers(line).ok_or_else(|| Maze2DProblemParseError::InvalidPosition {
            label,
            line_number: line_index + 1,
            line: line.to_string(),
        })?;

    Maze2DState::new_from_i64(x, y).ok_or(Maze2DProblemParseError::OutOfBounds { label, x, y })
}

impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    /// Parses a maze.
    ///
    /// Rows come first, one per line, until a line starting with 's'. That
    /// line holds the start position unless it has no numbers, in which case
    /// the start is on the next line. The end follows the start.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut lines = s.lines().enumerate();
        let mut map = vec![];

        let mut sentinel = None;
        for (i, line) in lines.by_ref() {
            if line.starts_with('s') {
                sentinel = Some((i, line));
                break;
            }
            map.push(line.chars().map(Maze2DCell::from).collect::<Vec<_>>());
        }

        let space = Maze2DSpace::new_from_map(map);
        let (start_index, start_line) = match sentinel {
            Some((i, line)) if position_numbers(line).is_some() => (i, line),
            Some(_) => lines
                .next()
                .ok_or(Maze2DProblemParseError::MissingPosition { label: "start" })?,
            None if space.map.is_empty() => return Err(Maze2DProblemParseError::EmptyInput),
            None => return Err(Maze2DProblemParseError::MissingPosition { label: "start" }),
        };
        let start = parse_position("start", start_index, start_line)?;

        let (end_index, end_line) = lines
            .next()
            .ok_or(Maze2DProblemParseError::MissingPosition { label: "end" })?;
        let end = parse_position("end", end_index, end_line)?;

        log::debug!(
            "Parsed {:?} maze from {start} to {end}",
            space.dimensions()
        );
        Maze2DProblem::new(space, start, end)
    }
}

impl std::convert::TryFrom<&std::path::Path> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| Maze2DProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;

        Maze2DProblem::try_from(text.as_str())
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.space.dimensions();

        writeln!(
            f,
            "Maze2DProblem({}x{}) (s:{}, g:{}):",
            d.0, d.1, self.start, self.end
        )?;
        for (y, line) in self.space.map.iter().enumerate() {
            for (x, cell) in line.iter().enumerate() {
                let is_start = self.start.x() == x && self.start.y() == y;
                let is_goal = self.end.x() == x && self.end.y() == y;

                match (is_start, is_goal) {
                    (true, true) => {
                        write!(f, "!")?;
                    }
                    (true, false) => {
                        write!(f, "S")?;
                    }
                    (false, true) => {
                        write!(f, "G")?;
                    }
                    (false, false) => {
                        write!(f, "{cell}")?;
                    }
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Maze2DHeuristicManhattan;

impl ObjectiveHeuristic<Maze2DState, Maze2DCost> for Maze2DHeuristicManhattan {
    /// The distance of following straight lines
    #[inline(always)]
    fn h(a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        let delta_x = a.x.get().abs_diff(b.x.get());
        let delta_y = a.y.get().abs_diff(b.y.get());

        delta_x.saturating_add(delta_y)
    }
}
