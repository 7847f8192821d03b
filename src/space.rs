use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

pub trait State: Copy + Clone + Debug + std::fmt::Display + PartialEq + Eq + Hash {}
pub trait Cost:
    Copy
    + Clone
    + Debug
    + std::fmt::Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + num_traits::One
    + std::ops::Add<Self, Output = Self>
{
}

/// The neighbours of a State in a 4-connected space.
pub type Neighbours<St> = SmallVec<[St; 4]>;

/// A sequence of states from a start to an end.
///
/// Every consecutive pair of states is one unit-cost step, so the number of
/// steps is one less than the number of states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St>
where
    St: State,
{
    states: Vec<St>,
}

impl<St> Path<St>
where
    St: State,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
        }
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self { states: vec![] }
    }

    #[inline(always)]
    pub fn start(&self) -> Option<St> {
        self.states.first().copied()
    }
    #[inline(always)]
    pub fn end(&self) -> Option<St> {
        self.states.last().copied()
    }

    /// Number of states in the path, including both ends.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
    /// Number of unit steps taken along the path.
    #[inline(always)]
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[inline(always)]
    pub fn states(&self) -> &[St] {
        &self.states
    }

    #[inline(always)]
    pub fn append(&mut self, s: St) {
        self.states.push(s);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }
}

impl<St> Default for Path<St>
where
    St: State,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<St> std::fmt::Display for Path<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {}:{:?}:{})",
                    self.steps(),
                    start,
                    self.states
                        .iter()
                        .take(MAX_ELEMENTS_DISPLAYED)
                        .collect::<Vec<_>>(),
                    end
                )
            }
            _ => write!(f, "Path()"),
        }
    }
}

pub trait Space<St>: std::fmt::Debug
where
    St: State,
{
    /// Verify is a State is valid.
    fn valid(&self, s: &St) -> bool;

    /// Expands a State into its traversable neighbours.
    ///
    /// The order is fixed and part of the contract as it decides discovery
    /// order during searches.
    fn adjacent(&self, s: &St) -> Neighbours<St>;

    /// Checks that every step in the path moves to an adjacent state.
    fn valid_path(&self, p: &Path<St>) -> bool {
        p.states()
            .windows(2)
            .all(|w| self.adjacent(&w[0]).contains(&w[1]))
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct Line(u8);
    impl State for Line {}
    impl std::fmt::Display for Line {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "L{}", self.0)
        }
    }

    #[test]
    fn path_ends_and_steps() {
        let mut path = Path::new_from_start(Line(3));
        path.append(Line(2));
        path.append(Line(1));
        assert_eq!(path.len(), 3);
        assert_eq!(path.steps(), 2);

        path.reverse();
        assert_eq!(path.start(), Some(Line(1)));
        assert_eq!(path.end(), Some(Line(3)));
        assert_eq!(path.to_string(), "Path(2, L1:[Line(1), Line(2), Line(3)]:L3)");
    }

    #[test]
    fn empty_path() {
        let path = Path::<Line>::empty();
        assert!(path.is_empty());
        assert_eq!(path.steps(), 0);
        assert_eq!(path.start(), None);
        assert_eq!(path.to_string(), "Path()");
    }
}
