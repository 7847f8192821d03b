//! The traversal skeleton shared by every search strategy.
//!
//! Strategies only differ in their [`Frontier`]. Everything else, the
//! bookkeeping of visited states and their predecessors, the recording of the
//! [`Trace`] and the path reconstruction, lives here.

use std::fmt::Debug;

use rustc_hash::FxHashMap;

use crate::space::Cost;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    /// The state this one was reached from. `None` only for the start.
    pub(crate) parent: Option<St>,
    /// Path cost from the start.
    pub(crate) g: C,
    /// Whether the state has been expanded already.
    pub(crate) closed: bool,
}

/// The states reached by a search, each with the state it was reached from.
///
/// A state is in the tree exactly when it has been visited, so this doubles as
/// the visited set.
pub struct SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    nodes: FxHashMap<St, SearchTreeNode<St, C>>,
}

impl<St, C> SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        self.nodes.contains_key(s)
    }

    #[inline(always)]
    #[must_use]
    pub fn g(&self, s: &St) -> Option<C> {
        self.nodes.get(s).map(|n| n.g)
    }

    #[inline(always)]
    #[must_use]
    pub fn parent(&self, s: &St) -> Option<St> {
        self.nodes.get(s).and_then(|n| n.parent)
    }

    /// Reaches a state for the first time.
    ///
    /// Returns false, leaving the tree untouched, if the state had already
    /// been reached.
    pub fn reach(&mut self, s: St, parent: Option<St>, g: C) -> bool {
        debug_assert!(parent.is_none_or(|p| self.contains(&p)));
        match self.nodes.entry(s) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(SearchTreeNode {
                    parent,
                    g,
                    closed: false,
                });
                true
            }
        }
    }

    /// Reroutes an open state through `parent` if that makes it cheaper.
    ///
    /// Returns whether the state was improved. Closed states are never
    /// touched.
    pub fn improve(&mut self, s: &St, parent: St, g: C) -> bool {
        match self.nodes.get_mut(s) {
            Some(node) if !node.closed && g < node.g => {
                node.parent = Some(parent);
                node.g = g;
                true
            }
            _ => false,
        }
    }

    /// Closes a state popped from the frontier with path cost `g`.
    ///
    /// Returns false for stale frontier entries, either because the state was
    /// expanded already or because it has been improved since.
    pub fn close(&mut self, s: &St, g: C) -> bool {
        match self.nodes.get_mut(s) {
            Some(node) if !node.closed && g <= node.g => {
                node.closed = true;
                true
            }
            _ => false,
        }
    }

    /// Reconstructs the path from the root of the tree to `end`.
    ///
    /// Returns `None` if `end` was never reached.
    #[must_use]
    pub fn path(&self, end: &St) -> Option<Path<St>> {
        let mut node = self.nodes.get(end)?;
        let mut path = Path::new_from_start(*end);

        while let Some(parent) = node.parent {
            path.append(parent);
            node = match self.nodes.get(&parent) {
                Some(node) => node,
                None => unreachable!("Parent {parent} was never reached"),
            };
            debug_assert!(path.len() <= self.nodes.len(), "Cycle in search tree");
        }

        path.reverse();
        Some(path)
    }
}

impl<St, C> Default for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::fmt::Debug for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// The recording of a search, kept to replay it later.
#[derive(Clone, PartialEq, Eq)]
pub struct Trace<St>
where
    St: State,
{
    /// States in the order they were first discovered, start included.
    visited_in_order: Vec<St>,
    /// The states each state discovered, in discovery order.
    opened: FxHashMap<St, Vec<St>>,
}

impl<St> Trace<St>
where
    St: State,
{
    pub fn new() -> Self {
        Self {
            visited_in_order: vec![],
            opened: FxHashMap::default(),
        }
    }

    #[inline(always)]
    pub fn visit(&mut self, s: St) {
        self.visited_in_order.push(s);
    }
    #[inline(always)]
    pub fn open(&mut self, parent: St, child: St) {
        self.opened.entry(parent).or_default().push(child);
    }

    pub fn visited_in_order(&self) -> &[St] {
        &self.visited_in_order
    }
    pub fn opened(&self) -> &FxHashMap<St, Vec<St>> {
        &self.opened
    }
    /// The states discovered by `s`, empty if it discovered none.
    pub fn opened_by(&self, s: &St) -> &[St] {
        self.opened.get(s).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.visited_in_order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.visited_in_order.is_empty()
    }

    pub fn clear(&mut self) {
        self.visited_in_order.clear();
        self.opened.clear();
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify(&self) {
        use rustc_hash::FxHashSet;

        // Every state is discovered once,
        let mut seen = FxHashSet::default();
        for s in &self.visited_in_order {
            assert!(seen.insert(*s), "{s} was visited twice");
        }
        // - by a single parent, and after it.
        let mut opened_children = FxHashSet::default();
        for (parent, children) in &self.opened {
            assert!(seen.contains(parent), "{parent} opened without a visit");
            for child in children {
                assert!(opened_children.insert(*child), "{child} opened twice");
                assert!(seen.contains(child), "{child} opened without a visit");
            }
        }
    }
}

impl<St> Default for Trace<St>
where
    St: State,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St> std::fmt::Debug for Trace<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Trace{{({} visited, {} opening)}}",
            self.visited_in_order.len(),
            self.opened.len()
        )
    }
}

/// Discovered states waiting to be expanded.
///
/// The discipline of the frontier is what tells search strategies apart.
pub trait Frontier<St, C>: Debug
where
    St: State,
    C: Cost,
{
    /// Adds a newly discovered state reached with path cost `g`.
    fn push(&mut self, s: St, g: C);
    /// Takes the next state to expand, with its path cost.
    fn pop(&mut self) -> Option<(St, C)>;
    fn len(&self) -> usize;

    /// Whether states discovered through a cheaper path get re-pushed.
    ///
    /// Stale entries left behind are skipped when popped.
    const IMPROVES_PATHS: bool = false;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The result of running a traversal.
#[derive(Debug)]
pub struct SearchRun<St>
where
    St: State,
{
    pub trace: Trace<St>,
    /// The path from start to end, `None` when the end was not reached.
    pub path: Option<Path<St>>,
    /// Number of states expanded. Stale frontier entries are not counted.
    pub expanded: usize,
}

/// Searches `space` from `start` until `end` is discovered or the frontier runs
/// out.
///
/// A state is marked as visited when it's discovered, and the search stops as
/// soon as `end` is discovered, without opening the remaining neighbours of the
/// state that found it. The end is still recorded in its discoverer's
/// `opened` list.
///
/// Frontiers with [`Frontier::IMPROVES_PATHS`] also get open states re-pushed
/// when a cheaper path to them shows up. This only changes the predecessor
/// used for the path, the trace keeps the first discovery.
pub fn traverse<Sp, St, C, F>(space: &Sp, start: St, end: St, frontier: &mut F) -> SearchRun<St>
where
    Sp: Space<St>,
    St: State,
    C: Cost,
    F: Frontier<St, C>,
{
    let mut tree = SearchTree::<St, C>::new();
    let mut trace = Trace::<St>::new();
    let mut expanded = 0usize;

    tree.reach(start, None, C::zero());
    trace.visit(start);
    frontier.push(start, C::zero());

    'search: while let Some((v, g)) = frontier.pop() {
        debug_assert!(tree.contains(&v));
        if !tree.close(&v, g) {
            continue;
        }
        expanded += 1;
        log::trace!("Expanding {v} (g={g})");

        let neigh_g = g.saturating_add(&C::one());
        for w in space.adjacent(&v) {
            if !tree.reach(w, Some(v), neigh_g) {
                if F::IMPROVES_PATHS && tree.improve(&w, v, neigh_g) {
                    log::trace!("Improved {w} through {v} (g={neigh_g})");
                    frontier.push(w, neigh_g);
                }
                continue;
            }
            trace.visit(w);
            frontier.push(w, neigh_g);
            trace.open(v, w);
            if w == end {
                break 'search;
            }
        }
    }

    trace.verify();
    let path = tree.path(&end);
    debug_assert!(path.as_ref().is_none_or(|p| space.valid_path(p)));

    SearchRun {
        trace,
        path,
        expanded,
    }
}
