use std::hash::Hash;

use fnv::FnvBuildHasher;
use hashbrown::HashMap;

use crate::cost::Cost;
use crate::error::{Error, Result};
use crate::heap::{Comparator, EntryId, IndexedMinHeap};
use crate::table::{DistanceTable, Entry, NodeState};

/// Final distances of every node a full search settled.
pub type Distances<N, D> = HashMap<N, D, FnvBuildHasher>;

/// Orders frontier entries by tentative distance alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByDistance;

impl<N, D: Ord> Comparator<Entry<N, D>> for ByDistance {
    #[inline]
    fn less(&self, a: &Entry<N, D>, b: &Entry<N, D>) -> bool {
        a.distance < b.distance
    }
}

/// Orders by distance first; among equal distances, prefers the smaller
/// `key(node)` (e.g. an estimate of the remaining distance to the goal).
#[derive(Debug, Clone, Copy)]
pub struct ByDistanceThen<H>(pub H);

impl<N, D, H, K> Comparator<Entry<N, D>> for ByDistanceThen<H>
where
    D: Ord,
    H: Fn(&N) -> K,
    K: Ord,
{
    #[inline]
    fn less(&self, a: &Entry<N, D>, b: &Entry<N, D>) -> bool {
        match a.distance.cmp(&b.distance) {
            std::cmp::Ordering::Equal => (self.0)(&a.node) < (self.0)(&b.node),
            ord => ord.is_lt(),
        }
    }
}

/// A goal node and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached<N, D> {
    pub node: N,
    pub distance: D,
    /// Nodes from a source to `node`, inclusive.
    pub path: Vec<N>,
    /// Nodes popped from the frontier, the goal included.
    pub settled: usize,
}

/// Single-use Dijkstra search over a graph given only by an expansion
/// function. Edge weights must be nonnegative; this is not checked.
///
/// ```
/// use heapsearch::search::Dijkstra;
///
/// // 0 -> 1 -> 2 on a line, each step costs 2.
/// let mut search = Dijkstra::new();
/// search.add_source(0u32, 0u32);
/// let reached = search
///     .run_until(|&n: &u32| (n < 2).then_some((n + 1, 2)), |&n| n == 2)
///     .unwrap();
/// assert_eq!(reached.distance, 4);
/// assert_eq!(reached.path, vec![0, 1, 2]);
/// ```
#[derive(Debug)]
pub struct Dijkstra<N, D, C = ByDistance> {
    table: DistanceTable<N, D>,
    heap: IndexedMinHeap<Entry<N, D>, C>,
    settled: usize,
}

impl<N, D> Dijkstra<N, D, ByDistance>
where
    N: Hash + Eq + Clone,
    D: Cost,
{
    pub fn new() -> Self {
        Self::with_order(ByDistance)
    }
}

impl<N, D> Default for Dijkstra<N, D, ByDistance>
where
    N: Hash + Eq + Clone,
    D: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, D, C> Dijkstra<N, D, C>
where
    N: Hash + Eq + Clone,
    D: Cost,
    C: Comparator<Entry<N, D>>,
{
    /// Search whose frontier is ordered by `order`. The order must compare
    /// distances first for the result to be a shortest path.
    pub fn with_order(order: C) -> Self {
        Self {
            table: DistanceTable::new(),
            heap: IndexedMinHeap::new(order),
            settled: 0,
        }
    }

    /// Seeds the frontier. A node given twice keeps its smaller distance.
    pub fn add_source(&mut self, node: N, distance: D) {
        self.offer(node, distance, None);
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = (N, D)>) -> Self {
        for (node, distance) in sources {
            self.add_source(node, distance);
        }
        self
    }

    pub fn table(&self) -> &DistanceTable<N, D> {
        &self.table
    }

    pub fn settled_count(&self) -> usize {
        self.settled
    }

    pub fn frontier_len(&self) -> usize {
        self.heap.len()
    }

    /// Runs until a popped node satisfies `is_goal`.
    pub fn run_until<X, I, G>(mut self, mut expand: X, mut is_goal: G) -> Result<Reached<N, D>>
    where
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
        G: FnMut(&N) -> bool,
    {
        while let Some(id) = self.settle_next() {
            let entry = self.table.entry(id);
            if is_goal(&entry.node) {
                return Ok(Reached {
                    node: entry.node.clone(),
                    distance: entry.distance,
                    path: self.table.path_to(id),
                    settled: self.settled,
                });
            }
            self.relax_from(id, &mut expand);
        }
        Err(Error::Unreachable {
            settled: self.settled,
        })
    }

    /// Runs until the frontier is exhausted and returns every settled distance.
    pub fn run_all<X, I>(self, expand: X) -> Distances<N, D>
    where
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
    {
        self.explore(expand).into_settled_distances()
    }

    /// Like `run_all`, but keeps the table so paths can be rebuilt.
    pub fn explore<X, I>(mut self, mut expand: X) -> DistanceTable<N, D>
    where
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
    {
        while let Some(id) = self.settle_next() {
            self.relax_from(id, &mut expand);
        }
        self.table
    }

    fn settle_next(&mut self) -> Option<EntryId> {
        if self.heap.is_empty() {
            return None;
        }
        let id = self.heap.pop_min(self.table.arena_mut());
        self.settled += 1;
        Some(id)
    }

    fn relax_from<X, I>(&mut self, id: EntryId, expand: &mut X)
    where
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
    {
        let entry = self.table.entry(id);
        let node = entry.node.clone();
        let distance = entry.distance;
        for (next, weight) in expand(&node) {
            self.offer(next, distance + weight, Some(id));
        }
    }

    /// Discovers `node` at `distance`, or lowers its tentative distance if it
    /// is still in the frontier. Settled nodes are left alone.
    fn offer(&mut self, node: N, distance: D, parent: Option<EntryId>) {
        match self.table.id_of(&node) {
            None => {
                let id = self.table.insert(node, distance, parent);
                self.heap.push(self.table.arena_mut(), id);
            }
            Some(id) => {
                let entry = self.table.entry_mut(id);
                if let NodeState::Frontier(position) = entry.state {
                    if distance < entry.distance {
                        entry.distance = distance;
                        entry.parent = parent;
                        self.heap.sift_up(self.table.arena_mut(), position);
                    }
                }
            }
        }
    }
}

/// Shortest distance from any of `sources` to a node satisfying `is_goal`.
pub fn shortest_path<N, D, X, I, G>(
    sources: impl IntoIterator<Item = (N, D)>,
    expand: X,
    is_goal: G,
) -> Result<Reached<N, D>>
where
    N: Hash + Eq + Clone,
    D: Cost,
    X: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, D)>,
    G: FnMut(&N) -> bool,
{
    Dijkstra::new().with_sources(sources).run_until(expand, is_goal)
}

/// Final distance from `source` to every node reachable from it.
pub fn distances_from<N, D, X, I>(source: N, expand: X) -> Distances<N, D>
where
    N: Hash + Eq + Clone,
    D: Cost,
    X: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, D)>,
{
    Dijkstra::new().with_sources([(source, D::ZERO)]).run_all(expand)
}
