/*
All-pairs compression of a sparse graph down to its "interesting" nodes.

The sparse graph is a node list plus an expansion function. The result keeps
one row per interesting node (and per designated start node) holding the
shortest distance to every other interesting node. Intermediate nodes and
self-loops disappear.
*/

use std::fmt::Debug;
use std::hash::Hash;

use fnv::FnvBuildHasher;
use hashbrown::{HashMap, HashSet};

use crate::cost::Cost;
use crate::error::{Error, Result};
use crate::search::distances_from;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One full single-source search per kept node.
    #[default]
    RepeatedSearch,
    /// Floyd–Warshall over every node of the sparse graph. O(V³).
    DenseRelaxation,
}

impl Strategy {
    pub fn from(name: &str) -> Option<Self> {
        match name {
            "search" => Some(Strategy::RepeatedSearch),
            "dense" => Some(Strategy::DenseRelaxation),
            _ => None,
        }
    }
}

type Row<N, D> = HashMap<N, D, FnvBuildHasher>;

/// Dense distance table: origin → destination → shortest distance.
/// Unreachable destinations are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix<N: Hash + Eq, D> {
    rows: HashMap<N, Row<N, D>, FnvBuildHasher>,
}

impl<N, D> DistanceMatrix<N, D>
where
    N: Hash + Eq + Clone,
    D: Copy,
{
    fn new() -> Self {
        Self {
            rows: HashMap::with_hasher(FnvBuildHasher::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, from: &N, to: &N) -> Option<D> {
        self.rows.get(from)?.get(to).copied()
    }

    pub fn row(&self, from: &N) -> Option<&Row<N, D>> {
        self.rows.get(from)
    }

    pub fn origins(&self) -> impl Iterator<Item = &N> {
        self.rows.keys()
    }

    /// Rows and their entries in ascending node order.
    pub fn sorted_rows(&self) -> Vec<(N, Vec<(N, D)>)>
    where
        N: Ord,
    {
        let mut rows: Vec<(N, Vec<(N, D)>)> = self
            .rows
            .iter()
            .map(|(from, row)| {
                let mut to: Vec<(N, D)> = row.iter().map(|(n, &d)| (n.clone(), d)).collect();
                to.sort_by(|a, b| a.0.cmp(&b.0));
                (from.clone(), to)
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}

pub struct GraphCompressor<N> {
    nodes: Vec<N>,
    interesting: HashSet<N, FnvBuildHasher>,
    start: Option<N>,
}

impl<N> GraphCompressor<N>
where
    N: Hash + Eq + Clone + Debug,
{
    pub fn new(nodes: impl IntoIterator<Item = N>, mut is_interesting: impl FnMut(&N) -> bool) -> Self {
        let nodes: Vec<N> = nodes.into_iter().collect();
        let interesting = nodes.iter().filter(|n| is_interesting(n)).cloned().collect();
        Self {
            nodes,
            interesting,
            start: None,
        }
    }

    /// Keeps a row for `start` even when it is not interesting itself. It
    /// still only shows up as a destination if it is interesting.
    pub fn with_start(mut self, start: N) -> Self {
        self.start = Some(start);
        self
    }

    pub fn is_interesting(&self, node: &N) -> bool {
        self.interesting.contains(node)
    }

    /// Nodes that get a row: interesting ones in node-list order, then the
    /// start node if it was not among them.
    pub fn origins(&self) -> Vec<N> {
        let mut origins: Vec<N> = self
            .nodes
            .iter()
            .filter(|n| self.interesting.contains(*n))
            .cloned()
            .collect();
        if let Some(start) = &self.start {
            if !self.interesting.contains(start) {
                origins.push(start.clone());
            }
        }
        origins
    }

    pub fn compress<D, X, I>(&self, strategy: Strategy, expand: X) -> Result<DistanceMatrix<N, D>>
    where
        D: Cost,
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
    {
        match strategy {
            Strategy::RepeatedSearch => Ok(self.by_repeated_search(expand)),
            Strategy::DenseRelaxation => self.by_dense_relaxation(expand),
        }
    }

    fn by_repeated_search<D, X, I>(&self, mut expand: X) -> DistanceMatrix<N, D>
    where
        D: Cost,
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
    {
        let mut matrix = DistanceMatrix::new();
        for origin in self.origins() {
            let reached = distances_from(origin.clone(), &mut expand);
            let row: Row<N, D> = reached
                .into_iter()
                .filter(|(to, _)| *to != origin && self.interesting.contains(to))
                .collect();
            matrix.rows.insert(origin, row);
        }
        matrix
    }

    fn by_dense_relaxation<D, X, I>(&self, mut expand: X) -> Result<DistanceMatrix<N, D>>
    where
        D: Cost,
        X: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, D)>,
    {
        let n = self.nodes.len();
        let index: HashMap<&N, usize, FnvBuildHasher> =
            self.nodes.iter().enumerate().map(|(i, node)| (node, i)).collect();
        let lookup = |node: &N| {
            index
                .get(node)
                .copied()
                .ok_or_else(|| Error::UnknownNode(format!("{:?}", node)))
        };

        let mut dist: Vec<Vec<Option<D>>> = vec![vec![None; n]; n];
        for (i, node) in self.nodes.iter().enumerate() {
            dist[i][i] = Some(D::ZERO);
            for (next, weight) in expand(node) {
                let j = lookup(&next)?;
                if dist[i][j].map_or(true, |d| weight < d) {
                    dist[i][j] = Some(weight);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(dik) = dist[i][k] else { continue };
                for j in 0..n {
                    let Some(dkj) = dist[k][j] else { continue };
                    let via = dik + dkj;
                    if dist[i][j].map_or(true, |d| via < d) {
                        dist[i][j] = Some(via);
                    }
                }
            }
        }

        let mut matrix = DistanceMatrix::new();
        for origin in self.origins() {
            let i = lookup(&origin)?;
            let row: Row<N, D> = self
                .nodes
                .iter()
                .enumerate()
                .filter(|&(j, to)| j != i && self.interesting.contains(to))
                .filter_map(|(j, to)| dist[i][j].map(|d| (to.clone(), d)))
                .collect();
            matrix.rows.insert(origin, row);
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn undirected(n: usize, edges: &[(usize, usize, u32)]) -> Vec<Vec<(usize, u32)>> {
        let mut adj = vec![Vec::new(); n];
        for &(u, v, w) in edges {
            adj[u].push((v, w));
            adj[v].push((u, w));
        }
        adj
    }

    #[test]
    fn six_node_matrix() {
        let adj = undirected(
            6,
            &[
                (0, 1, 7),
                (0, 2, 9),
                (0, 5, 14),
                (1, 2, 10),
                (1, 3, 15),
                (2, 3, 11),
                (2, 5, 2),
                (3, 4, 6),
                (4, 5, 9),
            ],
        );
        let expected: [[u32; 6]; 6] = [
            [0, 7, 9, 20, 20, 11],
            [7, 0, 10, 15, 21, 12],
            [9, 10, 0, 11, 11, 2],
            [20, 15, 11, 0, 6, 13],
            [20, 21, 11, 6, 0, 9],
            [11, 12, 2, 13, 9, 0],
        ];

        let compressor = GraphCompressor::new(0..6usize, |_| true);
        for strategy in [Strategy::RepeatedSearch, Strategy::DenseRelaxation] {
            let matrix = compressor.compress(strategy, |&u: &usize| adj[u].clone()).unwrap();
            assert_eq!(matrix.len(), 6);
            for i in 0..6 {
                assert_eq!(matrix.get(&i, &i), None, "{strategy:?}");
                for j in (0..6).filter(|&j| j != i) {
                    assert_eq!(matrix.get(&i, &j), Some(expected[i][j]), "{strategy:?} {i}->{j}");
                }
            }
        }
    }

    #[test]
    fn drops_uninteresting_nodes_but_keeps_start() {
        // Valve-like: 0 is the start with no value, 1 and 3 are pass-through.
        let values = [0, 0, 13, 0, 20];
        let adj = undirected(5, &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1)]);
        let compressor = GraphCompressor::new(0..5usize, |&v| values[v] > 0).with_start(0);
        assert_eq!(compressor.origins(), vec![2, 4, 0]);

        let matrix = compressor
            .compress(Strategy::RepeatedSearch, |&u: &usize| adj[u].clone())
            .unwrap();
        assert_eq!(
            matrix.sorted_rows(),
            vec![
                (0, vec![(2, 2), (4, 4)]),
                (2, vec![(4, 2)]),
                (4, vec![(2, 2)]),
            ]
        );
    }

    #[test]
    fn unreachable_pairs_are_absent() {
        let adj: Vec<Vec<(usize, u32)>> = vec![vec![(1, 3)], vec![], vec![]];
        let compressor = GraphCompressor::new(0..3usize, |_| true);
        for strategy in [Strategy::RepeatedSearch, Strategy::DenseRelaxation] {
            let matrix = compressor.compress(strategy, |&u: &usize| adj[u].clone()).unwrap();
            assert_eq!(matrix.get(&0, &1), Some(3));
            assert_eq!(matrix.get(&1, &0), None);
            assert_eq!(matrix.row(&2).map(|r| r.len()), Some(0));
        }
    }

    #[test]
    fn dense_rejects_unknown_nodes() {
        let compressor = GraphCompressor::new(0..2usize, |_| true);
        let got = compressor.compress(Strategy::DenseRelaxation, |&u: &usize| vec![(u + 5, 1u32)]);
        assert_eq!(got, Err(Error::UnknownNode("5".to_string())));
    }

    #[test]
    fn strategies_agree_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(0xC0FF_EE00);
        for seed in 0..30 {
            let n = rng.random_range(1..=30usize);
            let mut adj = vec![Vec::new(); n];
            for _ in 0..rng.random_range(0..=n * 4) {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                adj[u].push((v, rng.random_range(0..=15u64)));
            }
            let keep: Vec<bool> = (0..n).map(|_| rng.random_bool(0.4)).collect();
            let compressor = GraphCompressor::new(0..n, |&v| keep[v]).with_start(0);

            let searched = compressor
                .compress(Strategy::RepeatedSearch, |&u: &usize| adj[u].clone())
                .unwrap();
            let relaxed = compressor
                .compress(Strategy::DenseRelaxation, |&u: &usize| adj[u].clone())
                .unwrap();
            assert_eq!(searched, relaxed, "seed={seed}");
        }
    }
}
