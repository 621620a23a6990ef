/*
Adjacency-list single-source searches used to cross-check and time the
indexed search: a lazy-deletion `BinaryHeap` Dijkstra and one backed by
`orx_priority_queue`'s decrease-key heap. Distances are `None` when
unreachable.
*/

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use orx_priority_queue::*;

use crate::cost::Cost;
use crate::search::Dijkstra;

pub type Adjacency<W> = Vec<Vec<(usize, W)>>;

#[derive(Copy, Clone, PartialEq, Eq)]
struct State<W> {
    cost: W,
    node_id: usize,
}

// Min-heap by cost
impl<W: Ord> Ord for State<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other.cost.cmp(&self.cost)
    }
}

impl<W: Ord> PartialOrd for State<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra with re-pushes instead of decrease-key; stale heap states are
/// skipped when popped.
pub fn lazy_dijkstra<W: Cost>(adj: &Adjacency<W>, start: usize) -> Vec<Option<W>> {
    let mut dist: Vec<Option<W>> = vec![None; adj.len()];
    let mut heap = BinaryHeap::new();

    dist[start] = Some(W::ZERO);
    heap.push(State {
        cost: W::ZERO,
        node_id: start,
    });

    while let Some(State { cost, node_id }) = heap.pop() {
        if dist[node_id].is_some_and(|best| cost > best) {
            continue;
        }
        for &(next, w) in &adj[node_id] {
            let next_cost = cost + w;
            if dist[next].map_or(true, |d| next_cost < d) {
                dist[next] = Some(next_cost);
                heap.push(State {
                    cost: next_cost,
                    node_id: next,
                });
            }
        }
    }
    dist
}

/// Dijkstra over `orx_priority_queue::BinaryHeapWithMap`.
pub fn orx_dijkstra<W: Cost>(adj: &Adjacency<W>, start: usize) -> Vec<Option<W>> {
    let mut dist: Vec<Option<W>> = vec![None; adj.len()];
    let mut done = vec![false; adj.len()];
    let mut pq: BinaryHeapWithMap<usize, W> = BinaryHeapWithMap::new();

    dist[start] = Some(W::ZERO);
    pq.decrease_key_or_push(&start, W::ZERO);

    while let Some((node_id, cost)) = pq.pop() {
        done[node_id] = true;
        for &(next, w) in &adj[node_id] {
            let next_cost = cost + w;
            if !done[next] && dist[next].map_or(true, |d| next_cost < d) {
                dist[next] = Some(next_cost);
                pq.decrease_key_or_push(&next, next_cost);
            }
        }
    }
    dist
}

/// The indexed-heap search over the same adjacency list.
pub fn indexed_dijkstra<W: Cost>(adj: &Adjacency<W>, start: usize) -> Vec<Option<W>> {
    let settled = Dijkstra::new()
        .with_sources([(start, W::ZERO)])
        .run_all(|&u: &usize| adj[u].iter().copied());
    (0..adj.len()).map(|v| settled.get(&v).copied()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SspAlgorithm {
    Indexed,
    Lazy,
    Orx,
}

impl SspAlgorithm {
    pub fn from(string: &str) -> Option<Self> {
        match string {
            "indexed" => Some(SspAlgorithm::Indexed),
            "lazy" => Some(SspAlgorithm::Lazy),
            "orx" => Some(SspAlgorithm::Orx),
            _ => None,
        }
    }

    pub fn run<W: Cost>(&self, neighbors: &Adjacency<W>, start: usize) -> Vec<Option<W>> {
        match self {
            SspAlgorithm::Indexed => indexed_dijkstra(neighbors, start),
            SspAlgorithm::Lazy => lazy_dijkstra(neighbors, start),
            SspAlgorithm::Orx => orx_dijkstra(neighbors, start),
        }
    }
}

/// Builds an adjacency list sized to the largest node id seen.
pub fn build_adjacency_list<W: Copy>(edges: &[(usize, usize, W)]) -> Adjacency<W> {
    let max_node = edges
        .iter()
        .map(|&(u, v, _)| u.max(v))
        .max()
        .unwrap_or(0);

    let mut adj: Adjacency<W> = vec![Vec::new(); max_node + 1];
    for &(u, v, w) in edges {
        adj[u].push((v, w));
    }
    adj
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn sample_graph() {
        let mut neighbors: Adjacency<u32> = vec![Vec::new(); 11];
        neighbors[0] = vec![(1, 0), (2, 1), (7, 5)];
        neighbors[1] = vec![(3, 3), (4, 2)];
        neighbors[2] = vec![(4, 3), (5, 2)];
        neighbors[3] = vec![(6, 2)];
        neighbors[4] = vec![(6, 2)];
        neighbors[6] = vec![(8, 3)];
        neighbors[7] = vec![(9, 2)];
        neighbors[8] = vec![(10, 1)];
        neighbors[9] = vec![(10, 2)];

        let expected: Vec<Option<u32>> = [0, 0, 1, 3, 2, 3, 4, 5, 7, 7, 8].into_iter().map(Some).collect();
        for algorithm in [SspAlgorithm::Indexed, SspAlgorithm::Lazy, SspAlgorithm::Orx] {
            assert_eq!(algorithm.run(&neighbors, 0), expected, "{algorithm:?}");
        }
    }

    #[test]
    fn algorithms_agree_on_random_float_graphs() {
        for seed in 0..20_u64 {
            let mut rng = StdRng::seed_from_u64(0xF10A_0000 + seed);
            let n = 64;
            let edges: Vec<(usize, usize, OrderedFloat<f64>)> = (0..300)
                .map(|_| {
                    let w = (rng.random_range(0.0..100.0_f64) * 4.0).round() / 4.0;
                    (rng.random_range(0..n), rng.random_range(0..n), OrderedFloat(w))
                })
                .collect();
            let adj = build_adjacency_list(&edges);
            let src = seed as usize % adj.len();
            let indexed = SspAlgorithm::Indexed.run(&adj, src);
            assert_eq!(SspAlgorithm::Lazy.run(&adj, src), indexed, "seed={seed}");
            assert_eq!(SspAlgorithm::Orx.run(&adj, src), indexed, "seed={seed}");
        }
    }

    #[test]
    fn unknown_algorithm_name() {
        assert_eq!(SspAlgorithm::from("bmssp"), None);
        assert_eq!(SspAlgorithm::from("orx"), Some(SspAlgorithm::Orx));
    }

    #[test]
    fn adjacency_list_covers_max_node() {
        let adj = build_adjacency_list(&[(0, 3, 1u8), (2, 0, 4u8)]);
        assert_eq!(adj.len(), 4);
        assert_eq!(adj[2], vec![(0, 4)]);
    }
}
