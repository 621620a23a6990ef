use std::hash::Hash;

use fnv::FnvBuildHasher;
use hashbrown::HashMap;

use crate::heap::{EntryId, HeapTracked};

/// Where a node is in its unvisited → frontier → settled lifecycle.
/// Unvisited nodes have no entry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// In the table but not pushed yet.
    Discovered,
    /// Queued, at the given heap index.
    Frontier(usize),
    /// Popped from the heap; the distance is final.
    Settled,
}

#[derive(Debug, Clone)]
pub struct Entry<N, D> {
    pub node: N,
    pub distance: D,
    pub state: NodeState,
    /// Entry this one was reached from. `None` for sources.
    pub parent: Option<EntryId>,
}

impl<N, D> Entry<N, D> {
    pub fn is_settled(&self) -> bool {
        self.state == NodeState::Settled
    }
}

impl<N, D> HeapTracked for Entry<N, D> {
    fn heap_position(&self) -> Option<usize> {
        match self.state {
            NodeState::Frontier(position) => Some(position),
            NodeState::Discovered | NodeState::Settled => None,
        }
    }

    fn set_heap_position(&mut self, position: Option<usize>) {
        self.state = match position {
            Some(position) => NodeState::Frontier(position),
            None => NodeState::Settled,
        };
    }
}

/// Arena of search entries plus a node → entry index.
///
/// Entries are never removed, so an `EntryId` stays valid for the lifetime of
/// the table and the heap can refer to entries by id.
#[derive(Debug, Clone)]
pub struct DistanceTable<N, D> {
    entries: Vec<Entry<N, D>>,
    index: HashMap<N, EntryId, FnvBuildHasher>,
}

impl<N, D> Default for DistanceTable<N, D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::with_hasher(FnvBuildHasher::default()),
        }
    }
}

impl<N, D> DistanceTable<N, D>
where
    N: Hash + Eq + Clone,
    D: Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id_of(&self, node: &N) -> Option<EntryId> {
        self.index.get(node).copied()
    }

    pub fn entry(&self, id: EntryId) -> &Entry<N, D> {
        &self.entries[id]
    }

    pub fn entry_mut(&mut self, id: EntryId) -> &mut Entry<N, D> {
        &mut self.entries[id]
    }

    pub fn get(&self, node: &N) -> Option<&Entry<N, D>> {
        self.id_of(node).map(|id| &self.entries[id])
    }

    /// Best known distance, settled or not.
    pub fn distance(&self, node: &N) -> Option<D> {
        self.get(node).map(|e| e.distance)
    }

    /// `None` means the node has not been discovered yet.
    pub fn state(&self, node: &N) -> Option<NodeState> {
        self.get(node).map(|e| e.state)
    }

    /// Creates an entry for a node that is not in the table yet. The entry
    /// starts out `Discovered`; pushing it is the caller's job.
    pub fn insert(&mut self, node: N, distance: D, parent: Option<EntryId>) -> EntryId {
        debug_assert!(!self.index.contains_key(&node), "node inserted twice");
        let id = self.entries.len();
        self.index.insert(node.clone(), id);
        self.entries.push(Entry {
            node,
            distance,
            state: NodeState::Discovered,
            parent,
        });
        id
    }

    /// The arena itself, for heap operations.
    pub fn arena_mut(&mut self) -> &mut [Entry<N, D>] {
        &mut self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<N, D>> {
        self.entries.iter()
    }

    pub fn settled(&self) -> impl Iterator<Item = &Entry<N, D>> {
        self.entries.iter().filter(|e| e.is_settled())
    }

    /// Nodes from the source that led to `id`, up to and including `id`.
    pub fn path_to(&self, id: EntryId) -> Vec<N> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(at) = cur {
            path.push(self.entries[at].node.clone());
            cur = self.entries[at].parent;
        }
        path.reverse();
        path
    }

    /// Distances of settled nodes only. Discovered and frontier distances
    /// may still shrink and are left out.
    pub fn into_settled_distances(self) -> HashMap<N, D, FnvBuildHasher> {
        let mut out = HashMap::with_capacity_and_hasher(self.entries.len(), FnvBuildHasher::default());
        for entry in self.entries {
            if entry.is_settled() {
                out.insert(entry.node, entry.distance);
            }
        }
        out
    }
}
