//! Indexed min-heap Dijkstra over implicitly defined graphs.
//!
//! Graphs are never stored by the search: callers hand it an expansion
//! function `&N -> impl IntoIterator<Item = (N, D)>` and, optionally, a goal
//! predicate. The frontier lives in an [`heap::IndexedMinHeap`] whose entries
//! sit in a [`table::DistanceTable`] arena and carry their own heap position,
//! so relaxing an edge lowers the key in place and sifts it up.
//!
//! [`compress::GraphCompressor`] builds on the search to turn a sparse graph
//! into a dense distance table over the nodes that matter.

pub mod baseline;
pub mod blizzard;
pub mod compress;
pub mod cost;
pub mod error;
pub mod grid;
pub mod heap;
pub mod key;
pub mod search;
pub mod table;
pub mod valves;

pub use compress::{DistanceMatrix, GraphCompressor, Strategy};
pub use cost::Cost;
pub use error::{Error, Result};
pub use heap::{Comparator, EntryId, HeapTracked, IndexedMinHeap};
pub use search::{distances_from, shortest_path, ByDistance, ByDistanceThen, Dijkstra, Distances, Reached};
pub use table::{DistanceTable, Entry, NodeState};
