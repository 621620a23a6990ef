/*
Binary min-heap over entries that live in an external arena.

The heap stores entry ids only. Every time an id lands in a slot, the entry's
own position field (see `HeapTracked`) is updated, so whoever owns the arena
can lower an entry's key in place and call `sift_up` at the recorded position.
That pair of steps is the decrease-key operation; there is no dedicated one.
*/

use std::marker::PhantomData;

/// Stable index of an entry inside the arena that owns it.
pub type EntryId = usize;

/// An arena entry that remembers where it currently sits in a heap.
pub trait HeapTracked {
    fn heap_position(&self) -> Option<usize>;
    fn set_heap_position(&mut self, position: Option<usize>);
}

/// Strict "less-than" ordering used to arrange the heap.
pub trait Comparator<E> {
    fn less(&self, a: &E, b: &E) -> bool;
}

impl<E, F> Comparator<E> for F
where
    F: Fn(&E, &E) -> bool,
{
    #[inline]
    fn less(&self, a: &E, b: &E) -> bool {
        self(a, b)
    }
}

#[derive(Debug, Clone)]
pub struct IndexedMinHeap<E, C> {
    slots: Vec<EntryId>,
    cmp: C,
    _entries: PhantomData<fn(&E)>,
}

impl<E, C> IndexedMinHeap<E, C> {
    pub fn new(cmp: C) -> Self {
        Self::with_capacity(cmp, 0)
    }

    pub fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            cmp,
            _entries: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entry ids in heap (array) order.
    pub fn ids(&self) -> &[EntryId] {
        &self.slots
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the entry id stored at `index`. Panics when out of range.
    pub fn peek(&self, index: usize) -> EntryId {
        self.check_index(index);
        self.slots[index]
    }

    pub fn peek_min(&self) -> EntryId {
        self.peek(0)
    }

    #[inline(always)]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.slots.len(),
            "heap index {} out of range for length {}",
            index,
            self.slots.len()
        );
    }

    #[inline(always)]
    fn parent_of(index: usize) -> usize {
        (index - 1) >> 1
    }

    #[inline(always)]
    fn left_child_of(index: usize) -> usize {
        (index << 1) + 1
    }
}

impl<E, C> IndexedMinHeap<E, C>
where
    E: HeapTracked,
    C: Comparator<E>,
{
    /// Inserts `id` and sifts it up. The entry must not already be queued.
    pub fn push(&mut self, arena: &mut [E], id: EntryId) {
        debug_assert!(
            arena[id].heap_position().is_none(),
            "entry {} is already queued",
            id
        );
        let index = self.slots.len();
        self.slots.push(id);
        arena[id].set_heap_position(Some(index));
        self.sift_up(arena, index);
    }

    /// Removes the entry at `index` and returns its id. Panics when out of range.
    pub fn pop(&mut self, arena: &mut [E], index: usize) -> EntryId {
        self.check_index(index);
        let removed = self.slots.swap_remove(index);
        arena[removed].set_heap_position(None);

        if index < self.slots.len() {
            // The former last entry now fills the hole. It may belong above or below it.
            let moved = self.slots[index];
            arena[moved].set_heap_position(Some(index));
            if self.sift_down(arena, index) == index {
                self.sift_up(arena, index);
            }
        }
        removed
    }

    pub fn pop_min(&mut self, arena: &mut [E]) -> EntryId {
        self.pop(arena, 0)
    }

    /// Moves the entry at `index` toward the root while it is less than its
    /// parent. Returns the index it ends up at.
    pub fn sift_up(&mut self, arena: &mut [E], mut index: usize) -> usize {
        self.check_index(index);
        let id = self.slots[index];
        while index > 0 {
            let parent = Self::parent_of(index);
            let parent_id = self.slots[parent];
            if !self.cmp.less(&arena[id], &arena[parent_id]) {
                break;
            }
            self.place(arena, index, parent_id);
            index = parent;
        }
        self.place(arena, index, id);
        index
    }

    /// Moves the entry at `index` toward the leaves while a child is less
    /// than it. Returns the index it ends up at.
    pub fn sift_down(&mut self, arena: &mut [E], mut index: usize) -> usize {
        self.check_index(index);
        let id = self.slots[index];
        let len = self.slots.len();
        loop {
            let left = Self::left_child_of(index);
            if left >= len {
                break;
            }
            let right = left + 1;

            let mut child = left;
            if right < len && self.cmp.less(&arena[self.slots[right]], &arena[self.slots[left]]) {
                child = right;
            }

            let child_id = self.slots[child];
            if !self.cmp.less(&arena[child_id], &arena[id]) {
                break;
            }
            self.place(arena, index, child_id);
            index = child;
        }
        self.place(arena, index, id);
        index
    }

    /// Empties the heap, clearing the position of every queued entry.
    pub fn clear(&mut self, arena: &mut [E]) {
        for &id in &self.slots {
            arena[id].set_heap_position(None);
        }
        self.slots.clear();
    }

    /// True when both the heap order and every entry's recorded position hold.
    pub fn check_invariants(&self, arena: &[E]) -> bool {
        self.slots.iter().enumerate().all(|(index, &id)| {
            if arena[id].heap_position() != Some(index) {
                return false;
            }
            let left = Self::left_child_of(index);
            [left, left + 1]
                .into_iter()
                .filter(|&child| child < self.slots.len())
                .all(|child| !self.cmp.less(&arena[self.slots[child]], &arena[id]))
        })
    }

    #[inline(always)]
    fn place(&mut self, arena: &mut [E], index: usize, id: EntryId) {
        self.slots[index] = id;
        arena[id].set_heap_position(Some(index));
    }
}
