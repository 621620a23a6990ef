/*
Search state keys.

Grid positions and time-expanded positions are plain `Copy` structs with
structural `Hash`/`Eq`, so they can key the distance table directly. When
every field fits a known number of bits, `pack3` folds three fields into one
integer instead.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonal neighbors that stay inside a `height` x `width` grid.
    pub fn neighbors4(self, height: usize, width: usize) -> Neighbors4 {
        Neighbors4 {
            center: self,
            height,
            width,
            step: 0,
        }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Cursor over up, left, down, right, skipping cells outside the grid.
#[derive(Debug, Clone)]
pub struct Neighbors4 {
    center: Coord,
    height: usize,
    width: usize,
    step: u8,
}

impl Iterator for Neighbors4 {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let Coord { row, col } = self.center;
        while self.step < 4 {
            let step = self.step;
            self.step += 1;
            let candidate = match step {
                0 if row > 0 => Coord::new(row - 1, col),
                1 if col > 0 => Coord::new(row, col - 1),
                2 if row + 1 < self.height => Coord::new(row + 1, col),
                3 if col + 1 < self.width => Coord::new(row, col + 1),
                _ => continue,
            };
            return Some(candidate);
        }
        None
    }
}

/// A grid position at a point in time, for boards whose free cells change
/// every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimedCoord {
    pub x: i32,
    pub y: i32,
    pub t: u32,
}

impl TimedCoord {
    pub const fn new(x: i32, y: i32, t: u32) -> Self {
        Self { x, y, t }
    }

    /// Wait in place or step in one of four directions, one tick later.
    pub fn moves(self) -> Moves {
        Moves {
            from: self,
            step: 0,
        }
    }

    /// Grid distance to `other`, ignoring time.
    pub fn manhattan_to(self, other: TimedCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn same_cell(self, other: TimedCoord) -> bool {
        self.x == other.x && self.y == other.y
    }
}

#[derive(Debug, Clone)]
pub struct Moves {
    from: TimedCoord,
    step: u8,
}

impl Iterator for Moves {
    type Item = TimedCoord;

    fn next(&mut self) -> Option<TimedCoord> {
        const DELTAS: [(i32, i32); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];
        let &(dx, dy) = DELTAS.get(self.step as usize)?;
        self.step += 1;
        let TimedCoord { x, y, t } = self.from;
        Some(TimedCoord::new(x + dx, y + dy, t + 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = 5 - self.step as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Moves {}

/// Packs three fields of `bits` bits each into one integer, first field in
/// the lowest bits. Fields must fit; this is checked in debug builds.
#[inline]
pub fn pack3(a: u32, b: u32, c: u32, bits: u32) -> u64 {
    debug_assert!(bits > 0 && bits <= 21, "unsupported field width {}", bits);
    let mask = (1u64 << bits) - 1;
    debug_assert!(
        (a as u64) <= mask && (b as u64) <= mask && (c as u64) <= mask,
        "field does not fit in {} bits",
        bits
    );
    (a as u64 & mask) | (b as u64 & mask) << bits | (c as u64 & mask) << (2 * bits)
}

#[inline]
pub fn unpack3(key: u64, bits: u32) -> (u32, u32, u32) {
    let mask = (1u64 << bits) - 1;
    (
        (key & mask) as u32,
        (key >> bits & mask) as u32,
        (key >> (2 * bits) & mask) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_neighbors() {
        let n: Vec<Coord> = Coord::new(0, 0).neighbors4(3, 3).collect();
        assert_eq!(n, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn center_has_four_neighbors() {
        let n: Vec<Coord> = Coord::new(1, 1).neighbors4(3, 3).collect();
        assert_eq!(
            n,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(2, 1),
                Coord::new(1, 2)
            ]
        );
    }

    #[test]
    fn neighbors_restart() {
        let cursor = Coord::new(2, 2).neighbors4(3, 3);
        assert_eq!(cursor.clone().count(), 2);
        assert_eq!(cursor.count(), 2);
    }

    #[test]
    fn moves_advance_time() {
        let moves: Vec<TimedCoord> = TimedCoord::new(1, 0, 4).moves().collect();
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|m| m.t == 5));
        assert_eq!(moves[0], TimedCoord::new(1, 0, 5));
        assert_eq!(moves[4], TimedCoord::new(1, -1, 5));
    }

    #[test]
    fn manhattan_ignores_time() {
        let a = TimedCoord::new(1, 0, 3);
        assert_eq!(a.manhattan_to(TimedCoord::new(6, 5, 0)), 10);
        assert_eq!(a.manhattan_to(TimedCoord::new(-2, 0, 9)), 3);
        assert!(a.same_cell(TimedCoord::new(1, 0, 40)));
    }

    #[test]
    fn packed_keys_are_distinct() {
        // Formatted keys would collide here ("1-23" vs "12-3"); packed ones don't.
        assert_ne!(pack3(1, 23, 0, 6), pack3(12, 3, 0, 6));
        assert_eq!(unpack3(pack3(63, 0, 17, 6), 6), (63, 0, 17));
    }
}
