/*
Height-map climbing: a rectangular grid of `a`..`z` heights with one `S`
(height `a`) and one `E` (height `z` unless told otherwise). A step goes to an
orthogonal neighbor at most one level higher.
*/

use crate::error::{Error, Result};
use crate::key::Coord;
use crate::search::{shortest_path, Reached};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    heights: Vec<Vec<u8>>,
    width: usize,
    pub start: Coord,
    pub end: Coord,
}

impl HeightMap {
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_levels(input, b'a', b'z')
    }

    /// Parses with explicit heights for the `S` and `E` markers.
    pub fn parse_with_levels(input: &str, start_level: u8, end_level: u8) -> Result<Self> {
        let mut heights = Vec::new();
        let mut start = None;
        let mut end = None;

        for (row, line) in input.lines().filter(|l| !l.is_empty()).enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, b) in line.bytes().enumerate() {
                let height = match b {
                    b'S' => {
                        start = Some(Coord::new(row, col));
                        start_level
                    }
                    b'E' => {
                        end = Some(Coord::new(row, col));
                        end_level
                    }
                    b'a'..=b'z' => b,
                    _ => {
                        return Err(Error::Parse {
                            line: row + 1,
                            reason: format!("unexpected cell {:?}", b as char),
                        })
                    }
                };
                cells.push(height);
            }
            heights.push(cells);
        }

        // Ragged rows are cut to the shortest one.
        let width = heights.iter().map(Vec::len).min().unwrap_or(0);
        let missing = |what: &str| Error::Parse {
            line: 0,
            reason: format!("no {} marker", what),
        };
        let start = start.ok_or_else(|| missing("S"))?;
        let end = end.ok_or_else(|| missing("E"))?;
        if start.col >= width || end.col >= width {
            return Err(Error::Parse {
                line: 0,
                reason: "marker outside the common row width".to_string(),
            });
        }

        Ok(Self {
            heights,
            width,
            start,
            end,
        })
    }

    pub fn height(&self) -> usize {
        self.heights.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn level(&self, c: Coord) -> u8 {
        self.heights[c.row][c.col]
    }

    /// Neighbors reachable in one step: at most one level up, any level down.
    pub fn climbs(&self, from: Coord) -> impl Iterator<Item = (Coord, u32)> + '_ {
        let here = u16::from(self.level(from));
        from.neighbors4(self.height(), self.width)
            .filter(move |&n| u16::from(self.level(n)) <= here + 1)
            .map(|n| (n, 1))
    }

    /// The same moves walked backwards: at most one level down, any level up.
    pub fn descents(&self, from: Coord) -> impl Iterator<Item = (Coord, u32)> + '_ {
        let here = u16::from(self.level(from));
        from.neighbors4(self.height(), self.width)
            .filter(move |&n| u16::from(self.level(n)) + 1 >= here)
            .map(|n| (n, 1))
    }

    /// Fewest steps from `S` to `E`.
    pub fn climb(&self) -> Result<Reached<Coord, u32>> {
        let end = self.end;
        shortest_path([(self.start, 0)], |&c: &Coord| self.climbs(c), |&c| c == end)
    }

    /// Fewest steps from any `a` cell to `E`, found by searching backwards from `E`.
    pub fn shortest_hike(&self) -> Result<Reached<Coord, u32>> {
        let mut reached = shortest_path(
            [(self.end, 0)],
            |&c: &Coord| self.descents(c),
            |&c| self.level(c) == b'a',
        )?;
        reached.path.reverse();
        Ok(reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Sabqponm\nabcryxxl\naccszExk\nacctuvwj\nabdefghi\n";

    const SMALL: &str = "Sbcde\nxxxxf\nEjihg\naaaaa\naaaaa\n";

    #[test]
    fn sample_climb() {
        let map = HeightMap::parse(SAMPLE).unwrap();
        assert_eq!(map.start, Coord::new(0, 0));
        assert_eq!(map.end, Coord::new(2, 5));
        let reached = map.climb().unwrap();
        assert_eq!(reached.distance, 31);
        assert_eq!(reached.path.len(), 32);
    }

    #[test]
    fn sample_hike() {
        let map = HeightMap::parse(SAMPLE).unwrap();
        let reached = map.shortest_hike().unwrap();
        assert_eq!(reached.distance, 29);
        assert_eq!(map.level(reached.path[0]), b'a');
        assert_eq!(reached.path.last(), Some(&map.end));
    }

    #[test]
    fn five_by_five_switchback() {
        // E sits at height k; the x row blocks every shortcut, so the route is
        // S b c d e along the top, f down the side, then g h i j back to E.
        let map = HeightMap::parse_with_levels(SMALL, b'a', b'k').unwrap();
        let reached = map.climb().unwrap();
        assert_eq!(reached.distance, 10);
        assert_eq!(reached.path.last(), Some(&Coord::new(2, 0)));
        assert_eq!(
            &reached.path[..5],
            &[
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(0, 3),
                Coord::new(0, 4)
            ]
        );
    }

    #[test]
    fn marker_levels_at_the_top_of_the_range() {
        let map = HeightMap::parse_with_levels("SzE\n", u8::MAX, b'z').unwrap();
        assert_eq!(map.climb().unwrap().distance, 2);

        // Walking back from E looks at S, whose level is u8::MAX.
        let map = HeightMap::parse_with_levels("aES\n", u8::MAX, b'b').unwrap();
        assert_eq!(map.shortest_hike().unwrap().distance, 1);
    }

    #[test]
    fn walled_off_end_is_unreachable() {
        let map = HeightMap::parse("Sbz\nzzz\nzzE\n").unwrap();
        assert!(matches!(map.climb(), Err(Error::Unreachable { settled: 2 })));
    }

    #[test]
    fn rejects_bad_cells_and_missing_markers() {
        assert_eq!(
            HeightMap::parse("Sa\na#E\n"),
            Err(Error::Parse {
                line: 2,
                reason: "unexpected cell '#'".to_string()
            })
        );
        assert!(HeightMap::parse("abc\n").is_err());
    }
}
