/*
Blizzard valley crossing: a walled rectangle whose interior blizzards drift one
cell per tick in their arrow's direction and wrap around at the walls. Each
tick the expedition waits or steps to an orthogonal neighbor, and may never
end a tick on a blizzard. The gaps in the top and bottom walls are always free.

The board repeats every lcm(inner width, inner height) ticks, so a search state
only needs the tick modulo that period. States are `(x, y, t mod period)`
packed into one `u64`; the search distance is the absolute tick.
*/

use crate::error::{Error, Result};
use crate::key::{pack3, unpack3, Coord, TimedCoord};
use crate::search::{ByDistanceThen, Dijkstra};

const MAX_KEY_BITS: u32 = 21;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valley {
    cells: Vec<Vec<u8>>,
    width: usize,
    height: usize,
    period: u32,
    bits: u32,
    pub entrance: Coord,
    pub exit: Coord,
}

/// One walk between the two gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossing {
    pub departure: u32,
    /// Tick on which the goal gap was reached.
    pub arrival: u32,
    /// Positions from departure to arrival, one per tick.
    pub path: Vec<TimedCoord>,
    pub settled: usize,
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn parse_error(line: usize, reason: impl Into<String>) -> Error {
    Error::Parse {
        line,
        reason: reason.into(),
    }
}

impl Valley {
    pub fn parse(input: &str) -> Result<Self> {
        let cells: Vec<Vec<u8>> = input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.as_bytes().to_vec())
            .collect();
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if height < 3 || width < 3 {
            return Err(parse_error(0, "valley needs at least 3 rows and 3 columns"));
        }

        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(parse_error(
                    row + 1,
                    format!("row is {} wide, expected {}", line.len(), width),
                ));
            }
            let inner = row > 0 && row + 1 < height;
            for (col, &b) in line.iter().enumerate() {
                let border = !inner || col == 0 || col + 1 == width;
                let ok = match b {
                    b'#' => border,
                    b'.' => true,
                    b'<' | b'>' | b'^' | b'v' => !border,
                    _ => false,
                };
                if !ok {
                    return Err(parse_error(row + 1, format!("unexpected cell {:?} at column {}", b as char, col)));
                }
            }
            if inner && (line[0] != b'#' || line[width - 1] != b'#') {
                return Err(parse_error(row + 1, "side wall has a gap"));
            }
        }

        let gap = |row: usize| -> Result<Coord> {
            let open: Vec<usize> = (0..width).filter(|&c| cells[row][c] != b'#').collect();
            match open[..] {
                [col] if col > 0 && col + 1 < width => Ok(Coord::new(row, col)),
                _ => Err(parse_error(row + 1, "wall needs exactly one gap")),
            }
        };
        let entrance = gap(0)?;
        let exit = gap(height - 1)?;

        let (inner_width, inner_height) = (width - 2, height - 2);
        let period = inner_width / gcd(inner_width, inner_height) * inner_height;
        let largest = (width - 1).max(height - 1).max(period - 1);
        if largest >= 1 << MAX_KEY_BITS {
            return Err(parse_error(0, "valley too large for packed search keys"));
        }
        let largest = largest as u32;
        let bits = (u32::BITS - largest.leading_zeros()).max(1);

        Ok(Self {
            cells,
            width,
            height,
            period: period as u32,
            bits,
            entrance,
            exit,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ticks after which every blizzard is back where it started.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// True when `s` is inside the valley and no blizzard covers it at `s.t`.
    pub fn is_free(&self, s: TimedCoord) -> bool {
        let (Ok(col), Ok(row)) = (usize::try_from(s.x), usize::try_from(s.y)) else {
            return false;
        };
        if row >= self.height || col >= self.width {
            return false;
        }
        let here = Coord::new(row, col);
        if here == self.entrance || here == self.exit {
            return true;
        }
        if row == 0 || col == 0 || row + 1 == self.height || col + 1 == self.width {
            return false;
        }

        // Look back along each direction for a blizzard that lands here at `t`.
        let (inner_width, inner_height) = (self.width - 2, self.height - 2);
        let (c, r) = (col - 1, row - 1);
        let tw = s.t as usize % inner_width;
        let th = s.t as usize % inner_height;
        self.cells[row][1 + (c + inner_width - tw) % inner_width] != b'>'
            && self.cells[row][1 + (c + tw) % inner_width] != b'<'
            && self.cells[1 + (r + inner_height - th) % inner_height][col] != b'v'
            && self.cells[1 + (r + th) % inner_height][col] != b'^'
    }

    fn key(&self, s: TimedCoord) -> u64 {
        pack3(s.x as u32, s.y as u32, s.t % self.period, self.bits)
    }

    fn state(&self, key: u64) -> TimedCoord {
        let (x, y, t) = unpack3(key, self.bits);
        TimedCoord::new(x as i32, y as i32, t)
    }

    fn steps(&self, key: u64) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.state(key)
            .moves()
            .filter(move |&next| self.is_free(next))
            .map(move |next| (self.key(next), 1))
    }

    /// Earliest arrival at `to` when leaving `from` on tick `departure`.
    /// Among states reached on the same tick, the one closer to `to` is
    /// expanded first.
    pub fn cross(&self, from: Coord, to: Coord, departure: u32) -> Result<Crossing> {
        let goal = TimedCoord::new(to.col as i32, to.row as i32, 0);
        let start = TimedCoord::new(from.col as i32, from.row as i32, departure);

        let reached = Dijkstra::with_order(ByDistanceThen(|&k: &u64| self.state(k).manhattan_to(goal)))
            .with_sources([(self.key(start), departure)])
            .run_until(|&k: &u64| self.steps(k), |&k| self.state(k).same_cell(goal))?;

        let path = reached
            .path
            .iter()
            .zip(departure..)
            .map(|(&k, t)| {
                let s = self.state(k);
                TimedCoord::new(s.x, s.y, t)
            })
            .collect();
        Ok(Crossing {
            departure,
            arrival: reached.distance,
            path,
            settled: reached.settled,
        })
    }

    /// `legs` crossings starting at the entrance on tick 0, alternating
    /// direction, each leaving on the tick the previous one arrived.
    pub fn trips(&self, legs: usize) -> Result<Vec<Crossing>> {
        let mut crossings: Vec<Crossing> = Vec::with_capacity(legs);
        let (mut from, mut to) = (self.entrance, self.exit);
        for _ in 0..legs {
            let departure = crossings.last().map_or(0, |c| c.arrival);
            crossings.push(self.cross(from, to, departure)?);
            std::mem::swap(&mut from, &mut to);
        }
        Ok(crossings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#.######\n#>>.<^<#\n#.<..<<#\n#>v.><>#\n#<^v^^>#\n######.#\n";

    #[test]
    fn parses_sample() {
        let valley = Valley::parse(SAMPLE).unwrap();
        assert_eq!(valley.width(), 8);
        assert_eq!(valley.height(), 6);
        assert_eq!(valley.period(), 12);
        assert_eq!(valley.entrance, Coord::new(0, 1));
        assert_eq!(valley.exit, Coord::new(5, 6));
    }

    #[test]
    fn blizzards_drift_and_wrap() {
        let valley = Valley::parse("#.###\n#>..#\n#...#\n###.#\n").unwrap();
        assert!(!valley.is_free(TimedCoord::new(1, 1, 0)));
        assert!(valley.is_free(TimedCoord::new(1, 1, 1)));
        assert!(!valley.is_free(TimedCoord::new(2, 1, 1)));
        assert!(!valley.is_free(TimedCoord::new(3, 1, 2)));
        assert!(!valley.is_free(TimedCoord::new(1, 1, 3)));
        assert!(valley.is_free(TimedCoord::new(1, 0, 7)));
        assert!(!valley.is_free(TimedCoord::new(0, 1, 0)));
        assert!(!valley.is_free(TimedCoord::new(1, -1, 0)));
    }

    #[test]
    fn sample_single_crossing() {
        let valley = Valley::parse(SAMPLE).unwrap();
        let crossing = valley.cross(valley.entrance, valley.exit, 0).unwrap();
        assert_eq!(crossing.arrival, 18);
        assert_eq!(crossing.path.len(), 19);
        assert_eq!(crossing.path[0], TimedCoord::new(1, 0, 0));
        assert_eq!(crossing.path[18], TimedCoord::new(6, 5, 18));
        assert!(crossing.path.iter().all(|&s| valley.is_free(s)));
    }

    #[test]
    fn sample_three_legs() {
        let valley = Valley::parse(SAMPLE).unwrap();
        let legs = valley.trips(3).unwrap();
        let arrivals: Vec<u32> = legs.iter().map(|c| c.arrival).collect();
        assert_eq!(arrivals, vec![18, 41, 54]);
        assert_eq!(legs[1].departure, 18);
        assert_eq!(legs[2].departure, 41);
    }

    #[test]
    fn blocked_column_is_unreachable() {
        // Both interior rows hold a full line of blizzards that covers every
        // cell on every tick.
        let valley = Valley::parse("#.##\n#>>#\n#<<#\n##.#\n").unwrap();
        assert!(matches!(
            valley.cross(valley.entrance, valley.exit, 0),
            Err(Error::Unreachable { .. })
        ));
    }

    #[test]
    fn rejects_malformed_boards() {
        assert!(Valley::parse("#.#\n").is_err());
        assert_eq!(
            Valley::parse("#.###\n#.x.#\n###.#\n"),
            Err(Error::Parse {
                line: 2,
                reason: "unexpected cell 'x' at column 2".to_string()
            })
        );
        assert!(Valley::parse("#..##\n#...#\n###.#\n").is_err());
        assert!(Valley::parse("#.###\n#...#\n#####\n").is_err());
        assert!(Valley::parse("#.###\n#..\n###.#\n").is_err());
    }
}
