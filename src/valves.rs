/*
Valve networks: named valves with a flow rate, joined by unit-length tunnels.

Only valves with a nonzero flow rate matter to the downstream search, so the
tunnel graph is compressed to a dense distance table over those valves plus
the starting valve `AA`.
*/

use hashbrown::HashMap;

use crate::compress::{DistanceMatrix, GraphCompressor, Strategy};
use crate::error::{Error, Result};

pub type ValveId = u8;

pub const START: &str = "AA";

/// Downstream searches keep opened valves in a `u64` bit set.
pub const MAX_VALVES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valve {
    pub name: String,
    pub flow_rate: u32,
    pub tunnels: Vec<ValveId>,
}

#[derive(Debug, Clone)]
pub struct Valves {
    valves: Vec<Valve>,
}

#[derive(Default)]
struct NameTable {
    ids: HashMap<String, ValveId>,
    names: Vec<String>,
}

impl NameTable {
    fn id(&mut self, name: &str, line: usize) -> Result<ValveId> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        if self.names.len() >= MAX_VALVES {
            return Err(Error::Parse {
                line,
                reason: format!("more than {} valves", MAX_VALVES),
            });
        }
        let id = self.names.len() as ValveId;
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Ok(id)
    }
}

fn parse_line(line: &str, number: usize) -> Result<(&str, u32, Vec<&str>)> {
    let bad = |reason: &str| Error::Parse {
        line: number,
        reason: reason.to_string(),
    };

    let rest = line.strip_prefix("Valve ").ok_or_else(|| bad("expected \"Valve \""))?;
    let (name, rest) = rest
        .split_once(" has flow rate=")
        .ok_or_else(|| bad("expected \"has flow rate=\""))?;
    let (rate, rest) = rest.split_once(';').ok_or_else(|| bad("expected ';'"))?;
    let flow_rate = rate.trim().parse::<u32>().map_err(|e| bad(&e.to_string()))?;

    // "tunnel leads to valve X" or "tunnels lead to valves X, Y"
    let (_, targets) = rest
        .split_once(" to valve")
        .ok_or_else(|| bad("expected \"to valve\""))?;
    let targets = targets.strip_prefix('s').unwrap_or(targets);
    let tunnels: Vec<&str> = targets.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
    if tunnels.is_empty() {
        return Err(bad("valve has no tunnels"));
    }
    Ok((name.trim(), flow_rate, tunnels))
}

impl Valves {
    pub fn parse(input: &str) -> Result<Self> {
        let mut names = NameTable::default();
        names.id(START, 0)?;
        let mut defined: Vec<Option<(u32, Vec<ValveId>)>> = Vec::new();

        for (i, line) in input.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
            let number = i + 1;
            let (name, flow_rate, tunnels) = parse_line(line, number)?;
            let id = names.id(name, number)?;
            let tunnels = tunnels
                .into_iter()
                .map(|t| names.id(t, number))
                .collect::<Result<Vec<_>>>()?;

            if defined.len() < names.names.len() {
                defined.resize(names.names.len(), None);
            }
            if defined[id as usize].is_some() {
                return Err(Error::Parse {
                    line: number,
                    reason: format!("valve {} defined twice", name),
                });
            }
            defined[id as usize] = Some((flow_rate, tunnels));
        }

        defined.resize(names.names.len(), None);
        let valves = names
            .names
            .into_iter()
            .zip(defined)
            .map(|(name, def)| match def {
                Some((flow_rate, tunnels)) => Ok(Valve {
                    name,
                    flow_rate,
                    tunnels,
                }),
                None => Err(Error::UnknownNode(name)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { valves })
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn get(&self, id: ValveId) -> &Valve {
        &self.valves[id as usize]
    }

    pub fn id_of(&self, name: &str) -> Option<ValveId> {
        self.valves.iter().position(|v| v.name == name).map(|i| i as ValveId)
    }

    /// Tunnel distances between valves worth opening, plus rows from `AA`.
    pub fn compress(&self, strategy: Strategy) -> Result<DistanceMatrix<ValveId, u32>> {
        let ids = 0..self.valves.len() as ValveId;
        GraphCompressor::new(ids, |&id| self.get(id).flow_rate > 0)
            .with_start(0)
            .compress(strategy, |&id: &ValveId| {
                self.get(id).tunnels.iter().map(|&t| (t, 1u32))
            })
    }

    /// One line per kept valve: `id:flow:to-cost,to-cost,...`.
    pub fn render(&self, matrix: &DistanceMatrix<ValveId, u32>) -> String {
        let mut out = String::new();
        for (from, row) in matrix.sorted_rows() {
            let to: Vec<String> = row.iter().map(|(t, cost)| format!("{}-{}", t, cost)).collect();
            out.push_str(&format!("{}:{}:{}\n", from, self.get(from).flow_rate, to.join(",")));
        }
        out
    }
}
