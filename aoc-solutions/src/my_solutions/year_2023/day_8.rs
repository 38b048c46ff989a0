use crate::utils::math::lcm;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverOptions};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info, trace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["2023", "graph"])]
pub struct Solver;

const START: &str = "AAA";
const END: &str = "ZZZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left = 0,
    Right = 1,
}

/// Node names plus `[left, right]` child indices
#[derive(Debug)]
pub struct Network<'a> {
    pub turns: Vec<Turn>,
    names: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    children: Vec<[usize; 2]>,
    /// Log a Graphviz digraph of the part 2 walks
    viz: bool,
}

impl Network<'_> {
    fn node(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Steps from `start` until `stop` holds for the current node.
    ///
    /// Every `(node, turn position)` pair can be visited once before the walk
    /// is known to loop, so longer walks fail instead of spinning.
    fn steps_until<F>(&self, start: usize, stop: F) -> Result<u64, SolveError>
    where
        F: Fn(&str) -> bool,
    {
        let limit = self.names.len() * self.turns.len();
        let mut current = start;
        for (steps, turn) in self.turns.iter().cycle().enumerate() {
            if stop(self.names[current]) {
                return Ok(steps as u64);
            }
            if steps > limit {
                break;
            }
            let next = self.children[current][*turn as usize];
            trace!(from = self.names[current], to = self.names[next], ?turn, "step");
            current = next;
        }
        Err(SolveError::failed(format!(
            "walk from {} never reaches its goal",
            self.names[start]
        )))
    }

    /// Graphviz digraph of everything reachable from the `..A` nodes, with
    /// starts in green and `..Z` ends in red
    fn to_dot(&self, starts: &[usize]) -> String {
        let quoted = |i: usize| format!("\"{}\"", self.names[i]);
        let nodes = (0..self.names.len()).filter_map(|i| {
            let color = match self.names[i] {
                n if n.ends_with('A') => "green",
                n if n.ends_with('Z') => "red",
                _ => return None,
            };
            Some(format!("\t{} [label={}, color=\"{color}\"];", quoted(i), quoted(i)))
        });

        let mut edges = Vec::new();
        for &start in starts {
            let mut seen = HashSet::new();
            let mut todo = VecDeque::from([start]);
            while let Some(current) = todo.pop_front() {
                if !seen.insert(current) {
                    continue;
                }
                for child in self.children[current] {
                    edges.push(format!("\t{} -> {};", quoted(current), quoted(child)));
                    todo.push_back(child);
                }
            }
        }

        ["digraph AOC {".to_string(), "\tlayout=\"neato\";".to_string(), String::new()]
            .into_iter()
            .chain(nodes)
            .chain([String::new()])
            .chain(edges)
            .chain(["}".to_string()])
            .join("\n")
    }
}

fn parse_turns(line: &str) -> anyhow::Result<Vec<Turn>> {
    line.chars()
        .enumerate()
        .map(|(i, c)| match c {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            _ => Err(anyhow!("unexpected direction {c:?} at position {i}")),
        })
        .collect()
}

/// `AAA = (BBB, CCC)`
fn parse_node(line: &str) -> anyhow::Result<(&str, &str, &str)> {
    let fields: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ','))
        .filter(|f| !f.is_empty())
        .collect();
    match fields.as_slice() {
        [name, "=", left, right] => Ok((*name, *left, *right)),
        _ => bail!("expected 'NAME = (LEFT, RIGHT)'"),
    }
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let mut lines = input
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, l)| !l.is_empty());

    let (_, first) = lines.next().ok_or_else(|| anyhow!("missing turn instructions"))?;
    let turns = parse_turns(first)?;
    if turns.is_empty() {
        bail!("no turn instructions");
    }

    let mut raw = Vec::new();
    for (idx, line) in lines {
        raw.push(parse_node(line).map_err(|e| anyhow!("line {}: {e}", idx + 1))?);
    }

    let names: Vec<&str> = raw.iter().map(|(name, _, _)| *name).collect();
    let index: HashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    let lookup = |name: &str| {
        index
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("node {name:?} is referenced but never defined"))
    };
    let children = raw
        .iter()
        .map(|(_, left, right)| Ok([lookup(*left)?, lookup(*right)?]))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Network {
        turns,
        names,
        index,
        children,
        viz: false,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Self::parse_with_options(input, &SolverOptions::default())
    }

    fn parse_with_options<'a>(
        input: &'a str,
        options: &SolverOptions,
    ) -> Result<Self::SharedData<'a>, ParseError> {
        let mut network =
            parse_network(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
        network.viz = options.get_or("viz", false)?;
        debug!(nodes = network.names.len(), turns = network.turns.len(), "loaded network");
        Ok(network)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared
            .node(START)
            .ok_or_else(|| SolveError::failed(format!("no {START} node")))?;
        let steps = shared.steps_until(start, |name| name == END)?;
        Ok(steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let starts: Vec<usize> = (0..shared.names.len())
            .filter(|&i| shared.names[i].ends_with('A'))
            .collect();
        if starts.is_empty() {
            return Err(SolveError::failed("no start nodes ending in 'A'"));
        }
        if shared.viz {
            info!("part 2 paths:\n{}", shared.to_dot(&starts));
        }

        let steps = starts
            .iter()
            .map(|&start| {
                let steps = shared.steps_until(start, |name| name.ends_with('Z'))?;
                debug!(start = shared.names[start], steps, "reached a Z node");
                Ok(steps)
            })
            .collect::<Result<Vec<u64>, SolveError>>()?;
        Ok(lcm(&steps).to_string())
    }
}
