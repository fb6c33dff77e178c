//! Turning puzzle text into grids, numbers and graphs.

use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graph::{FxIndexMap, WeightedGraph};
use crate::grid::Grid;

type PatternSlot = OnceLock<Result<Regex, regex::Error>>;

/// Compile `pattern` into `slot` once; a bad pattern keeps failing.
fn cached(slot: &'static PatternSlot, pattern: &str) -> Result<&'static Regex> {
    slot.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| Error::Regex(e.clone()))
}

/// Every integer in `text`, with an optional leading minus sign.
///
/// Numbers that don't fit an `i64` are skipped.
pub fn extract_ints(text: &str) -> Result<Vec<i64>> {
    static INTS: PatternSlot = OnceLock::new();
    Ok(cached(&INTS, r"-?\d+")?
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect())
}

/// Every run of ASCII letters in `text`.
pub fn extract_words(text: &str) -> Result<Vec<&str>> {
    static WORDS: PatternSlot = OnceLock::new();
    Ok(cached(&WORDS, r"[a-zA-Z]+")?
        .find_iter(text)
        .map(|m| m.as_str())
        .collect())
}

/// Line and block splitting with optional trimming.
#[derive(Debug)]
pub struct Parser {
    pub strip: bool,
    pub filter_empty: bool,
    patterns: Mutex<FxHashMap<String, Regex>>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Parser {
    pub fn new(strip: bool, filter_empty: bool) -> Self {
        Self {
            strip,
            filter_empty,
            patterns: Mutex::new(FxHashMap::default()),
        }
    }

    fn clean<'a>(&self, pieces: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        pieces
            .map(|p| if self.strip { p.trim() } else { p })
            .filter(|p| !(self.filter_empty && p.is_empty()))
            .collect()
    }

    pub fn lines<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.clean(text.lines())
    }

    /// Blocks separated by blank lines.
    pub fn groups<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.clean(text.split("\n\n"))
    }

    /// One byte per cell.
    pub fn parse_grid(&self, text: &str) -> Result<Grid<u8>> {
        self.parse_grid_with(text, Ok)
    }

    /// One cell per byte, converted by `cell`.
    pub fn parse_grid_with<T>(
        &self,
        text: &str,
        mut cell: impl FnMut(u8) -> Result<T>,
    ) -> Result<Grid<T>> {
        let rows = self
            .lines(text)
            .into_iter()
            .map(|line| line.bytes().map(&mut cell).collect::<Result<Vec<T>>>())
            .collect::<Result<Vec<_>>>()?;
        Grid::new(rows)
    }

    /// `key<sep>value` items, skipping items without a separator. Later keys
    /// overwrite earlier ones but keep their first position.
    pub fn key_values<'a>(
        &self,
        text: &'a str,
        item_separator: &str,
        key_value_separator: &str,
    ) -> FxIndexMap<&'a str, &'a str> {
        text.split(item_separator)
            .filter_map(|item| item.split_once(key_value_separator))
            .map(|(k, v)| if self.strip { (k.trim(), v.trim()) } else { (k, v) })
            .collect()
    }

    fn compiled(&self, pattern: &str) -> Result<Regex> {
        let mut patterns = self.patterns.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(re) = patterns.get(pattern) {
            return Ok(re.clone());
        }
        let re = Regex::new(pattern)?;
        patterns.insert(pattern.to_owned(), re.clone());
        Ok(re)
    }

    /// Named capture groups of every match of `pattern`. Groups that did not
    /// participate in a match are left out.
    pub fn captures(
        &self,
        text: &str,
        pattern: &str,
    ) -> Result<Vec<FxIndexMap<String, String>>> {
        let re = self.compiled(pattern)?;
        Ok(re
            .captures_iter(text)
            .map(|caps| {
                re.capture_names()
                    .flatten()
                    .filter_map(|name| {
                        let value = caps.name(name)?;
                        Some((name.to_owned(), value.as_str().to_owned()))
                    })
                    .collect()
            })
            .collect())
    }

    /// Read `a -> b, c` lines, or `a -> b(5), c(10)` when `weighted`.
    ///
    /// Unweighted edges have weight 1. Lines without `->` are ignored.
    pub fn parse_graph(
        &self,
        text: &str,
        directed: bool,
        weighted: bool,
    ) -> Result<WeightedGraph> {
        let mut graph = if directed {
            WeightedGraph::directed()
        } else {
            WeightedGraph::undirected()
        };
        for line in self.lines(text) {
            let Some((source, targets)) = line.split_once("->") else {
                continue;
            };
            let source = source.trim();
            graph.add_node(source);
            for target in targets.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let (target, weight) = match target.split_once('(') {
                    Some((name, weight)) if weighted => (name.trim(), parse_weight(weight)?),
                    _ => (target, 1.0),
                };
                graph.add_edge(source, target, weight)?;
            }
        }
        Ok(graph)
    }
}

fn parse_weight(text: &str) -> Result<f64> {
    let text = text.trim_end_matches(')').trim();
    text.parse().map_err(|_| Error::Parse {
        text: text.to_owned(),
        target: "edge weight",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    use crate::dijkstra::dijkstra;
    use crate::grid::Coord;

    #[test]
    fn numbers_and_words() -> Result<()> {
        assert_eq!(extract_ints("p=0,4 v=3,-3")?, vec![0, 4, 3, -3]);
        assert_eq!(extract_ints("no digits")?, Vec::<i64>::new());
        assert_eq!(extract_ints("99999999999999999999 7")?, vec![7]);
        assert_eq!(extract_words("Button A: X+94")?, vec!["Button", "A", "X"]);
        Ok(())
    }

    #[test]
    fn bad_constant_patterns_surface_as_errors() {
        static BROKEN: PatternSlot = OnceLock::new();
        assert!(matches!(cached(&BROKEN, "("), Err(Error::Regex(_))));
        assert!(matches!(cached(&BROKEN, "("), Err(Error::Regex(_))));
    }

    #[test]
    fn lines_and_groups() {
        let parser = Parser::default();
        let text = "  one \n\n two\n\n\nthree\n";
        assert_eq!(parser.lines(text), vec!["one", "two", "three"]);
        assert_eq!(parser.groups("a\nb\n\nc\n"), vec!["a\nb", "c"]);

        let raw = Parser::new(false, false);
        assert_eq!(raw.lines("x \n\ny"), vec!["x ", "", "y"]);
    }

    #[test]
    fn grids_from_text() {
        let parser = Parser::default();
        let grid = parser
            .parse_grid_with("012\n345\n", |b| Ok(b - b'0'))
            .unwrap();
        assert_eq!(grid[Coord::new(1, 2)], 5);
        assert!(matches!(
            parser.parse_grid("abc\nde\n"),
            Err(Error::Shape { row: 1, .. })
        ));
        let strict = parser.parse_grid_with("1x", |b| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            _ => Err(Error::Parse {
                text: (b as char).to_string(),
                target: "digit",
            }),
        });
        assert!(matches!(strict, Err(Error::Parse { .. })));
    }

    #[test]
    fn key_value_pairs() {
        let parser = Parser::default();
        let pairs = parser.key_values("a: 1\nnoise\nb :two\na: 3", "\n", ":");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["a"], "3");
        assert_eq!(pairs["b"], "two");
        assert_eq!(pairs.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn named_captures() {
        let parser = Parser::default();
        let pattern = r"p=(?P<x>-?\d+),(?P<y>-?\d+)(?: v=(?P<v>\S+))?";
        let found = parser.captures("p=1,2 v=3,4\np=-5,6", pattern).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["x"], "1");
        assert_eq!(found[0]["v"], "3,4");
        assert_eq!(found[1]["x"], "-5");
        assert!(!found[1].contains_key("v"));
        assert!(parser.captures("", "(").is_err());
    }

    #[test]
    fn graphs_from_arrows() {
        let parser = Parser::default();
        let graph = parser
            .parse_graph(
                indoc! {"
                    A -> B(1), C(4)
                    B -> C(1)
                    C ->
                "},
                true,
                true,
            )
            .unwrap();
        assert_eq!(graph.node_count(), 3);
        let distances = dijkstra(&graph, "A", None).unwrap();
        assert_eq!(distances.get("C"), Some(2.0));

        let plain = parser.parse_graph("x -> y, z\nignored\n", false, false).unwrap();
        assert_eq!(plain.weight("z", "x"), Some(1.0));
        assert!(parser.parse_graph("a -> b(heavy)", true, true).is_err());
    }
}
