use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runner configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    /// Worker count for rayon's global pool; `None` uses every core.
    pub threads: Option<usize>,
    /// Days to run; empty means all of them.
    pub days: Vec<usize>,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("inputs"),
            threads: None,
            days: Vec::new(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let threads = lookup("AOC_THREADS")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("AOC_THREADS must be a non-negative integer")?
            .filter(|&n| n > 0);
        let days = match lookup("AOC_DAYS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(|d| {
                    d.parse::<usize>()
                        .with_context(|| format!("invalid day '{d}' in AOC_DAYS"))
                })
                .collect::<Result<Vec<_>>>()?,
            None => defaults.days,
        };
        Ok(Config {
            input_dir: lookup("AOC_INPUT_DIR").map_or(defaults.input_dir, PathBuf::from),
            threads,
            days,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn runs_day(&self, day: usize) -> bool {
        self.days.is_empty() || self.days.contains(&day)
    }

    pub fn input_path(&self, day: usize) -> PathBuf {
        self.input_dir.join(format!("{day}.txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rustc_hash::FxHashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: FxHashMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.input_path(12), PathBuf::from("inputs/12.txt"));
        assert_eq!(config.threads, None);
        assert!(config.runs_day(3));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("AOC_INPUT_DIR", "/tmp/aoc"),
            ("AOC_THREADS", "4"),
            ("AOC_DAYS", "10, 12"),
        ])
        .unwrap();
        assert_eq!(config.input_path(1), PathBuf::from("/tmp/aoc/1.txt"));
        assert_eq!(config.threads, Some(4));
        assert!(config.runs_day(12));
        assert!(!config.runs_day(11));
    }

    #[test]
    fn rejects_garbage() {
        assert!(config(&[("AOC_THREADS", "many")]).is_err());
        assert!(config(&[("AOC_DAYS", "1,x")]).is_err());
        assert_eq!(config(&[("AOC_THREADS", "0")]).unwrap().threads, None);
    }
}
