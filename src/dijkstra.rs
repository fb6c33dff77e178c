//! Shortest distances over a [`WeightedGraph`], with an explicit cache.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::{FxIndexMap, GraphVersion, WeightedGraph};
use crate::pool::WorkerPool;

/// Entries kept by [`DijkstraCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Shortest known distance from one source to each reached node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMap {
    distances: FxHashMap<String, f64>,
}

impl DistanceMap {
    pub fn get(&self, node: &str) -> Option<f64> {
        self.distances.get(node).copied()
    }

    /// Like [`get`](Self::get) but unreachable nodes are infinitely far.
    pub fn distance_to(&self, node: &str) -> f64 {
        self.get(node).unwrap_or(f64::INFINITY)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.distances.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, f64)> for DistanceMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            distances: iter.into_iter().collect(),
        }
    }
}

/// Dijkstra from `start`.
///
/// Without `end` every reachable node gets its final distance. With `end`,
/// the search stops once `end` is finalized; nodes discovered by then keep
/// their tentative distance. An `end` missing from the graph never stops the
/// search early.
pub fn dijkstra(graph: &WeightedGraph, start: &str, end: Option<&str>) -> Result<DistanceMap> {
    let source = graph
        .node_index(start)
        .ok_or_else(|| Error::MissingNode(start.to_owned()))?;
    let goal = end.and_then(|name| graph.node_index(name));
    let inner = graph.inner();
    let scores = petgraph::algo::dijkstra(inner, source, goal, |edge| *edge.weight());
    Ok(scores
        .into_iter()
        .map(|(index, distance)| (inner[index].clone(), distance))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    graph: GraphVersion,
    start: String,
    end: Option<String>,
}

/// Least-recently-used cache of distance maps.
///
/// Entries are keyed by [`GraphVersion`], so mutating a graph makes its old
/// entries unreachable; they are purged on the next insert for that graph or
/// by [`invalidate`](Self::invalidate).
#[derive(Debug)]
pub struct DijkstraCache {
    capacity: usize,
    entries: Mutex<FxIndexMap<CacheKey, Arc<DistanceMap>>>,
}

impl Default for DijkstraCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl DijkstraCache {
    /// A capacity of zero disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(FxIndexMap::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drop every entry computed for `graph`, whatever its version.
    pub fn invalidate(&self, graph: &WeightedGraph) {
        let id = graph.version().id;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.graph.id != id);
        debug!(graph = id, dropped = before - entries.len(), "invalidated cached distances");
    }

    pub fn get_or_compute(
        &self,
        graph: &WeightedGraph,
        start: &str,
        end: Option<&str>,
    ) -> Result<Arc<DistanceMap>> {
        let key = CacheKey {
            graph: graph.version(),
            start: start.to_owned(),
            end: end.map(str::to_owned),
        };
        if let Some(hit) = self.touch(&key) {
            trace!(start, ?end, "distance cache hit");
            return Ok(hit);
        }
        trace!(start, ?end, "distance cache miss");
        let distances = Arc::new(dijkstra(graph, start, end)?);
        self.insert(key, Arc::clone(&distances));
        Ok(distances)
    }

    fn touch(&self, key: &CacheKey) -> Option<Arc<DistanceMap>> {
        let mut entries = self.lock();
        let value = entries.shift_remove(key)?;
        entries.insert(key.clone(), Arc::clone(&value));
        Some(value)
    }

    fn insert(&self, key: CacheKey, distances: Arc<DistanceMap>) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        let current = key.graph;
        entries.retain(|k, _| k.graph.id != current.id || k.graph.epoch == current.epoch);
        entries.insert(key, distances);
        while entries.len() > self.capacity {
            entries.shift_remove_index(0);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxIndexMap<CacheKey, Arc<DistanceMap>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs shortest-path queries on a worker pool and remembers the results.
#[derive(Debug, Default)]
pub struct PathFinder {
    pool: WorkerPool,
    cache: DijkstraCache,
}

impl PathFinder {
    pub fn new(pool: WorkerPool, cache: DijkstraCache) -> Self {
        Self { pool, cache }
    }

    pub fn cache(&self) -> &DijkstraCache {
        &self.cache
    }

    /// Cached [`dijkstra`]. The graph must not change while its results are
    /// in use; a changed graph gets fresh results.
    pub fn shortest_distances(
        &self,
        graph: &WeightedGraph,
        start: &str,
        end: Option<&str>,
    ) -> Result<Arc<DistanceMap>> {
        self.cache.get_or_compute(graph, start, end)
    }

    /// Shortest distance for every `(source, target)` pair, infinite where
    /// unreachable.
    ///
    /// Each source gets its own full Dijkstra run on the pool. Workers only
    /// read the graph; results enter the cache after all of them finish.
    pub fn parallel_paths<S, T>(
        &self,
        graph: &WeightedGraph,
        sources: &[S],
        targets: &[T],
    ) -> Result<FxHashMap<(String, String), f64>>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str>,
    {
        let runs = self
            .pool
            .map(sources, |source| dijkstra(graph, source.as_ref(), None))
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut pairs = FxHashMap::default();
        for (source, distances) in sources.iter().zip(runs) {
            let source = source.as_ref();
            for target in targets {
                let target = target.as_ref();
                pairs.insert(
                    (source.to_owned(), target.to_owned()),
                    distances.distance_to(target),
                );
            }
            let key = CacheKey {
                graph: graph.version(),
                start: source.to_owned(),
                end: None,
            };
            self.cache.insert(key, Arc::new(distances));
        }
        debug!(sources = sources.len(), targets = targets.len(), "computed path table");
        Ok(pairs)
    }
}
