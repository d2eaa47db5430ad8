//! Drain-style prefix-tree clustering
//!
//! Chunks are tokenized on whitespace and routed through a fixed-depth tree:
//! first by token count, then by their leading tokens. The leaf holds the
//! candidate classes; a chunk joins the most similar one when the similarity
//! clears `sim_threshold`, otherwise it starts a new class until capacity is
//! reached, after which it folds into the nearest class anywhere in the tree.

use crate::config::DrainConfig;
use crate::profile::{ProfileReport, Profiler};
use crate::DrainError;
use logsift_domain::{
    ClusterChange, ClusterId, ClusterSummary, MatchMode, Observation, PatternOracle,
};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Template token standing for any value
pub const WILDCARD: &str = "<*>";

#[derive(Debug, Clone)]
struct Cluster {
    id: ClusterId,
    tokens: Vec<String>,
    size: u64,
}

impl Cluster {
    fn summary(&self) -> ClusterSummary {
        ClusterSummary {
            id: self.id,
            size: self.size,
            template: self.tokens.join(" "),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<String, Node>,
    cluster_ids: Vec<ClusterId>,
}

impl Node {
    fn literal_children(&self) -> usize {
        self.children.len() - usize::from(self.children.contains_key(WILDCARD))
    }
}

/// Positional comparison of a template against a token sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Score {
    exact: usize,
    params: usize,
    len: usize,
    same_len: bool,
}

impl Score {
    fn of(template: &[String], tokens: &[String]) -> Self {
        let len = template.len().max(tokens.len());
        if len == 0 {
            // Two empty sequences are identical
            return Self { exact: 1, params: 0, len: 1, same_len: true };
        }

        let mut exact = 0;
        let mut params = 0;
        for (slot, token) in template.iter().zip(tokens) {
            if slot == WILDCARD {
                params += 1;
            } else if slot == token {
                exact += 1;
            }
        }

        Self {
            exact,
            params,
            len,
            same_len: template.len() == tokens.len(),
        }
    }

    fn similarity(&self) -> f64 {
        self.exact as f64 / self.len as f64
    }

    fn fully_covered(&self) -> bool {
        self.same_len && self.exact + self.params == self.len
    }

    /// Training preference: more exact tokens, then more parameters
    fn beats_for_training(&self, other: &Self) -> bool {
        match cmp_ratio(self.exact, self.len, other.exact, other.len) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.params > other.params,
        }
    }

    /// Resolution preference: same length, more covered tokens, then fewer
    /// parameters (the more specific template)
    fn beats_for_matching(&self, other: &Self) -> bool {
        if self.same_len != other.same_len {
            return self.same_len;
        }
        match cmp_ratio(
            self.exact + self.params,
            self.len,
            other.exact + other.params,
            other.len,
        ) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.params < other.params,
        }
    }
}

fn cmp_ratio(num_a: usize, den_a: usize, num_b: usize, den_b: usize) -> Ordering {
    (num_a as u128 * den_b as u128).cmp(&(num_b as u128 * den_a as u128))
}

fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

/// Drain-style incremental log clusterer
///
/// # Examples
///
/// ```
/// use logsift_drain::{DrainConfig, DrainOracle};
/// use logsift_domain::PatternOracle;
///
/// let mut oracle = DrainOracle::new(DrainConfig::default().with_max_clusters(2)).unwrap();
/// oracle.observe("pod web-1 ready").unwrap();
/// oracle.observe("pod web-2 ready").unwrap();
/// oracle.observe("image pull failed for quay.io/app").unwrap();
/// oracle.observe("timeout").unwrap();
///
/// assert_eq!(oracle.clusters().len(), 2);
/// assert_eq!(oracle.clusters()[0].template, "pod <*> ready");
/// ```
#[derive(Debug)]
pub struct DrainOracle {
    config: DrainConfig,
    clusters: Vec<Cluster>,
    root: HashMap<usize, Node>,
    profiler: RefCell<Profiler>,
}

impl DrainOracle {
    /// Create a new oracle, rejecting invalid configuration
    pub fn new(config: DrainConfig) -> Result<Self, DrainError> {
        config.validate().map_err(DrainError::InvalidConfig)?;

        debug!(
            max_clusters = config.max_clusters,
            depth = config.depth,
            sim_threshold = config.sim_threshold,
            "Initialized drain oracle"
        );

        Ok(Self {
            profiler: RefCell::new(Profiler::new(config.profiling)),
            config,
            clusters: Vec::new(),
            root: HashMap::new(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &DrainConfig {
        &self.config
    }

    /// Timings collected so far (empty unless profiling is enabled)
    pub fn profile(&self) -> ProfileReport {
        self.profiler.borrow().report().clone()
    }

    /// Emit the profile report at debug level
    pub fn log_profile(&self) {
        if !self.config.profiling {
            return;
        }
        for line in self.profile().to_string().lines() {
            debug!("drain profile: {}", line);
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let content = self
            .config
            .extra_delimiters
            .iter()
            .fold(text.to_string(), |acc, delimiter| acc.replace(delimiter.as_str(), " "));
        content.split_whitespace().map(str::to_string).collect()
    }

    fn cluster(&self, id: ClusterId) -> Result<&Cluster, DrainError> {
        self.clusters
            .get(id.value() as usize)
            .ok_or_else(|| DrainError::InconsistentState(format!("unknown cluster {}", id)))
    }

    fn leaf(&self, tokens: &[String]) -> Option<&Node> {
        let mut node = self.root.get(&tokens.len())?;
        for token in tokens.iter().take(self.config.prefix_levels()) {
            node = match node.children.get(token.as_str()) {
                Some(child) => child,
                None => node.children.get(WILDCARD)?,
            };
        }
        Some(node)
    }

    fn tree_search(&self, tokens: &[String]) -> Result<Option<ClusterId>, DrainError> {
        let Some(leaf) = self.leaf(tokens) else {
            return Ok(None);
        };

        let mut best: Option<(ClusterId, Score)> = None;
        for &id in &leaf.cluster_ids {
            let score = Score::of(&self.cluster(id)?.tokens, tokens);
            if best.map_or(true, |(_, current)| score.beats_for_training(&current)) {
                best = Some((id, score));
            }
        }

        Ok(best
            .filter(|(_, score)| score.similarity() >= self.config.sim_threshold)
            .map(|(id, _)| id))
    }

    fn add_to_tree(&mut self, id: ClusterId, tokens: &[String]) {
        let levels = self.config.prefix_levels();
        let max_children = self.config.max_children;
        let mask_digits = self.config.mask_digits;

        let mut node = self.root.entry(tokens.len()).or_default();
        for token in tokens.iter().take(levels) {
            let key = if node.children.contains_key(token.as_str()) {
                token.clone()
            } else if (mask_digits && has_digit(token))
                || node.literal_children() + 1 >= max_children
            {
                WILDCARD.to_string()
            } else {
                token.clone()
            };
            node = node.children.entry(key).or_default();
        }
        node.cluster_ids.push(id);
    }

    fn absorb(&mut self, id: ClusterId, tokens: &[String]) -> Result<ClusterChange, DrainError> {
        let cluster = self
            .clusters
            .get_mut(id.value() as usize)
            .ok_or_else(|| DrainError::InconsistentState(format!("unknown cluster {}", id)))?;

        cluster.size += 1;
        if cluster.tokens.len() != tokens.len() {
            return Ok(ClusterChange::Unchanged);
        }

        let mut changed = false;
        for (slot, token) in cluster.tokens.iter_mut().zip(tokens) {
            if slot.as_str() != WILDCARD && *slot != *token {
                *slot = WILDCARD.to_string();
                changed = true;
            }
        }

        Ok(if changed {
            ClusterChange::TemplateChanged
        } else {
            ClusterChange::Unchanged
        })
    }

    /// Best class over the whole model, by resolution preference
    fn nearest(&self, tokens: &[String]) -> Option<(ClusterId, Score)> {
        let mut best: Option<(ClusterId, Score)> = None;
        for cluster in &self.clusters {
            let score = Score::of(&cluster.tokens, tokens);
            if best.map_or(true, |(_, current)| score.beats_for_matching(&current)) {
                best = Some((cluster.id, score));
            }
        }
        best
    }

    fn observe_tokens(&mut self, tokens: Vec<String>) -> Result<Observation, DrainError> {
        if let Some(id) = self.tree_search(&tokens)? {
            let change = self.absorb(id, &tokens)?;
            return Ok(Observation::new(id, change));
        }

        if self.clusters.len() < self.config.max_clusters {
            let id = ClusterId::from_value(self.clusters.len() as u64);
            self.add_to_tree(id, &tokens);
            self.clusters.push(Cluster { id, tokens, size: 1 });
            return Ok(Observation::new(id, ClusterChange::Created));
        }

        let (id, _) = self.nearest(&tokens).ok_or_else(|| {
            DrainError::InconsistentState("capacity reached with no live clusters".to_string())
        })?;
        self.absorb(id, &tokens)?;
        Ok(Observation::new(id, ClusterChange::Folded))
    }
}

impl PatternOracle for DrainOracle {
    type Error = DrainError;

    fn observe(&mut self, text: &str) -> Result<Observation, Self::Error> {
        let started = self.profiler.borrow().start();
        let tokens = self.tokenize(text);
        let result = self.observe_tokens(tokens);
        self.profiler.borrow_mut().finish("observe", started);

        let observation = result?;
        trace!(
            cluster = %observation.cluster_id,
            change = ?observation.change,
            "Observed chunk"
        );
        Ok(observation)
    }

    fn match_chunk(&self, text: &str, mode: MatchMode) -> Result<Option<ClusterId>, Self::Error> {
        let started = self.profiler.borrow().start();
        let tokens = self.tokenize(text);
        let best = self.nearest(&tokens);
        self.profiler.borrow_mut().finish("match", started);

        Ok(match mode {
            MatchMode::Strict => best
                .filter(|(_, score)| score.fully_covered())
                .map(|(id, _)| id),
            MatchMode::Always => best.map(|(id, _)| id),
        })
    }

    fn clusters(&self) -> Vec<ClusterSummary> {
        self.clusters.iter().map(Cluster::summary).collect()
    }

    fn max_clusters(&self) -> usize {
        self.config.max_clusters
    }

    fn reset(&mut self) {
        self.clusters.clear();
        self.root.clear();
        self.profiler.borrow_mut().clear();
    }
}
