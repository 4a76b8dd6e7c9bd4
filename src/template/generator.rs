//! String generator facade
//!
//! [`StringGenerator`] parses a pattern once and renders it on demand. It
//! owns its randomness provider, so separate generators never share state
//! and one generator can be moved between threads between renders.
//!
//! ```rust
//! use strgen::{GeneratorConfig, StringGenerator};
//!
//! let config = GeneratorConfig::new().with_seed(1234);
//! let mut generator = StringGenerator::with_config(r"[\l]{4}-[\d]{4}", config).unwrap();
//!
//! let code = generator.render();
//! assert_eq!(code.chars().count(), 9);
//! assert_eq!(code.chars().nth(4), Some('-'));
//! ```

use super::debug::TreePrinter;
use super::error::{Result, TemplateError};
use super::node::Node;
use super::parser::{parse_with_config, ParserConfig};
use super::random::{from_seed, seed_from, Randomness};
use super::source::Bindings;
use hashbrown::HashSet;
use std::hash::Hash;

/// Default multiplier for the `render_list` attempt budget
pub const DEFAULT_UNIQUE_ATTEMPTS_FACTOR: usize = 10;

/// Generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Unique batches may make `count * unique_attempts_factor` renders
    pub unique_attempts_factor: usize,

    /// Seed for a reproducible provider; `None` uses the OS source
    pub seed: Option<u64>,

    /// Parser limits
    pub parser: ParserConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            unique_attempts_factor: DEFAULT_UNIQUE_ATTEMPTS_FACTOR,
            seed: None,
            parser: ParserConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt budget multiplier for unique batches
    pub fn with_unique_attempts_factor(mut self, factor: usize) -> Self {
        self.unique_attempts_factor = factor;
        self
    }

    /// Render reproducibly from a numeric seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Render reproducibly from any hashable seed value
    pub fn with_seed_from<S: Hash + ?Sized>(mut self, value: &S) -> Self {
        self.seed = Some(seed_from(value));
        self
    }

    /// Set the parser limits
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// A parsed pattern plus the randomness used to render it
pub struct StringGenerator {
    pattern: String,
    tree: Node,
    config: GeneratorConfig,
    randomness: Box<dyn Randomness + Send>,
}

impl StringGenerator {
    /// Parse `pattern` with the default configuration
    ///
    /// Fails with a syntax error if the pattern is malformed.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_config(pattern, GeneratorConfig::default())
    }

    /// Parse `pattern`; the provider is seeded when the config has a seed
    pub fn with_config(pattern: &str, config: GeneratorConfig) -> Result<Self> {
        let tree = parse_with_config(pattern, config.parser)?;
        Ok(Self {
            pattern: pattern.to_string(),
            tree,
            config,
            randomness: from_seed(config.seed),
        })
    }

    /// Parse `pattern` and render with a caller-supplied provider
    ///
    /// The provider takes precedence over any seed in `config`.
    pub fn with_randomness<R>(pattern: &str, config: GeneratorConfig, randomness: R) -> Result<Self>
    where
        R: Randomness + Send + 'static,
    {
        let tree = parse_with_config(pattern, config.parser)?;
        Ok(Self {
            pattern: pattern.to_string(),
            tree,
            config,
            randomness: Box::new(randomness),
        })
    }

    /// The pattern this generator was built from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The parsed render tree
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// The configuration in effect
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Name of the randomness provider
    pub fn randomness_name(&self) -> &str {
        self.randomness.name()
    }

    /// Render one string with no bindings
    pub fn render(&mut self) -> String {
        self.render_with(&Bindings::new())
    }

    /// Render one string, resolving `${name}` references from `bindings`
    pub fn render_with(&mut self, bindings: &Bindings) -> String {
        self.tree.render(bindings, self.randomness.as_mut())
    }

    /// Render `count` strings
    ///
    /// With `unique` set, renders are retried until `count` distinct strings
    /// are collected; at most `count * unique_attempts_factor` renders are
    /// made before failing with a uniqueness error. The result keeps the
    /// order in which strings were accepted.
    ///
    /// `progress` is called with `(accepted, count)` after each accepted
    /// string.
    pub fn render_list(
        &mut self,
        count: usize,
        unique: bool,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
        bindings: &Bindings,
    ) -> Result<Vec<String>> {
        let mut rendered = Vec::with_capacity(count);

        if !unique {
            for accepted in 1..=count {
                rendered.push(self.render_with(bindings));
                if let Some(callback) = progress.as_deref_mut() {
                    callback(accepted, count);
                }
            }
            return Ok(rendered);
        }

        let budget = count.saturating_mul(self.config.unique_attempts_factor);
        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut attempts = 0usize;

        while rendered.len() < count {
            if attempts >= budget {
                log_warn!(
                    "uniqueness budget exhausted: {} of {} after {} attempts",
                    rendered.len(),
                    count,
                    attempts
                );
                return Err(TemplateError::Uniqueness {
                    requested: count,
                    produced: rendered.len(),
                    attempts,
                });
            }
            attempts += 1;

            let s = self.render_with(bindings);
            if seen.insert(s.clone()) {
                rendered.push(s);
                if let Some(callback) = progress.as_deref_mut() {
                    callback(rendered.len(), count);
                }
            }
        }

        log_debug!("rendered {} unique strings in {} attempts", count, attempts);
        Ok(rendered)
    }

    /// Render until `count` distinct strings are collected
    ///
    /// There is no attempt limit: if the pattern cannot produce `count`
    /// distinct strings this never returns. Use [`render_list`] with
    /// `unique` set for a bounded variant.
    ///
    /// [`render_list`]: Self::render_list
    pub fn render_set(&mut self, count: usize, bindings: &Bindings) -> HashSet<String> {
        let mut set = HashSet::with_capacity(count);
        while set.len() < count {
            set.insert(self.render_with(bindings));
        }
        set
    }

    /// Number of distinct strings the pattern can produce
    ///
    /// See [`Node::count`] for how each node is counted. Fails with a
    /// capability error for trees holding `${name}` references or
    /// permutations over composite operands.
    pub fn count(&mut self) -> Result<u128> {
        self.tree.count(self.randomness.as_mut())
    }

    /// Indented outline of the render tree
    pub fn dump_tree(&self) -> String {
        TreePrinter::new().print(&self.tree)
    }

    /// Version and provider header followed by the render tree
    pub fn dump(&self) -> String {
        format!(
            "strgen {}\nrandomness: {}\npattern: {}\n{}",
            env!("CARGO_PKG_VERSION"),
            self.randomness.name(),
            self.pattern,
            self.dump_tree()
        )
    }

    /// Render tree as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.tree)
    }
}

impl std::fmt::Debug for StringGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringGenerator")
            .field("pattern", &self.pattern)
            .field("config", &self.config)
            .field("randomness", &self.randomness.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(pattern: &str, seed: u64) -> StringGenerator {
        StringGenerator::with_config(pattern, GeneratorConfig::new().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_construction_fails_on_bad_pattern() {
        let err = StringGenerator::new("[a-z]{a}").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = seeded(r"[\w]{5:20}(x|y|z)&[\d]{3}", 99);
        let mut b = seeded(r"[\w]{5:20}(x|y|z)&[\d]{3}", 99);
        for _ in 0..20 {
            assert_eq!(a.render(), b.render());
        }
    }

    #[test]
    fn test_hashable_seed() {
        let config = GeneratorConfig::new().with_seed_from("fixtures");
        let mut a = StringGenerator::with_config(r"[\h]{16}", config).unwrap();
        let mut b = StringGenerator::with_config(r"[\h]{16}", config).unwrap();
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_render_list_plain() {
        let mut generator = seeded("[ab]", 1);
        let list = generator.render_list(50, false, None, &Bindings::new()).unwrap();
        assert_eq!(list.len(), 50);
        assert!(list.iter().all(|s| s == "a" || s == "b"));
    }

    #[test]
    fn test_render_list_unique() {
        let mut generator = seeded(r"[\d]{4}", 2);
        let list = generator.render_list(100, true, None, &Bindings::new()).unwrap();
        let distinct: HashSet<&String> = list.iter().collect();
        assert_eq!(distinct.len(), 100);
    }

    #[test]
    fn test_render_list_uniqueness_error() {
        let mut generator = seeded("[123]", 3);
        let err = generator
            .render_list(100, true, None, &Bindings::new())
            .unwrap_err();
        match err {
            TemplateError::Uniqueness {
                requested,
                produced,
                attempts,
            } => {
                assert_eq!(requested, 100);
                assert!(produced <= 3);
                assert_eq!(attempts, 1000);
            }
            other => panic!("expected uniqueness error, got {:?}", other),
        }
    }

    #[test]
    fn test_progress_called_per_accepted_string() {
        let mut generator = seeded("[ab]{3}", 4);
        let mut calls = Vec::new();
        let mut record = |current: usize, total: usize| calls.push((current, total));
        generator
            .render_list(5, true, Some(&mut record), &Bindings::new())
            .unwrap();
        assert_eq!(calls, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_render_set() {
        let mut generator = seeded("[abc]{2}", 5);
        let set: HashSet<String> = generator.render_set(9, &Bindings::new());
        assert_eq!(set.len(), 9);

        let config = GeneratorConfig::new().with_seed(5).with_unique_attempts_factor(100);
        let mut generator = StringGenerator::with_config("[abc]{2}", config).unwrap();
        let list = generator.render_list(9, true, None, &Bindings::new()).unwrap();
        let listed: HashSet<String> = list.into_iter().collect();
        assert_eq!(listed, set);
    }

    #[test]
    fn test_count() {
        assert_eq!(seeded(r"[\d]{2}", 1).count().unwrap(), 100);
        assert_eq!(seeded("(a|b|c)x", 1).count().unwrap(), 3);
        assert!(seeded("${name}", 1).count().unwrap_err().is_capability());
    }

    #[test]
    fn test_dump_header() {
        let generator = seeded("abc", 1);
        let dump = generator.dump();
        assert!(dump.starts_with(&format!("strgen {}", env!("CARGO_PKG_VERSION"))));
        assert!(dump.contains("StdRng"));
        assert!(dump.ends_with("Sequence\n    Literal \"abc\"\n"));
    }

    #[test]
    fn test_to_json() {
        let generator = seeded("a|b", 1);
        let json = generator.to_json().unwrap();
        let tree: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(&tree, generator.tree());
    }
}
