//! Base palette registry.
//!
//! Maps palette names to their RGBA samples. Lookups are case-insensitive but
//! the name a palette was registered under is kept for display. Registration
//! upserts (last writer wins); the table sits behind a `parking_lot::RwLock`
//! so a registry can be shared across threads.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::color::{check_unit_range, clamp_unit, Rgba};
use super::{diverging, qualitative, sequential};
use crate::error::{HuecraftError, Result};

/// Number of suggestions attached to a failed lookup
pub const MAX_SUGGESTIONS: usize = 5;

/// Minimum similarity for a registered name to be suggested
pub const SUGGESTION_CUTOFF: f64 = 0.1;

static GLOBAL: Lazy<PaletteRegistry> = Lazy::new(PaletteRegistry::with_builtins);

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    samples: Arc<Vec<Rgba>>,
}

/// A registry of named base palettes.
#[derive(Debug, Default)]
pub struct PaletteRegistry {
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl PaletteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in palettes
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for (name, samples) in sequential::builtins()
            .into_iter()
            .chain(diverging::builtins())
            .chain(qualitative::builtins())
        {
            registry.insert(name, samples);
        }
        debug!(count = registry.len(), "Seeded built-in palettes");
        registry
    }

    /// The process-wide registry shared by the convenience constructors
    pub fn global() -> &'static PaletteRegistry {
        &GLOBAL
    }

    /// Seeds are clamped so table rounding never leaves `[0, 1]`
    fn insert(&self, name: &str, samples: Vec<Rgba>) {
        self.entries.write().insert(
            name.to_lowercase(),
            Entry {
                name: name.to_string(),
                samples: Arc::new(samples.into_iter().map(clamp_unit).collect()),
            },
        );
    }

    /// Insert or replace a palette under `name`
    pub fn upsert(&self, name: &str, samples: Vec<Rgba>) -> Result<()> {
        if samples.is_empty() {
            return Err(HuecraftError::out_of_range(format!(
                "cannot register '{name}' without samples"
            )));
        }
        check_unit_range(&samples)?;
        let replaced = self.contains(name);
        let count = samples.len();
        self.insert(name, samples);
        info!(
            palette = name,
            samples = count,
            replaced = replaced,
            "Registered palette; refer to it by name to reuse it"
        );
        Ok(())
    }

    /// Resolve a name to its registered name and samples
    pub fn lookup(&self, name: &str) -> Result<(String, Vec<Rgba>)> {
        let entries = self.entries.read();
        match entries.get(&name.to_lowercase()) {
            Some(entry) => Ok((entry.name.clone(), entry.samples.as_ref().clone())),
            None => {
                let suggestions = close_matches(
                    name,
                    entries.values().map(|entry| entry.name.as_str()),
                    MAX_SUGGESTIONS,
                    SUGGESTION_CUTOFF,
                );
                Err(HuecraftError::Lookup {
                    kind: "colormap".to_string(),
                    name: name.to_string(),
                    suggestions,
                })
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(&name.to_lowercase())
    }

    /// Registered names in case-insensitive order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .values()
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Levenshtein edit distance over chars.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j] + cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Similarity ratio in `[0, 1]`, case-insensitive.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(&a, &b) as f64 / max_len as f64
}

/// Best `n` candidates scoring at least `cutoff`, most similar first.
pub fn close_matches<'a>(
    word: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    n: usize,
    cutoff: f64,
) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| (similarity_ratio(word, candidate), candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(n)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
