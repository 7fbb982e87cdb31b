//! Ordered override resolution: the first present candidate wins.

use serde::Serialize;

/// Where a resolved value came from, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Level {
    /// Shadow value stored on the faculty load
    Stored,
    /// Value from the linked section offering
    Offering,
    /// Value from the offering's subject
    Subject,
    /// Built-in default
    Default,
}

/// Whether a candidate value counts as provided
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for &str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for u32 {
    fn is_present(&self) -> bool {
        true
    }
}

/// A value together with the level that supplied it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub level: Level,
}

/// Ordered list of candidates for one field
#[derive(Debug, Clone)]
pub struct Precedence<T> {
    candidates: Vec<(Level, Option<T>)>,
}

impl<T> Default for Precedence<T> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<T: Presence> Precedence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate below all previously added ones
    pub fn then(mut self, level: Level, value: Option<T>) -> Self {
        self.candidates.push((level, value));
        self
    }

    pub fn stored(self, value: Option<T>) -> Self {
        self.then(Level::Stored, value)
    }

    pub fn offering(self, value: Option<T>) -> Self {
        self.then(Level::Offering, value)
    }

    pub fn subject(self, value: Option<T>) -> Self {
        self.then(Level::Subject, value)
    }

    /// The first present candidate, if any
    pub fn resolve(self) -> Option<Resolved<T>> {
        self.candidates
            .into_iter()
            .find_map(|(level, value)| {
                value
                    .filter(T::is_present)
                    .map(|value| Resolved { value, level })
            })
    }

    /// The first present candidate, or `default` at [`Level::Default`]
    pub fn resolve_or(self, default: T) -> Resolved<T> {
        self.resolve().unwrap_or(Resolved {
            value: default,
            level: Level::Default,
        })
    }
}
