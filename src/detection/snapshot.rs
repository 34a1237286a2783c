//! Presence types produced by detection.

use indexmap::IndexMap;
use serde::Serialize;

/// Resolved presence of one component for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "identifier", rename_all = "lowercase")]
pub enum Presence {
    /// Probe missing, failed, or could not be started.
    Absent,
    /// Probe succeeded; carries the first line of its output.
    Present(String),
}

impl Presence {
    /// Whether the component is already installed.
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    /// The identifier reported by the probe, if present.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Presence::Present(id) => Some(id),
            Presence::Absent => None,
        }
    }
}

/// Presence of every component, computed once per run.
///
/// There is no way to change an entry after construction; dispatchers only
/// ever see a shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PresenceSnapshot {
    entries: IndexMap<String, Presence>,
}

impl PresenceSnapshot {
    /// Build a snapshot from `(component id, presence)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Presence)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Presence of `id`. Unknown ids are absent.
    pub fn presence(&self, id: &str) -> &Presence {
        self.entries.get(id).unwrap_or(&Presence::Absent)
    }

    /// Whether `id` was found present.
    pub fn is_present(&self, id: &str) -> bool {
        self.presence(id).is_present()
    }

    /// All entries in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Presence)> {
        self.entries.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Number of components found present.
    pub fn present_count(&self) -> usize {
        self.entries.values().filter(|p| p.is_present()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
