//! Context generations for a nested frame.
//!
//! Synchronization and event listeners belong to one nested document. When
//! the frame's document changes (first load, navigation, re-mount) the old
//! generation's guard is dropped before the new one is set up, so listeners
//! are never live for two documents at once. Configuration changes alone do
//! not start a new generation.

use crate::error::FrameError;

/// Identity of one nested-document generation. Monotonic per lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// What `FrameLifecycle::observe` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No document yet and nothing attached.
    Inert,
    /// Same document as the current generation.
    Unchanged(ContextId),
    /// First document attached.
    Attached(ContextId),
    /// A different document replaced the current one.
    Replaced {
        previous: ContextId,
        current: ContextId,
    },
    /// The document went away; the current generation was torn down.
    Detached(ContextId),
}

struct Generation<K, G> {
    id: ContextId,
    key: K,
    // Dropped on teardown.
    _guard: G,
}

/// Tracks the live generation, keyed by document identity `K`, owning the
/// per-generation guard `G` (listener registrations and the like).
pub struct FrameLifecycle<K, G> {
    next_id: u64,
    current: Option<Generation<K, G>>,
}

impl<K, G> Default for FrameLifecycle<K, G> {
    fn default() -> Self {
        Self {
            next_id: 0,
            current: None,
        }
    }
}

impl<K: PartialEq, G> FrameLifecycle<K, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with the frame's current document.
    ///
    /// `setup` runs only when `key` is a document not seen by the current
    /// generation, after the previous guard has been dropped. If it fails the
    /// lifecycle is left detached.
    pub fn observe<F>(&mut self, key: Option<K>, setup: F) -> Result<Transition, FrameError>
    where
        F: FnOnce(&K, ContextId) -> Result<G, FrameError>,
    {
        let Some(key) = key else {
            return Ok(match self.detach() {
                Some(previous) => Transition::Detached(previous),
                None => Transition::Inert,
            });
        };

        if let Some(current) = &self.current {
            if current.key == key {
                return Ok(Transition::Unchanged(current.id));
            }
        }

        let previous = self.detach();

        let id = ContextId(self.next_id);
        self.next_id += 1;
        let guard = setup(&key, id)?;
        self.current = Some(Generation {
            id,
            key,
            _guard: guard,
        });

        tracing::debug!(context = %id, previous = ?previous, "frame context attached");

        Ok(match previous {
            Some(previous) => Transition::Replaced {
                previous,
                current: id,
            },
            None => Transition::Attached(id),
        })
    }

    /// Tear down the current generation, dropping its guard.
    pub fn detach(&mut self) -> Option<ContextId> {
        let generation = self.current.take()?;
        tracing::debug!(context = %generation.id, "frame context detached");
        Some(generation.id)
    }

    pub fn current(&self) -> Option<ContextId> {
        self.current.as_ref().map(|g| g.id)
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref().map(|g| &g.key)
    }

    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }
}
