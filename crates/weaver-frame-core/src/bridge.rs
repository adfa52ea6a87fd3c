//! Re-dispatch of nested-document events on the embedding element.

use crate::error::FrameError;
use crate::platform::{BridgeTarget, SourceEvent};

/// Result of dispatching a bridged event on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No listener cancelled the event.
    Delivered,
    /// A host listener called `preventDefault`.
    Cancelled,
}

impl DispatchOutcome {
    /// Map `EventTarget.dispatchEvent`'s return value.
    pub fn from_dispatch_result(not_cancelled: bool) -> Self {
        if not_cancelled {
            Self::Delivered
        } else {
            Self::Cancelled
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Bridge one nested-document event to the host.
///
/// Snapshots the event, shifts pointer coordinates by the target's offset,
/// dispatches on the target and, if a host listener cancelled it, cancels
/// the original event too.
pub fn bridge_event<S, T, P>(source: &S, target: &T) -> Result<DispatchOutcome, FrameError>
where
    S: SourceEvent<Payload = P>,
    T: BridgeTarget<Payload = P>,
{
    let event = source.snapshot()?.translated(target.frame_offset());
    let outcome = target.dispatch(&event)?;

    tracing::trace!(kind = %event.kind, ?outcome, "bridged frame event");

    if outcome.is_cancelled() {
        source.prevent_default();
    }
    Ok(outcome)
}
