//! The four states a Topic Supervisor moves through.

/// `idle` -> `backfilling` -> `streaming`, with `reconnecting` as the
/// failure path back to `backfilling` (never directly to `streaming` — a
/// fresh backfill closes any gap the outage opened).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Backfilling,
    Streaming,
    Reconnecting,
}
