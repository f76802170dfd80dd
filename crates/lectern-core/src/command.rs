//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every state-changing request.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs, e.g. `progress.mark_lecture_viewed`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}
