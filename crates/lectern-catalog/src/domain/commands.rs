//! Commands for the Catalog & Enrollment context.

use lectern_core::command::Command;
use uuid::Uuid;

/// Command to add a course to a learner's purchased list once payment has
/// been captured.
#[derive(Debug, Clone)]
pub struct RecordPurchase {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The buyer.
    pub user_id: Uuid,
    /// The purchased course.
    pub course_id: Uuid,
}

impl Command for RecordPurchase {
    fn command_type(&self) -> &'static str {
        "catalog.record_purchase"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
