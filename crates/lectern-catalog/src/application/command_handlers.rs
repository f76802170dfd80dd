//! Command handlers for the Catalog & Enrollment context.

use lectern_core::catalog::CourseCatalog;
use lectern_core::clock::Clock;
use lectern_core::command::Command;
use lectern_core::error::DomainError;
use lectern_core::purchase::{PurchaseLedger, PurchasedCourse};
use tracing::info;

use crate::domain::commands::RecordPurchase;

/// Handles the `RecordPurchase` command: snapshots the course into the
/// learner's purchased list. Recording an owned course again keeps, and
/// returns, the original purchase.
///
/// # Errors
///
/// Returns `DomainError::CourseNotFound` if the course does not exist, or
/// `DomainError::StoreUnavailable` on collaborator failure.
pub async fn handle_record_purchase(
    command: &RecordPurchase,
    clock: &dyn Clock,
    catalog: &dyn CourseCatalog,
    purchases: &dyn PurchaseLedger,
) -> Result<PurchasedCourse, DomainError> {
    let course = catalog.get_course(command.course_id).await?;
    let purchase = PurchasedCourse {
        course_id: course.id,
        title: course.title,
        instructor_id: course.instructor_id,
        instructor_name: course.instructor_name,
        purchased_at: clock.now(),
        course_image: course.image,
    };

    let stored = purchases.record_purchase(command.user_id, purchase).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        user_id = %command.user_id,
        course_id = %command.course_id,
        purchased_at = %stored.purchased_at,
        "purchase recorded"
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use lectern_core::error::DomainError;
    use lectern_core::purchase::PurchaseLedger;
    use lectern_test_support::{
        FailingPurchaseLedger, FixedClock, InMemoryCourseCatalog, InMemoryPurchaseLedger,
        course_with_lectures, fixed_now,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::handle_record_purchase;
    use crate::domain::commands::RecordPurchase;

    #[tokio::test]
    async fn test_handle_record_purchase_unlocks_course() {
        // Arrange
        let user_id = Uuid::new_v4();
        let course = course_with_lectures(Uuid::new_v4(), &[Uuid::new_v4()]);
        let catalog = InMemoryCourseCatalog::new(vec![course.clone()]);
        let ledger = InMemoryPurchaseLedger::new();
        let command = RecordPurchase {
            correlation_id: Uuid::new_v4(),
            user_id,
            course_id: course.id,
        };

        // Act
        let purchase = handle_record_purchase(&command, &FixedClock(fixed_now()), &catalog, &ledger)
            .await
            .unwrap();

        // Assert
        assert_eq!(purchase.course_id, course.id);
        assert_eq!(purchase.title, course.title);
        assert_eq!(purchase.purchased_at, fixed_now());
        assert!(ledger.is_purchased(user_id, course.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_handle_record_purchase_twice_keeps_first_purchase() {
        // Arrange
        let user_id = Uuid::new_v4();
        let course = course_with_lectures(Uuid::new_v4(), &[]);
        let catalog = InMemoryCourseCatalog::new(vec![course.clone()]);
        let ledger = InMemoryPurchaseLedger::new();
        let command = RecordPurchase {
            correlation_id: Uuid::new_v4(),
            user_id,
            course_id: course.id,
        };

        // Act
        handle_record_purchase(&command, &FixedClock(fixed_now()), &catalog, &ledger)
            .await
            .unwrap();
        let later = FixedClock(fixed_now() + Duration::days(1));
        let repeated = handle_record_purchase(&command, &later, &catalog, &ledger)
            .await
            .unwrap();

        // Assert
        assert_eq!(repeated.purchased_at, fixed_now());
        let owned = ledger.purchased_courses(user_id).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].purchased_at, fixed_now());
    }

    #[tokio::test]
    async fn test_handle_record_purchase_returns_not_found_for_unknown_course() {
        // Arrange
        let catalog = InMemoryCourseCatalog::default();
        let ledger = InMemoryPurchaseLedger::new();
        let command = RecordPurchase {
            correlation_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        };

        // Act
        let result =
            handle_record_purchase(&command, &FixedClock(fixed_now()), &catalog, &ledger).await;

        // Assert
        assert!(matches!(result, Err(DomainError::CourseNotFound(_))));
    }

    #[tokio::test]
    async fn test_handle_record_purchase_propagates_ledger_failure() {
        // Arrange
        let course = course_with_lectures(Uuid::new_v4(), &[]);
        let catalog = InMemoryCourseCatalog::new(vec![course.clone()]);
        let command = RecordPurchase {
            correlation_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: course.id,
        };

        // Act
        let result = handle_record_purchase(
            &command,
            &FixedClock(fixed_now()),
            &catalog,
            &FailingPurchaseLedger,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));
    }
}
