//! Shared test doubles for the Lectern learning platform.

mod catalog;
mod clock;
mod fixtures;
mod progress;
mod purchase;

pub use catalog::{FailingCourseCatalog, InMemoryCourseCatalog};
pub use clock::{FixedClock, SteppingClock, fixed_now};
pub use fixtures::{course_with_lectures, purchase_of};
pub use progress::{
    FailingProgressRepository, InMemoryProgressRepository, RendezvousProgressRepository,
};
pub use purchase::{FailingPurchaseLedger, InMemoryPurchaseLedger};
