//! Lectern: Catalog & Enrollment bounded context.
//!
//! Responsible for the student-facing course listing, course detail
//! pages, and the per-learner list of purchased courses.

pub mod application;
pub mod domain;
