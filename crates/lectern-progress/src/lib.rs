//! Lectern: Course Progress bounded context.
//!
//! Responsible for deciding which lecture a learner should watch next,
//! recording watched lectures, detecting course completion and resetting
//! a course so it can be rewatched. Every operation is gated on the
//! learner having purchased the course.

pub mod application;
pub mod domain;
