//! Lectern: Instructor Course Authoring bounded context.
//!
//! Responsible for creating and editing course documents and their
//! curriculum, and for the instructor's own course list.

pub mod application;
pub mod domain;
