//! Lectern API: HTTP surface for course progress, catalog browsing,
//! purchased-course listings and instructor course authoring.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod telemetry;
