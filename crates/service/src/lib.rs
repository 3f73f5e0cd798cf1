//! Service layer for the CarBuddy directory.
//! - `garage`: nearby search, top-rated listing and per-garage statistics
//!   behind a repository seam.
//! - `db`: CRUD for garages, services and auto-parts shops on top of `models`.

pub mod errors;
pub mod garage;
pub mod db;
#[cfg(test)]
pub mod test_support;
