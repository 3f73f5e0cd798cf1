//! Garage search and statistics: domain, repository, service.
//!
//! Anything the store can evaluate (rating predicate, group-by-count,
//! price aggregates, order/limit) goes through [`repository::GarageRepository`];
//! Haversine distance and service-name tokenization run in process over the
//! already reduced candidate set.

pub mod domain;
pub mod geo;
pub mod categories;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::GarageService;
