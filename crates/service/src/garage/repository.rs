use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::domain::{Garage, PriceAggregate, ServiceRecord};
use crate::errors::ServiceError;

/// Read capabilities the search and statistics paths need from the store.
/// Every method here is expected to be evaluated by the backing store.
#[async_trait]
pub trait GarageRepository: Send + Sync {
    /// Garages with `rating >= min_rating`, or all garages.
    async fn fetch_garages(&self, min_rating: Option<Decimal>) -> Result<Vec<Garage>, ServiceError>;
    /// Number of services per garage id; garages without services are absent.
    async fn count_services_by_garage(&self) -> Result<HashMap<Uuid, u64>, ServiceError>;
    async fn fetch_services(&self, garage_id: Uuid) -> Result<Vec<ServiceRecord>, ServiceError>;
    async fn find_garage(&self, id: Uuid) -> Result<Option<Garage>, ServiceError>;
    /// Ordered by rating desc, then creation time desc.
    async fn top_rated(&self, limit: u64) -> Result<Vec<Garage>, ServiceError>;
    async fn price_aggregate(&self, garage_id: Uuid) -> Result<PriceAggregate, ServiceError>;
    /// Name of the highest priced service; equal prices resolve by name.
    async fn most_expensive_service(&self, garage_id: Uuid) -> Result<Option<String>, ServiceError>;
    /// Service names in creation order.
    async fn service_names(&self, garage_id: Uuid) -> Result<Vec<String>, ServiceError>;
}

/// Simple in-memory mock repository for tests, benches and doc examples.
/// Mirrors the SQL semantics of the SeaORM implementation and records which
/// methods were called.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockGarageRepository {
        garages: Mutex<Vec<Garage>>,
        services: Mutex<Vec<ServiceRecord>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockGarageRepository {
        pub fn new(garages: Vec<Garage>, services: Vec<ServiceRecord>) -> Self {
            Self { garages: Mutex::new(garages), services: Mutex::new(services), calls: Mutex::default() }
        }

        /// Names of repository methods invoked so far, in order.
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn services_of(&self, garage_id: Uuid) -> Vec<ServiceRecord> {
            let mut rows: Vec<ServiceRecord> = self
                .services
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.garage_id == garage_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
            rows
        }
    }

    #[async_trait]
    impl GarageRepository for MockGarageRepository {
        async fn fetch_garages(&self, min_rating: Option<Decimal>) -> Result<Vec<Garage>, ServiceError> {
            self.record("fetch_garages");
            let garages = self.garages.lock().unwrap();
            Ok(garages
                .iter()
                .filter(|g| min_rating.map_or(true, |min| g.rating >= min))
                .cloned()
                .collect())
        }

        async fn count_services_by_garage(&self) -> Result<HashMap<Uuid, u64>, ServiceError> {
            self.record("count_services_by_garage");
            let mut counts = HashMap::new();
            for s in self.services.lock().unwrap().iter() {
                *counts.entry(s.garage_id).or_insert(0) += 1;
            }
            Ok(counts)
        }

        async fn fetch_services(&self, garage_id: Uuid) -> Result<Vec<ServiceRecord>, ServiceError> {
            self.record("fetch_services");
            Ok(self.services_of(garage_id))
        }

        async fn find_garage(&self, id: Uuid) -> Result<Option<Garage>, ServiceError> {
            self.record("find_garage");
            Ok(self.garages.lock().unwrap().iter().find(|g| g.id == id).cloned())
        }

        async fn top_rated(&self, limit: u64) -> Result<Vec<Garage>, ServiceError> {
            self.record("top_rated");
            let mut garages = self.garages.lock().unwrap().clone();
            garages.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| b.created_at.cmp(&a.created_at)));
            garages.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            Ok(garages)
        }

        async fn price_aggregate(&self, garage_id: Uuid) -> Result<PriceAggregate, ServiceError> {
            self.record("price_aggregate");
            let prices: Vec<Decimal> = self.services_of(garage_id).iter().map(|s| s.price).collect();
            if prices.is_empty() {
                return Ok(PriceAggregate::default());
            }
            let total: Decimal = prices.iter().copied().sum();
            let count = prices.len() as u64;
            Ok(PriceAggregate {
                count,
                average: Some(total / Decimal::from(count)),
                min: prices.iter().copied().min(),
                max: prices.iter().copied().max(),
                total: Some(total),
            })
        }

        async fn most_expensive_service(&self, garage_id: Uuid) -> Result<Option<String>, ServiceError> {
            self.record("most_expensive_service");
            let mut rows = self.services_of(garage_id);
            rows.sort_by(|a, b| b.price.cmp(&a.price).then_with(|| a.name.cmp(&b.name)));
            Ok(rows.into_iter().next().map(|s| s.name))
        }

        async fn service_names(&self, garage_id: Uuid) -> Result<Vec<String>, ServiceError> {
            self.record("service_names");
            Ok(self.services_of(garage_id).into_iter().map(|s| s.name).collect())
        }
    }
}
