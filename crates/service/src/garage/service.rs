use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::categories::categorize;
use super::domain::{
    Garage, GarageWithDistance, PriceAggregate, SearchQuery, ServiceRecord, StatisticsReport, NO_SERVICE,
};
use super::geo::{haversine_km, round2};
use super::repository::GarageRepository;
use crate::errors::ServiceError;

/// Garage search and statistics, independent of web framework and store.
pub struct GarageService<R: GarageRepository> {
    repo: Arc<R>,
}

impl<R: GarageRepository> GarageService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Garages within `query.radius_km` of the caller, nearest first.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::garage::{GarageService, domain::SearchQuery, repository::mock::MockGarageRepository};
    /// let svc = GarageService::new(Arc::new(MockGarageRepository::default()));
    /// let hits = tokio_test::block_on(svc.search_nearby(SearchQuery::new(51.5, -0.12))).unwrap();
    /// assert!(hits.is_empty());
    /// ```
    #[instrument(skip(self), fields(lat = query.latitude, lon = query.longitude, radius_km = query.radius_km))]
    pub async fn search_nearby(&self, query: SearchQuery) -> Result<Vec<GarageWithDistance>, ServiceError> {
        query.validate()?;

        let candidates = self.repo.fetch_garages(query.min_rating).await?;
        let service_counts = self.repo.count_services_by_garage().await?;
        debug!(candidates = candidates.len(), "garage_candidates_fetched");

        let results = rank_by_distance(&query, candidates, &service_counts);
        info!(results = results.len(), "garage_search_completed");
        Ok(results)
    }

    /// The `count` best-rated garages; newer garages win rating ties.
    #[instrument(skip(self))]
    pub async fn top_rated(&self, count: u64) -> Result<Vec<Garage>, ServiceError> {
        if count == 0 {
            return Err(ServiceError::validation("count must be a positive integer"));
        }
        self.repo.top_rated(count).await
    }

    /// Services offered by one garage, oldest first.
    pub async fn services_of(&self, garage_id: Uuid) -> Result<Vec<ServiceRecord>, ServiceError> {
        self.repo.fetch_services(garage_id).await
    }

    /// Statistics over a garage's services as of now.
    pub async fn statistics(&self, garage_id: Uuid) -> Result<StatisticsReport, ServiceError> {
        self.statistics_at(garage_id, Utc::now()).await
    }

    /// Statistics with an explicit clock, used for `DaysSinceCreation`.
    #[instrument(skip(self, now), fields(garage_id = %garage_id))]
    pub async fn statistics_at(&self, garage_id: Uuid, now: DateTime<Utc>) -> Result<StatisticsReport, ServiceError> {
        let garage = self
            .repo
            .find_garage(garage_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Garage", garage_id))?;

        let aggregate = self.repo.price_aggregate(garage_id).await?;
        let most_expensive = if aggregate.count > 0 {
            self.repo.most_expensive_service(garage_id).await?
        } else {
            None
        };
        let names = self.repo.service_names(garage_id).await?;

        let report = build_report(garage, &aggregate, most_expensive, &names, now);
        info!(total_services = report.total_services, "garage_statistics_computed");
        Ok(report)
    }
}

/// In-memory half of the nearby search: distance, radius filter, ordering,
/// rounding and service-count lookup. Ties on distance are ordered by id.
pub fn rank_by_distance(
    query: &SearchQuery,
    candidates: Vec<Garage>,
    service_counts: &HashMap<Uuid, u64>,
) -> Vec<GarageWithDistance> {
    let mut within: Vec<(f64, Garage)> = candidates
        .into_iter()
        .map(|g| (haversine_km(query.latitude, query.longitude, g.latitude, g.longitude), g))
        .filter(|(distance, _)| *distance <= query.radius_km)
        .collect();

    within.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.id.cmp(&b.id)));

    within
        .into_iter()
        .map(|(distance, garage)| {
            let service_count = service_counts.get(&garage.id).copied().unwrap_or(0);
            GarageWithDistance { garage, distance_km: round2(distance), service_count }
        })
        .collect()
}

fn money(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO).round_dp(2)
}

fn build_report(
    garage: Garage,
    aggregate: &PriceAggregate,
    most_expensive: Option<String>,
    names: &[String],
    now: DateTime<Utc>,
) -> StatisticsReport {
    let has_services = aggregate.count > 0;
    let price = |v: Option<Decimal>| if has_services { money(v) } else { Decimal::ZERO };

    StatisticsReport {
        garage_id: garage.id,
        total_services: aggregate.count,
        average_service_price: price(aggregate.average),
        min_service_price: price(aggregate.min),
        max_service_price: price(aggregate.max),
        total_revenue_potential: price(aggregate.total),
        most_expensive_service: most_expensive.unwrap_or_else(|| NO_SERVICE.to_string()),
        service_categories: categorize(names.iter().map(String::as_str)),
        days_since_creation: (now - garage.created_at).num_days(),
        created_at: garage.created_at,
        rating: garage.rating,
        garage_name: garage.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garage::repository::mock::MockGarageRepository;
    use chrono::Duration;

    fn garage(name: &str, lat: f64, lon: f64, rating: Decimal, created_at: DateTime<Utc>) -> Garage {
        Garage {
            id: Uuid::new_v4(),
            name: name.into(),
            address: format!("{name} street"),
            latitude: lat,
            longitude: lon,
            rating,
            created_at,
            updated_at: created_at,
        }
    }

    fn offering(garage_id: Uuid, name: &str, cents: i64, created_at: DateTime<Utc>) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4(),
            garage_id,
            name: name.into(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            created_at,
            updated_at: created_at,
        }
    }

    fn service_with(garages: Vec<Garage>, services: Vec<ServiceRecord>) -> (GarageService<MockGarageRepository>, Arc<MockGarageRepository>) {
        let repo = Arc::new(MockGarageRepository::new(garages, services));
        (GarageService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn search_filters_by_radius_and_orders_nearest_first() {
        let now = Utc::now();
        // roughly 0, 5.6, 11.1 and 55.6 km north of the origin
        let here = garage("here", 0.0, 0.0, Decimal::from(3), now);
        let near = garage("near", 0.05, 0.0, Decimal::from(4), now);
        let edge = garage("edge", 0.1, 0.0, Decimal::from(5), now);
        let far = garage("far", 0.5, 0.0, Decimal::from(5), now);
        let (svc, _) = service_with(vec![far, edge.clone(), near.clone(), here.clone()], vec![]);

        let hits = svc.search_nearby(SearchQuery::new(0.0, 0.0).with_radius(12.0)).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.garage.name.as_str()).collect();
        assert_eq!(names, vec!["here", "near", "edge"]);
        assert_eq!(hits[0].distance_km, 0.0);
        assert_eq!(hits[1].distance_km, 5.56);
        assert_eq!(hits[2].distance_km, 11.12);
        for pair in hits.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        for h in &hits {
            assert!(h.distance_km <= 12.0 + 1e-9);
        }
    }

    #[tokio::test]
    async fn search_attaches_service_counts_defaulting_to_zero() {
        let now = Utc::now();
        let busy = garage("busy", 0.01, 0.0, Decimal::from(4), now);
        let idle = garage("idle", 0.02, 0.0, Decimal::from(4), now);
        let services = vec![
            offering(busy.id, "Oil Change", 4999, now),
            offering(busy.id, "Brake Pad", 8000, now),
        ];
        let (svc, _) = service_with(vec![busy.clone(), idle.clone()], services);

        let hits = svc.search_nearby(SearchQuery::new(0.0, 0.0)).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!((hits[0].garage.id, hits[0].service_count), (busy.id, 2));
        assert_eq!((hits[1].garage.id, hits[1].service_count), (idle.id, 0));
    }

    #[tokio::test]
    async fn search_applies_min_rating_in_store() {
        let now = Utc::now();
        let good = garage("good", 0.0, 0.01, Decimal::new(450, 2), now);
        let poor = garage("poor", 0.0, 0.02, Decimal::new(299, 2), now);
        let (svc, repo) = service_with(vec![good.clone(), poor], vec![]);

        let hits = svc
            .search_nearby(SearchQuery::new(0.0, 0.0).with_min_rating(Decimal::new(45, 1)))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].garage.id, good.id);
        assert_eq!(repo.calls(), vec!["fetch_garages", "count_services_by_garage"]);
    }

    #[tokio::test]
    async fn invalid_search_is_rejected_before_any_read() {
        let (svc, repo) = service_with(vec![], vec![]);
        let bad = [
            SearchQuery::new(100.0, 0.0),
            SearchQuery::new(0.0, 200.0),
            SearchQuery::new(0.0, 0.0).with_radius(0.0),
            SearchQuery::new(0.0, 0.0).with_min_rating(Decimal::from(6)),
        ];
        for q in bad {
            let err = svc.search_nearby(q).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn equal_distances_are_ordered_by_id() {
        let now = Utc::now();
        let a = garage("a", 0.0, 0.01, Decimal::ONE, now);
        let b = garage("b", 0.0, -0.01, Decimal::ONE, now);
        let expected = if a.id < b.id { vec![a.id, b.id] } else { vec![b.id, a.id] };

        let hits = rank_by_distance(&SearchQuery::new(0.0, 0.0), vec![a.clone(), b.clone()], &HashMap::new());
        assert_eq!(hits.iter().map(|h| h.garage.id).collect::<Vec<_>>(), expected);
        let hits = rank_by_distance(&SearchQuery::new(0.0, 0.0), vec![b, a], &HashMap::new());
        assert_eq!(hits.iter().map(|h| h.garage.id).collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn top_rated_breaks_ties_by_newest() {
        let t0 = Utc::now() - Duration::days(30);
        let older_five = garage("older five", 0.0, 0.0, Decimal::from(5), t0);
        let newer_five = garage("newer five", 0.0, 0.0, Decimal::from(5), t0 + Duration::days(1));
        let four = garage("four", 0.0, 0.0, Decimal::from(4), t0 + Duration::days(2));
        let three = garage("three", 0.0, 0.0, Decimal::from(3), t0 + Duration::days(3));
        let two = garage("two", 0.0, 0.0, Decimal::from(2), t0 + Duration::days(4));
        let (svc, _) = service_with(
            vec![older_five.clone(), newer_five.clone(), four.clone(), three, two],
            vec![],
        );

        let top = svc.top_rated(3).await.unwrap();
        let ids: Vec<Uuid> = top.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![newer_five.id, older_five.id, four.id]);
    }

    #[tokio::test]
    async fn top_rated_rejects_zero() {
        let (svc, repo) = service_with(vec![], vec![]);
        assert!(matches!(svc.top_rated(0).await, Err(ServiceError::Validation(_))));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn statistics_for_garage_without_services() {
        let created = Utc::now() - Duration::days(3);
        let g = garage("empty", 0.0, 0.0, Decimal::new(420, 2), created);
        let (svc, repo) = service_with(vec![g.clone()], vec![]);

        let report = svc.statistics(g.id).await.unwrap();
        assert_eq!(report.total_services, 0);
        assert_eq!(report.average_service_price, Decimal::ZERO);
        assert_eq!(report.min_service_price, Decimal::ZERO);
        assert_eq!(report.max_service_price, Decimal::ZERO);
        assert_eq!(report.total_revenue_potential, Decimal::ZERO);
        assert_eq!(report.most_expensive_service, "N/A");
        assert!(report.service_categories.is_empty());
        assert_eq!(report.days_since_creation, 3);
        assert!(!repo.calls().contains(&"most_expensive_service"));
    }

    #[tokio::test]
    async fn statistics_aggregates_prices_and_categories() {
        let created = Utc::now() - Duration::days(10);
        let g = garage("full", 0.0, 0.0, Decimal::from(4), created);
        let services = vec![
            offering(g.id, "Oil Change", 4999, created),
            offering(g.id, "Oil Filter", 1500, created + Duration::minutes(1)),
            offering(g.id, "Brake Pad", 12000, created + Duration::minutes(2)),
        ];
        let (svc, _) = service_with(vec![g.clone()], services);

        let report = svc.statistics(g.id).await.unwrap();
        assert_eq!(report.garage_id, g.id);
        assert_eq!(report.garage_name, "full");
        assert_eq!(report.total_services, 3);
        // (49.99 + 15.00 + 120.00) / 3 = 61.663..
        assert_eq!(report.average_service_price, Decimal::new(6166, 2));
        assert_eq!(report.min_service_price, Decimal::new(1500, 2));
        assert_eq!(report.max_service_price, Decimal::new(12000, 2));
        assert_eq!(report.total_revenue_potential, Decimal::new(18499, 2));
        assert_eq!(report.most_expensive_service, "Brake Pad");
        let cats: Vec<(&str, u64)> = report.service_categories.iter().map(|c| (c.category.as_str(), c.count)).collect();
        assert_eq!(cats, vec![("Oil", 2), ("Brake", 1)]);
    }

    #[tokio::test]
    async fn statistics_for_unknown_garage_is_not_found_without_aggregation() {
        let (svc, repo) = service_with(vec![], vec![]);
        let err = svc.statistics(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(repo.calls(), vec!["find_garage"]);
    }

    #[tokio::test]
    async fn days_since_creation_truncates_partial_days() {
        let created = Utc::now();
        let g = garage("young", 0.0, 0.0, Decimal::ONE, created);
        let (svc, _) = service_with(vec![g.clone()], vec![]);

        let report = svc.statistics_at(g.id, created + Duration::hours(47)).await.unwrap();
        assert_eq!(report.days_since_creation, 1);
    }

    #[test]
    fn average_rounds_half_to_even() {
        let now = Utc::now();
        let g = garage("g", 0.0, 0.0, Decimal::ONE, now);
        let aggregate = PriceAggregate {
            count: 2,
            average: Some(Decimal::new(10125, 3)),
            min: Some(Decimal::new(1000, 2)),
            max: Some(Decimal::new(1025, 2)),
            total: Some(Decimal::new(2025, 2)),
        };
        let report = build_report(g, &aggregate, Some("x".into()), &[], now);
        assert_eq!(report.average_service_price, Decimal::new(1012, 2));
    }

    #[tokio::test]
    async fn services_of_lists_only_that_garage() {
        let now = Utc::now();
        let a = garage("a", 0.0, 0.0, Decimal::ONE, now);
        let b = garage("b", 0.0, 0.0, Decimal::ONE, now);
        let services = vec![offering(a.id, "Wash", 1000, now), offering(b.id, "Wax", 2000, now)];
        let (svc, _) = service_with(vec![a.clone(), b], services);

        let list = svc.services_of(a.id).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Wash");
    }
}
