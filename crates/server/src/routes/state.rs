use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::garage::{repo::seaorm::SeaOrmGarageRepository, GarageService};

/// Shared handler state. Cloned per request; holds no mutable data.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub garages: Arc<GarageService<SeaOrmGarageRepository>>,
    pub search: configs::SearchConfig,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, search: configs::SearchConfig) -> Self {
        let repo = Arc::new(SeaOrmGarageRepository::new(db.clone()));
        Self { db, garages: Arc::new(GarageService::new(repo)), search }
    }
}
