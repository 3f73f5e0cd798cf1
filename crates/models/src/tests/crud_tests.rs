use crate::db::connect;
use crate::{garage, garage_service, auto_parts_shop, errors::ModelError};
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, ModelTrait};
use anyhow::Result;
use migration::MigratorTrait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is available.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn sample_garage(name: &str) -> garage::NewGarage {
    garage::NewGarage {
        name: name.to_string(),
        address: "1 Test Street".into(),
        latitude: 51.5074,
        longitude: -0.1278,
        rating: Decimal::new(450, 2),
    }
}

#[tokio::test]
async fn test_garage_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = format!("test_garage_{}", Uuid::new_v4());
    let created = garage::create(&db, sample_garage(&name)).await?;
    assert_eq!(created.name, name);
    assert_eq!(created.rating, Decimal::new(450, 2));
    assert_eq!(created.created_at, created.updated_at);

    let found = garage::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|g| g.name), Some(name.clone()));

    let by_name = garage::Entity::find().filter(garage::Column::Name.eq(name)).one(&db).await?;
    assert!(by_name.is_some());

    garage::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(garage::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_garage_rejects_out_of_range_rating() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let mut input = sample_garage("too good");
    input.rating = Decimal::new(510, 2);
    let err = garage::create(&db, input).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_services_cascade_with_garage() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let g = garage::create(&db, sample_garage(&format!("cascade_{}", Uuid::new_v4()))).await?;
    let mut ids = vec![];
    for (name, cents) in [("Oil Change", 4999), ("Brake Pad", 12000)] {
        let s = garage_service::create(&db, garage_service::NewService {
            garage_id: g.id,
            name: name.into(),
            description: String::new(),
            price: Decimal::new(cents, 2),
        }).await?;
        assert_eq!(s.created_at, s.updated_at);
        ids.push(s.id);
    }

    let related = g.find_related(garage_service::Entity).all(&db).await?;
    assert_eq!(related.len(), 2);

    garage::Entity::delete_by_id(g.id).exec(&db).await?;
    for id in ids {
        assert!(garage_service::Entity::find_by_id(id).one(&db).await?.is_none());
    }
    Ok(())
}

#[tokio::test]
async fn test_service_for_missing_garage_fails() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let res = garage_service::create(&db, garage_service::NewService {
        garage_id: Uuid::new_v4(),
        name: "Orphan".into(),
        description: String::new(),
        price: Decimal::ONE,
    }).await;
    assert!(matches!(res, Err(ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn test_auto_parts_shop_create() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let shop = auto_parts_shop::create(&db, auto_parts_shop::NewAutoPartsShop {
        name: format!("parts_{}", Uuid::new_v4()),
        address: "2 Test Street".into(),
        latitude: 48.8566,
        longitude: 2.3522,
        rating: Decimal::new(3, 0),
    }).await?;
    assert!(auto_parts_shop::Entity::find_by_id(shop.id).one(&db).await?.is_some());
    auto_parts_shop::Entity::delete_by_id(shop.id).exec(&db).await?;
    Ok(())
}
