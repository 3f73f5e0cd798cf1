//! Field rules shared by the provider and service entities.

use rust_decimal::Decimal;

use crate::errors::ModelError;

pub const NAME_MAX: usize = 200;
pub const ADDRESS_MAX: usize = 500;
pub const DESCRIPTION_MAX: usize = 1000;

pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    validate_len(field, value, max)
}

pub fn validate_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn validate_latitude(lat: f64) -> Result<(), ModelError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ModelError::Validation("latitude must be within [-90, 90]".into()));
    }
    Ok(())
}

pub fn validate_longitude(lon: f64) -> Result<(), ModelError> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ModelError::Validation("longitude must be within [-180, 180]".into()));
    }
    Ok(())
}

pub fn validate_rating(rating: Decimal) -> Result<(), ModelError> {
    if rating < Decimal::ZERO || rating > Decimal::from(5) {
        return Err(ModelError::Validation("rating must be within [0, 5]".into()));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price < Decimal::ZERO {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn coordinates_accept_bounds_and_reject_nan() {
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.01).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.5).is_err());
    }

    #[test]
    fn rating_range_is_inclusive() {
        assert!(validate_rating(Decimal::ZERO).is_ok());
        assert!(validate_rating(Decimal::new(500, 2)).is_ok());
        assert!(validate_rating(Decimal::new(501, 2)).is_err());
        assert!(validate_rating(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_required("name", "   ", NAME_MAX).is_err());
        assert!(validate_required("name", &"x".repeat(NAME_MAX + 1), NAME_MAX).is_err());
        assert!(validate_required("name", "Joe's Garage", NAME_MAX).is_ok());
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
    }
}
