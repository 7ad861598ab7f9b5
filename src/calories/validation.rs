// ABOUTME: Request validation for calorie lookups
// ABOUTME: Rejects empty dish names and non-positive servings before any network call

//! Calorie request validation

use super::{CalorieLookupError, CalorieQuery, CalorieRequest, Servings};

/// Validate an inbound request into a query
///
/// The dish name is trimmed; `servings` defaults to one when omitted.
///
/// # Errors
///
/// Returns [`CalorieLookupError::InvalidRequest`] when the dish name is absent
/// or blank, or when servings is zero, negative, or not finite.
pub fn validate(request: CalorieRequest) -> Result<CalorieQuery, CalorieLookupError> {
    let dish_name = request
        .dish_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(CalorieLookupError::InvalidRequest)?
        .to_owned();

    let servings = match request.servings {
        None => Servings::default(),
        Some(value) => Servings::new(value).ok_or(CalorieLookupError::InvalidRequest)?,
    };

    Ok(CalorieQuery {
        dish_name,
        servings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dish_name: Option<&str>, servings: Option<f64>) -> CalorieRequest {
        CalorieRequest {
            dish_name: dish_name.map(ToOwned::to_owned),
            servings,
        }
    }

    #[test]
    fn test_defaults_to_one_serving() {
        let query = validate(request(Some("apple"), None)).unwrap();
        assert_eq!(query.dish_name, "apple");
        assert!((query.servings.get() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trims_dish_name() {
        let query = validate(request(Some("  chicken breast "), Some(2.0))).unwrap();
        assert_eq!(query.dish_name, "chicken breast");
    }

    #[test]
    fn test_rejects_missing_or_blank_dish() {
        assert!(matches!(
            validate(request(None, Some(1.0))),
            Err(CalorieLookupError::InvalidRequest)
        ));
        assert!(matches!(
            validate(request(Some(""), Some(1.0))),
            Err(CalorieLookupError::InvalidRequest)
        ));
        assert!(matches!(
            validate(request(Some("   "), Some(1.0))),
            Err(CalorieLookupError::InvalidRequest)
        ));
    }

    #[test]
    fn test_rejects_non_positive_servings() {
        for servings in [0.0, -1.0, -0.5] {
            assert!(
                matches!(
                    validate(request(Some("rice"), Some(servings))),
                    Err(CalorieLookupError::InvalidRequest)
                ),
                "servings {servings} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_fractional_servings() {
        let query = validate(request(Some("rice"), Some(0.5))).unwrap();
        assert!((query.servings.get() - 0.5).abs() < f64::EPSILON);
    }
}
