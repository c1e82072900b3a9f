//! Request validation for survey submissions.

use crate::dto::SurveyRequest;
use crate::error::{AppError, FieldErrors};
use crate::models::{NewCustomer, NewSurvey, NewSurveyResponse};
use chrono::NaiveDate;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

pub const CUSTOMER_NAME_MAX: usize = 100;
pub const LOCATION_MAX: usize = 50;
pub const CATEGORY_MAX: usize = 20;

pub struct RequestValidator;

impl RequestValidator {
    /// Check every field of `req`, collecting one message per failing field, and
    /// build the rows to insert. `visit_date` becomes the customer's visit date.
    pub fn validate_survey(req: &SurveyRequest, visit_date: NaiveDate) -> Result<NewSurvey, AppError> {
        let mut errors = FieldErrors::new();

        let customer_name = required_text(&mut errors, "customerName", req.customer_name.as_deref(), CUSTOMER_NAME_MAX);
        let location = required_text(&mut errors, "location", req.location.as_deref(), LOCATION_MAX);
        let food_quality = required_text(&mut errors, "foodQuality", req.food_quality.as_deref(), CATEGORY_MAX);
        let service_speed = required_text(&mut errors, "serviceSpeed", req.service_speed.as_deref(), CATEGORY_MAX);
        let staff_friendliness =
            required_text(&mut errors, "staffFriendliness", req.staff_friendliness.as_deref(), CATEGORY_MAX);
        let cleanliness = required_text(&mut errors, "cleanliness", req.cleanliness.as_deref(), CATEGORY_MAX);
        let value_for_money = required_text(&mut errors, "valueForMoney", req.value_for_money.as_deref(), CATEGORY_MAX);
        let ambiance = required_text(&mut errors, "ambiance", req.ambiance.as_deref(), CATEGORY_MAX);
        let overall_rating = rating(&mut errors, "overallRating", req.overall_rating);

        errors.into_result()?;

        Ok(NewSurvey {
            customer: NewCustomer {
                customer_name,
                location,
                visit_date,
            },
            response: NewSurveyResponse {
                food_quality,
                service_speed,
                staff_friendliness,
                cleanliness,
                value_for_money,
                ambiance,
                overall_rating: round_to_tenth(overall_rating),
                comments: req.comments.clone(),
            },
        })
    }
}

/// Present, non-blank and at most `max_chars` characters. The value is kept as submitted.
/// On failure a message is recorded and the returned value must not be used.
fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_chars: usize) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => {
            if s.chars().count() > max_chars {
                errors.add(field, format!("size must be between 0 and {}", max_chars));
            }
            s.to_string()
        }
        _ => {
            errors.add(field, "must not be blank");
            String::new()
        }
    }
}

fn rating(errors: &mut FieldErrors, field: &str, value: Option<f64>) -> f64 {
    match value {
        None => errors.add(field, "must not be null"),
        Some(n) if !n.is_finite() || n < MIN_RATING => {
            errors.add(field, format!("must be greater than or equal to {:.1}", MIN_RATING))
        }
        Some(n) if n > MAX_RATING => {
            errors.add(field, format!("must be less than or equal to {:.1}", MAX_RATING))
        }
        Some(n) => return n,
    }
    0.0
}

/// Ratings are stored with one fractional digit.
pub fn round_to_tenth(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid() -> SurveyRequest {
        SurveyRequest {
            customer_name: Some("Ada Lovelace".into()),
            location: Some("Downtown".into()),
            food_quality: Some("Highly Satisfied".into()),
            service_speed: Some("Satisfied".into()),
            staff_friendliness: Some("Neutral".into()),
            cleanliness: Some("Satisfied".into()),
            value_for_money: Some("Dissatisfied".into()),
            ambiance: Some("Satisfied".into()),
            overall_rating: Some(4.0),
            comments: None,
        }
    }

    fn field_errors(req: &SurveyRequest) -> FieldErrors {
        match RequestValidator::validate_survey(req, today()) {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_request_builds_rows() {
        let survey = RequestValidator::validate_survey(&valid(), today()).unwrap();
        assert_eq!(survey.customer.customer_name, "Ada Lovelace");
        assert_eq!(survey.customer.visit_date, today());
        assert_eq!(survey.response.food_quality, "Highly Satisfied");
        assert_eq!(survey.response.overall_rating, 4.0);
        assert!(survey.response.comments.is_none());
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = field_errors(&SurveyRequest::default());
        assert_eq!(errors.len(), 9);
        assert_eq!(errors.get("customerName"), Some("must not be blank"));
        assert_eq!(errors.get("ambiance"), Some("must not be blank"));
        assert_eq!(errors.get("overallRating"), Some("must not be null"));
        assert_eq!(errors.get("comments"), None);
    }

    #[test]
    fn whitespace_only_is_blank() {
        let mut req = valid();
        req.location = Some("   ".into());
        let errors = field_errors(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("location"), Some("must not be blank"));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for ok in [1.0, 5.0, 3.3] {
            let mut req = valid();
            req.overall_rating = Some(ok);
            assert!(RequestValidator::validate_survey(&req, today()).is_ok(), "{} should pass", ok);
        }

        let mut req = valid();
        req.overall_rating = Some(0.9);
        assert_eq!(
            field_errors(&req).get("overallRating"),
            Some("must be greater than or equal to 1.0")
        );

        req.overall_rating = Some(5.01);
        assert_eq!(
            field_errors(&req).get("overallRating"),
            Some("must be less than or equal to 5.0")
        );
    }

    #[test]
    fn overlong_values_are_rejected_by_column_width() {
        let mut req = valid();
        req.customer_name = Some("x".repeat(CUSTOMER_NAME_MAX + 1));
        req.food_quality = Some("y".repeat(CATEGORY_MAX + 1));
        let errors = field_errors(&req);
        assert_eq!(errors.get("customerName"), Some("size must be between 0 and 100"));
        assert_eq!(errors.get("foodQuality"), Some("size must be between 0 and 20"));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let mut req = valid();
        req.location = Some("é".repeat(LOCATION_MAX));
        assert!(RequestValidator::validate_survey(&req, today()).is_ok());
    }

    #[test]
    fn rating_is_rounded_to_one_decimal() {
        let mut req = valid();
        req.overall_rating = Some(4.26);
        let survey = RequestValidator::validate_survey(&req, today()).unwrap();
        assert_eq!(survey.response.overall_rating, 4.3);
        assert_eq!(round_to_tenth(2.04), 2.0);
    }
}
