//! Persisted rows for the `customers` and `survey_responses` tables.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Customer {
    pub id: i32,
    pub customer_name: String,
    pub location: String,
    pub visit_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct SurveyResponse {
    pub id: i32,
    pub customer_id: i32,
    pub food_quality: String,
    pub service_speed: String,
    pub staff_friendliness: String,
    pub cleanliness: String,
    pub value_for_money: String,
    pub ambiance: String,
    /// Stored as `NUMERIC(2,1)`, read back as float8.
    pub overall_rating: f64,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A survey response joined with the customer that submitted it.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct SurveyResponseRecord {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub location: String,
    pub visit_date: NaiveDate,
    pub food_quality: String,
    pub service_speed: String,
    pub staff_friendliness: String,
    pub cleanliness: String,
    pub value_for_money: String,
    pub ambiance: String,
    pub overall_rating: f64,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SurveyResponseRecord {
    pub fn new(response: SurveyResponse, customer: &Customer) -> Self {
        Self {
            id: response.id,
            customer_id: customer.id,
            customer_name: customer.customer_name.clone(),
            location: customer.location.clone(),
            visit_date: customer.visit_date,
            food_quality: response.food_quality,
            service_speed: response.service_speed,
            staff_friendliness: response.staff_friendliness,
            cleanliness: response.cleanliness,
            value_for_money: response.value_for_money,
            ambiance: response.ambiance,
            overall_rating: response.overall_rating,
            comments: response.comments,
            created_at: response.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub customer_name: String,
    pub location: String,
    pub visit_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSurveyResponse {
    pub food_quality: String,
    pub service_speed: String,
    pub staff_friendliness: String,
    pub cleanliness: String,
    pub value_for_money: String,
    pub ambiance: String,
    pub overall_rating: f64,
    pub comments: Option<String>,
}

/// A validated submission: the customer row and the response that will reference it.
#[derive(Clone, Debug, PartialEq)]
pub struct NewSurvey {
    pub customer: NewCustomer,
    pub response: NewSurveyResponse,
}

/// Rows written by a successful submission.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmittedSurvey {
    pub customer: Customer,
    pub response: SurveyResponse,
}
