//! JSON request and response shapes for the survey API. Keys are camelCase on the wire.

use crate::models::{Customer, SurveyResponseRecord};
use chrono::{NaiveDate, SubsecRound};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /api/survey`. Every field is optional at the serde level so that
/// missing values surface as field validation errors rather than a parse failure.
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub food_quality: Option<String>,
    #[serde(default)]
    pub service_speed: Option<String>,
    #[serde(default)]
    pub staff_friendliness: Option<String>,
    #[serde(default)]
    pub cleanliness: Option<String>,
    #[serde(default)]
    pub value_for_money: Option<String>,
    #[serde(default)]
    pub ambiance: Option<String>,
    /// Between 1.0 and 5.0 inclusive.
    #[serde(default)]
    pub overall_rating: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i32,
    pub customer_name: String,
    pub location: String,
    pub visit_date: NaiveDate,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            customer_name: c.customer_name,
            location: c.location,
            visit_date: c.visit_date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponseDto {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    /// `YYYY-MM-DD`.
    pub visit_date: String,
    pub location: String,
    pub food_quality: String,
    pub service_speed: String,
    pub staff_friendliness: String,
    pub cleanliness: String,
    pub value_for_money: String,
    pub ambiance: String,
    pub overall_rating: f64,
    pub comments: Option<String>,
    /// ISO-8601 date-time without offset, in UTC.
    pub created_at: String,
}

impl From<SurveyResponseRecord> for SurveyResponseDto {
    fn from(r: SurveyResponseRecord) -> Self {
        Self {
            id: r.id,
            customer_id: r.customer_id,
            customer_name: r.customer_name,
            visit_date: r.visit_date.format("%Y-%m-%d").to_string(),
            location: r.location,
            food_quality: r.food_quality,
            service_speed: r.service_speed,
            staff_friendliness: r.staff_friendliness,
            cleanliness: r.cleanliness,
            value_for_money: r.value_for_money,
            ambiance: r.ambiance,
            overall_rating: r.overall_rating,
            comments: r.comments,
            created_at: r
                .created_at
                .trunc_subsecs(6)
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        }
    }
}

/// Query string accepted by the list and summary routes.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact match on the customer's location.
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    pub responses: u64,
    pub average_rating: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub total_responses: u64,
    pub average_rating: f64,
    /// Percentage of responses whose derived satisfaction is positive.
    pub satisfaction_rate: f64,
    /// Count of responses per derived satisfaction level.
    pub overall_satisfaction: BTreeMap<String, u64>,
    /// Per rating category, count of responses per answer.
    pub attributes: BTreeMap<String, BTreeMap<String, u64>>,
    pub locations: BTreeMap<String, LocationStats>,
}
