//! In-process store with the same ordering and id semantics as the PostgreSQL tables.

use super::{ListFilter, SurveyStore};
use crate::error::AppError;
use crate::models::{Customer, NewSurvey, SubmittedSurvey, SurveyResponse, SurveyResponseRecord};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i32, Customer>,
    responses: BTreeMap<i32, SurveyResponse>,
    next_customer_id: i32,
    next_response_id: i32,
}

#[derive(Default)]
pub struct MemorySurveyStore {
    tables: RwLock<Tables>,
}

impl MemorySurveyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyStore for MemorySurveyStore {
    async fn submit(&self, survey: &NewSurvey) -> Result<SubmittedSurvey, AppError> {
        let mut tables = self.tables.write().await;
        // timestamptz keeps microseconds
        let now = Utc::now().trunc_subsecs(6);

        tables.next_customer_id += 1;
        let customer = Customer {
            id: tables.next_customer_id,
            customer_name: survey.customer.customer_name.clone(),
            location: survey.customer.location.clone(),
            visit_date: survey.customer.visit_date,
            created_at: now,
        };

        tables.next_response_id += 1;
        let r = &survey.response;
        let response = SurveyResponse {
            id: tables.next_response_id,
            customer_id: customer.id,
            food_quality: r.food_quality.clone(),
            service_speed: r.service_speed.clone(),
            staff_friendliness: r.staff_friendliness.clone(),
            cleanliness: r.cleanliness.clone(),
            value_for_money: r.value_for_money.clone(),
            ambiance: r.ambiance.clone(),
            overall_rating: r.overall_rating,
            comments: r.comments.clone(),
            created_at: now,
        };

        tables.customers.insert(customer.id, customer.clone());
        tables.responses.insert(response.id, response.clone());
        Ok(SubmittedSurvey { customer, response })
    }

    async fn list_customers(&self, filter: &ListFilter) -> Result<Vec<Customer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .values()
            .filter(|c| filter.matches_location(&c.location))
            .cloned()
            .collect())
    }

    async fn list_responses(
        &self,
        filter: &ListFilter,
    ) -> Result<Vec<SurveyResponseRecord>, AppError> {
        let tables = self.tables.read().await;
        let mut out = Vec::with_capacity(tables.responses.len());
        for response in tables.responses.values() {
            // submit() writes both rows under one lock, so the customer is always present
            let Some(customer) = tables.customers.get(&response.customer_id) else {
                continue;
            };
            if filter.matches_location(&customer.location) {
                out.push(SurveyResponseRecord::new(response.clone(), customer));
            }
        }
        Ok(out)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCustomer, NewSurveyResponse};
    use chrono::NaiveDate;

    fn survey(name: &str, location: &str, rating: f64) -> NewSurvey {
        NewSurvey {
            customer: NewCustomer {
                customer_name: name.into(),
                location: location.into(),
                visit_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            },
            response: NewSurveyResponse {
                food_quality: "Satisfied".into(),
                service_speed: "Neutral".into(),
                staff_friendliness: "Satisfied".into(),
                cleanliness: "Highly Satisfied".into(),
                value_for_money: "Dissatisfied".into(),
                ambiance: "Satisfied".into(),
                overall_rating: rating,
                comments: Some("fine".into()),
            },
        }
    }

    #[tokio::test]
    async fn ids_increase_and_response_references_customer() {
        let store = MemorySurveyStore::new();
        let first = store.submit(&survey("Ada", "Downtown", 4.0)).await.unwrap();
        let second = store.submit(&survey("Bo", "Uptown", 3.5)).await.unwrap();

        assert_eq!(first.customer.id, 1);
        assert_eq!(second.customer.id, 2);
        assert_eq!(second.response.id, 2);
        assert_eq!(second.response.customer_id, second.customer.id);
    }

    #[tokio::test]
    async fn lists_join_customer_fields_and_filter_by_location() {
        let store = MemorySurveyStore::new();
        store.submit(&survey("Ada", "Downtown", 4.0)).await.unwrap();
        store.submit(&survey("Bo", "Uptown", 3.5)).await.unwrap();
        store.submit(&survey("Cy", "Downtown", 2.0)).await.unwrap();

        let all = store.list_responses(&ListFilter::default()).await.unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(all[1].customer_name, "Bo");
        assert_eq!(all[1].location, "Uptown");

        let downtown = store
            .list_customers(&ListFilter::location("Downtown"))
            .await
            .unwrap();
        assert_eq!(
            downtown.iter().map(|c| c.customer_name.as_str()).collect::<Vec<_>>(),
            vec!["Ada", "Cy"]
        );

        let uptown = store
            .list_responses(&ListFilter::location("Uptown"))
            .await
            .unwrap();
        assert_eq!(uptown.len(), 1);
        assert_eq!(uptown[0].overall_rating, 3.5);
    }
}
