//! PostgreSQL store: table DDL, database bootstrap and the sqlx-backed [`SurveyStore`].

use super::{ListFilter, SurveyStore};
use crate::error::{AppError, ConfigError};
use crate::models::{Customer, NewSurvey, SubmittedSurvey, SurveyResponse, SurveyResponseRecord};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        customer_name VARCHAR(100) NOT NULL,
        location VARCHAR(50) NOT NULL,
        visit_date DATE NOT NULL DEFAULT CURRENT_DATE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS survey_responses (
        id SERIAL PRIMARY KEY,
        customer_id INTEGER NOT NULL REFERENCES customers (id),
        food_quality VARCHAR(20) NOT NULL,
        service_speed VARCHAR(20) NOT NULL,
        staff_friendliness VARCHAR(20) NOT NULL,
        cleanliness VARCHAR(20) NOT NULL,
        value_for_money VARCHAR(20) NOT NULL,
        ambiance VARCHAR(20) NOT NULL,
        overall_rating NUMERIC(2, 1) NOT NULL CHECK (overall_rating BETWEEN 1.0 AND 5.0),
        comments TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS survey_responses_customer_id_idx ON survey_responses (customer_id)",
    "CREATE INDEX IF NOT EXISTS customers_location_idx ON customers (location)",
];

const INSERT_CUSTOMER: &str = r#"
    INSERT INTO customers (customer_name, location, visit_date)
    VALUES ($1, $2, $3)
    RETURNING id, customer_name, location, visit_date, created_at
"#;

const INSERT_RESPONSE: &str = r#"
    INSERT INTO survey_responses (
        customer_id, food_quality, service_speed, staff_friendliness,
        cleanliness, value_for_money, ambiance, overall_rating, comments
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8::float8::numeric(2, 1), $9)
    RETURNING id, customer_id, food_quality, service_speed, staff_friendliness,
        cleanliness, value_for_money, ambiance, overall_rating::float8 AS overall_rating,
        comments, created_at
"#;

const SELECT_CUSTOMERS: &str = r#"
    SELECT id, customer_name, location, visit_date, created_at
    FROM customers
    WHERE ($1::text IS NULL OR location = $1)
    ORDER BY id
"#;

const SELECT_RESPONSES: &str = r#"
    SELECT r.id, r.customer_id, c.customer_name, c.location, c.visit_date,
        r.food_quality, r.service_speed, r.staff_friendliness, r.cleanliness,
        r.value_for_money, r.ambiance, r.overall_rating::float8 AS overall_rating,
        r.comments, r.created_at
    FROM survey_responses r
    JOIN customers c ON c.id = r.customer_id
    WHERE ($1::text IS NULL OR c.location = $1)
    ORDER BY r.id
"#;

/// Create `customers` and `survey_responses` (and their indexes) if missing.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("survey tables ensured");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database if it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| {
        ConfigError::Invalid {
            key: "DATABASE_URL",
            message: e.to_string(),
        }
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::Invalid {
            key: "DATABASE_URL",
            message: "no database path".into(),
        })?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name.trim(), Some(query)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgSurveyStore {
    pool: PgPool,
}

impl PgSurveyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyStore for PgSurveyStore {
    async fn submit(&self, survey: &NewSurvey) -> Result<SubmittedSurvey, AppError> {
        let mut tx = self.pool.begin().await?;

        tracing::debug!(sql = %INSERT_CUSTOMER, "query (tx)");
        let customer: Customer = sqlx::query_as(INSERT_CUSTOMER)
            .bind(&survey.customer.customer_name)
            .bind(&survey.customer.location)
            .bind(survey.customer.visit_date)
            .fetch_one(&mut *tx)
            .await?;

        let r = &survey.response;
        tracing::debug!(sql = %INSERT_RESPONSE, customer_id = customer.id, "query (tx)");
        let response: SurveyResponse = sqlx::query_as(INSERT_RESPONSE)
            .bind(customer.id)
            .bind(&r.food_quality)
            .bind(&r.service_speed)
            .bind(&r.staff_friendliness)
            .bind(&r.cleanliness)
            .bind(&r.value_for_money)
            .bind(&r.ambiance)
            .bind(r.overall_rating)
            .bind(&r.comments)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SubmittedSurvey { customer, response })
    }

    async fn list_customers(&self, filter: &ListFilter) -> Result<Vec<Customer>, AppError> {
        tracing::debug!(sql = %SELECT_CUSTOMERS, filter = ?filter, "query");
        let rows = sqlx::query_as::<_, Customer>(SELECT_CUSTOMERS)
            .bind(filter.location.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_responses(
        &self,
        filter: &ListFilter,
    ) -> Result<Vec<SurveyResponseRecord>, AppError> {
        tracing::debug!(sql = %SELECT_RESPONSES, filter = ?filter, "query");
        let rows = sqlx::query_as::<_, SurveyResponseRecord>(SELECT_RESPONSES)
            .bind(filter.location.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
