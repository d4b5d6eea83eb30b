use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::settings::SaveSettingsRequest;
use crate::error::{Result, StorageError};
use crate::models::{Contestant, Criteria, Judge};
use crate::services::settings_plan::{CurrentSettings, SettingsPlan};

/// Contestants, judges and criteria of one sub-event, each in `order`
#[derive(Debug, Clone, Default)]
pub struct SubEventSettings {
    pub contestants: Vec<Contestant>,
    pub judges: Vec<Judge>,
    pub criteria: Vec<Criteria>,
}

/// Repository for the per-sub-event judging setup
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn contestants(&self, sub_event_id: i64) -> Result<Vec<Contestant>> {
        let rows = sqlx::query_as::<_, Contestant>(
            r#"
            SELECT contestant_id, sub_event_id, name, sort_order
            FROM contestants
            WHERE sub_event_id = $1
            ORDER BY sort_order, contestant_id
            "#,
        )
        .bind(sub_event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn judges(&self, sub_event_id: i64) -> Result<Vec<Judge>> {
        let rows = sqlx::query_as::<_, Judge>(
            r#"
            SELECT judge_id, sub_event_id, name, judge_type, code, sort_order
            FROM judges
            WHERE sub_event_id = $1
            ORDER BY sort_order, judge_id
            "#,
        )
        .bind(sub_event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn criteria(&self, sub_event_id: i64) -> Result<Vec<Criteria>> {
        let rows = sqlx::query_as::<_, Criteria>(
            r#"
            SELECT criteria_id, sub_event_id, name, points, sort_order
            FROM criteria
            WHERE sub_event_id = $1
            ORDER BY sort_order, criteria_id
            "#,
        )
        .bind(sub_event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn load(&self, sub_event_id: i64) -> Result<SubEventSettings> {
        Ok(SubEventSettings {
            contestants: self.contestants(sub_event_id).await?,
            judges: self.judges(sub_event_id).await?,
            criteria: self.criteria(sub_event_id).await?,
        })
    }

    pub async fn find_judge(&self, judge_id: i64) -> Result<Judge> {
        sqlx::query_as::<_, Judge>(
            r#"
            SELECT judge_id, sub_event_id, name, judge_type, code, sort_order
            FROM judges
            WHERE judge_id = $1
            "#,
        )
        .bind(judge_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_judge_by_code(&self, code: &str) -> Result<Judge> {
        sqlx::query_as::<_, Judge>(
            r#"
            SELECT judge_id, sub_event_id, name, judge_type, code, sort_order
            FROM judges
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Reconcile the sub-event's rows with `request` in a single transaction.
    ///
    /// The sub-event row is locked first so concurrent saves of the same
    /// sub-event run one after the other. Any failure rolls everything back.
    pub async fn save(
        &self,
        sub_event_id: i64,
        request: &SaveSettingsRequest,
    ) -> Result<SubEventSettings> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> = sqlx::query_scalar(
            "SELECT sub_event_id FROM sub_events WHERE sub_event_id = $1 FOR UPDATE",
        )
        .bind(sub_event_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Err(StorageError::NotFound);
        }

        let contestants: Vec<Contestant> = sqlx::query_as(
            r#"
            SELECT contestant_id, sub_event_id, name, sort_order
            FROM contestants WHERE sub_event_id = $1
            "#,
        )
        .bind(sub_event_id)
        .fetch_all(&mut *tx)
        .await?;

        let judges: Vec<Judge> = sqlx::query_as(
            r#"
            SELECT judge_id, sub_event_id, name, judge_type, code, sort_order
            FROM judges WHERE sub_event_id = $1
            "#,
        )
        .bind(sub_event_id)
        .fetch_all(&mut *tx)
        .await?;

        let criteria: Vec<Criteria> = sqlx::query_as(
            r#"
            SELECT criteria_id, sub_event_id, name, points, sort_order
            FROM criteria WHERE sub_event_id = $1
            "#,
        )
        .bind(sub_event_id)
        .fetch_all(&mut *tx)
        .await?;

        let foreign_codes: Vec<String> =
            sqlx::query_scalar("SELECT code FROM judges WHERE sub_event_id <> $1")
                .bind(sub_event_id)
                .fetch_all(&mut *tx)
                .await?;

        let current = CurrentSettings {
            contestants: &contestants,
            judges: &judges,
            criteria: &criteria,
        };
        let mut rng = StdRng::from_entropy();
        let plan = SettingsPlan::build(
            request,
            current,
            foreign_codes.into_iter().collect::<HashSet<_>>(),
            &mut rng,
        )?;

        apply_plan(&mut tx, sub_event_id, &plan).await?;

        tx.commit()
            .await
            .map_err(|e| StorageError::from(e).on_constraint("Judge code already in use"))?;

        tracing::info!(
            sub_event_id,
            contestants = plan.contestants.len(),
            judges = plan.judges.len(),
            criteria = plan.criteria.len(),
            "Sub-event settings saved"
        );

        self.load(sub_event_id).await
    }
}

async fn apply_plan(
    tx: &mut Transaction<'_, Postgres>,
    sub_event_id: i64,
    plan: &SettingsPlan,
) -> Result<()> {
    for (table, column, ids) in [
        ("contestants", "contestant_id", &plan.delete_contestants),
        ("judges", "judge_id", &plan.delete_judges),
        ("criteria", "criteria_id", &plan.delete_criteria),
    ] {
        if ids.is_empty() {
            continue;
        }
        sqlx::query(&format!(
            "DELETE FROM {} WHERE sub_event_id = $1 AND {} = ANY($2)",
            table, column
        ))
        .bind(sub_event_id)
        .bind(ids)
        .execute(&mut **tx)
        .await?;
    }

    for row in &plan.contestants {
        match row.existing_id {
            Some(id) => {
                sqlx::query(
                    "UPDATE contestants SET name = $2, sort_order = $3 WHERE contestant_id = $1",
                )
                .bind(id)
                .bind(&row.fields.name)
                .bind(row.order)
                .execute(&mut **tx)
                .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO contestants (sub_event_id, name, sort_order) VALUES ($1, $2, $3)",
                )
                .bind(sub_event_id)
                .bind(&row.fields.name)
                .bind(row.order)
                .execute(&mut **tx)
                .await?;
            }
        }
    }

    for row in &plan.judges {
        match row.existing_id {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE judges
                    SET name = $2, judge_type = $3, code = $4, sort_order = $5
                    WHERE judge_id = $1
                    "#,
                )
                .bind(id)
                .bind(&row.fields.name)
                .bind(row.fields.judge_type.as_str())
                .bind(&row.fields.code)
                .bind(row.order)
                .execute(&mut **tx)
                .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO judges (sub_event_id, name, judge_type, code, sort_order)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(sub_event_id)
                .bind(&row.fields.name)
                .bind(row.fields.judge_type.as_str())
                .bind(&row.fields.code)
                .bind(row.order)
                .execute(&mut **tx)
                .await?;
            }
        }
    }

    for row in &plan.criteria {
        match row.existing_id {
            Some(id) => {
                sqlx::query(
                    "UPDATE criteria SET name = $2, points = $3, sort_order = $4 WHERE criteria_id = $1",
                )
                .bind(id)
                .bind(&row.fields.name)
                .bind(row.fields.points)
                .bind(row.order)
                .execute(&mut **tx)
                .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO criteria (sub_event_id, name, points, sort_order)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(sub_event_id)
                .bind(&row.fields.name)
                .bind(row.fields.points)
                .bind(row.order)
                .execute(&mut **tx)
                .await?;
            }
        }
    }

    Ok(())
}
