use std::collections::HashSet;

use sqlx::PgPool;

use crate::dto::scores::{JudgeScoresResponse, SaveScoresResponse};
use crate::error::Result;
use crate::models::{Judge, JudgeComment, Score};
use crate::repository::settings::SettingsRepository;
use crate::services::score_input::{CommentEntry, ScoreEntry, ScoreSubmission};

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_judge(&self, judge_id: i64) -> Result<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(
            r#"
            SELECT score_id, judge_id, contestant_id, criteria_id, score, created_at, updated_at
            FROM scores
            WHERE judge_id = $1
            "#,
        )
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    pub async fn comments_for_judge(&self, judge_id: i64) -> Result<Vec<JudgeComment>> {
        let comments = sqlx::query_as::<_, JudgeComment>(
            r#"
            SELECT judge_id, contestant_id, comments, updated_at
            FROM judge_comments
            WHERE judge_id = $1
            "#,
        )
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Scores of every judge of the sub-event, or of one judge when given
    pub async fn list_for_sub_event(
        &self,
        sub_event_id: i64,
        judge_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(
            r#"
            SELECT s.score_id, s.judge_id, s.contestant_id, s.criteria_id, s.score,
                   s.created_at, s.updated_at
            FROM scores s
            JOIN judges j ON j.judge_id = s.judge_id
            WHERE j.sub_event_id = $1
              AND ($2::BIGINT IS NULL OR s.judge_id = $2)
            "#,
        )
        .bind(sub_event_id)
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Create or update the row for (judge, contestant, criterion)
    pub async fn upsert(&self, judge_id: i64, entry: &ScoreEntry) -> Result<Score> {
        let score = sqlx::query_as::<_, Score>(
            r#"
            INSERT INTO scores (judge_id, contestant_id, criteria_id, score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (judge_id, contestant_id, criteria_id)
            DO UPDATE SET score = EXCLUDED.score, updated_at = NOW()
            RETURNING score_id, judge_id, contestant_id, criteria_id, score, created_at, updated_at
            "#,
        )
        .bind(judge_id)
        .bind(entry.contestant_id)
        .bind(entry.criteria_id)
        .bind(entry.score)
        .fetch_one(self.pool)
        .await?;

        Ok(score)
    }

    /// Set the judge's comment for a contestant; an empty string clears it
    pub async fn upsert_comment(&self, judge_id: i64, entry: &CommentEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO judge_comments (judge_id, contestant_id, comments)
            VALUES ($1, $2, $3)
            ON CONFLICT (judge_id, contestant_id)
            DO UPDATE SET comments = EXCLUDED.comments, updated_at = NOW()
            "#,
        )
        .bind(judge_id)
        .bind(entry.contestant_id)
        .bind(&entry.comments)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The judge's stored sheet grouped by contestant
    pub async fn sheet_for_judge(&self, judge_id: i64) -> Result<JudgeScoresResponse> {
        let scores = self.list_for_judge(judge_id).await?;
        let comments = self.comments_for_judge(judge_id).await?;

        Ok(JudgeScoresResponse::from_rows(judge_id, scores, comments))
    }

    /// Upsert every entry of `submission` naming a contestant and criterion
    /// of the judge's sub-event. Everything else is reported as item errors.
    pub async fn save_sheet(
        &self,
        judge: &Judge,
        mut submission: ScoreSubmission,
    ) -> Result<SaveScoresResponse> {
        let settings = SettingsRepository::new(self.pool);

        let contestants: HashSet<i64> = settings
            .contestants(judge.sub_event_id)
            .await?
            .iter()
            .map(|c| c.contestant_id)
            .collect();
        let criteria: HashSet<i64> = settings
            .criteria(judge.sub_event_id)
            .await?
            .iter()
            .map(|c| c.criteria_id)
            .collect();

        submission.retain_known(&contestants, &criteria);

        for entry in &submission.scores {
            self.upsert(judge.judge_id, entry).await?;
        }
        for entry in &submission.comments {
            self.upsert_comment(judge.judge_id, entry).await?;
        }

        Ok(SaveScoresResponse::new(
            submission.scores.len(),
            submission.comments.len(),
            submission.errors,
        ))
    }
}
