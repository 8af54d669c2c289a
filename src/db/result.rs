use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::models::TestResultRow;
use super::Db;
use crate::names;

impl Db {
    /// Append a completed test to the user's history. Results are
    /// immutable once created.
    pub async fn insert_test_result(
        &self,
        user_id: i32,
        category_id: i32,
        total_questions: i32,
        correct_answers: i32,
    ) -> Result<i32> {
        let conn = self.db.connect()?;
        let result_id = conn
            .query(
                r#"
                INSERT INTO test_results (user_id, category_id, total_questions, correct_answers)
                VALUES (?, ?, ?, ?)
                RETURNING id
                "#,
                params![user_id, category_id, total_questions, correct_answers],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get test result id")?
            .get::<i32>(0)?;

        tracing::info!(
            "test result recorded: user_id={user_id}, category_id={category_id}, score={correct_answers}/{total_questions}"
        );
        Ok(result_id)
    }

    /// The user's most recent results, newest first, capped at
    /// [`names::HISTORY_LIMIT`]. Category names fall back to "Unknown"
    /// when the category row is gone.
    pub async fn test_history(&self, user_id: i32) -> Result<Vec<TestResultRow>> {
        let conn = self.db.connect()?;
        let mut rows = conn
            .query(
                r#"
                SELECT t.id,
                       COALESCE(c.name, ?) AS category_name,
                       t.total_questions,
                       t.correct_answers,
                       t.completed_at
                FROM test_results t
                LEFT JOIN categories c ON c.id = t.category_id
                WHERE t.user_id = ?
                ORDER BY t.completed_at DESC, t.id DESC
                LIMIT ?
                "#,
                params![names::UNKNOWN_CATEGORY_NAME, user_id, names::HISTORY_LIMIT],
            )
            .await?;

        let mut history = Vec::new();
        while let Some(row) = rows.next().await? {
            history.push(libsql::de::from_row::<TestResultRow>(&row)?);
        }
        Ok(history)
    }
}
