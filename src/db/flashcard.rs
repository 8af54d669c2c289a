use color_eyre::Result;
use libsql::params;

use super::models::{CategoryRow, FlashcardDetailRow, FlashcardRow};
use super::Db;

impl Db {
    pub async fn categories(&self) -> Result<Vec<CategoryRow>> {
        let conn = self.db.connect()?;
        let mut rows = conn
            .query(
                r#"
                SELECT c.id, c.name, c.description,
                       (SELECT COUNT(*) FROM flashcards f WHERE f.category_id = c.id) AS flashcard_count
                FROM categories c
                ORDER BY c.id
                "#,
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(libsql::de::from_row::<CategoryRow>(&row)?);
        }
        Ok(categories)
    }

    /// All flashcards of a category, ordered by id. The stable ordering
    /// matters: the test engine derives option shuffles from this pool.
    pub async fn flashcards_by_category(&self, category_id: i32) -> Result<Vec<FlashcardRow>> {
        let conn = self.db.connect()?;
        let mut rows = conn
            .query(
                "SELECT id, question, answer, category_id FROM flashcards WHERE category_id = ? ORDER BY id",
                params![category_id],
            )
            .await?;

        let mut flashcards = Vec::new();
        while let Some(row) = rows.next().await? {
            flashcards.push(libsql::de::from_row::<FlashcardRow>(&row)?);
        }
        Ok(flashcards)
    }

    pub async fn category_name(&self, category_id: i32) -> Result<Option<String>> {
        let conn = self.db.connect()?;
        let row = conn
            .query(
                "SELECT name FROM categories WHERE id = ?",
                params![category_id],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    pub async fn get_flashcard(&self, id: i32) -> Result<Option<FlashcardDetailRow>> {
        let conn = self.db.connect()?;
        let row = conn
            .query(
                r#"
                SELECT f.id, f.question, f.answer, f.category_id, c.name AS category_name
                FROM flashcards f
                JOIN categories c ON c.id = f.category_id
                WHERE f.id = ?
                "#,
                params![id],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => Ok(Some(libsql::de::from_row::<FlashcardDetailRow>(&row)?)),
            None => Ok(None),
        }
    }
}
