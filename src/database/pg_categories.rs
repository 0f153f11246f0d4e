use async_trait::async_trait;
use uuid::Uuid;

use super::{CategoryRepository, PgStore};
use crate::error::Result;
use crate::models::category::Category;

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, color, icon, is_active, created_at, updated_at";

#[async_trait]
impl CategoryRepository for PgStore {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, description, color, icon, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.color)
        .bind(&category.icon)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, description = $4, color = $5, icon = $6,
                is_active = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.color)
        .bind(&category.icon)
        .bind(category.is_active)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_categories_named(&self, name: &str, slug: &str) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE LOWER(name) = LOWER($1) OR slug = $2",
            CATEGORY_COLUMNS
        ))
        .bind(name)
        .bind(slug)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_categories(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
