use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{contains_pattern, PgStore, VacatureCounts, VacatureFilter, VacatureRepository};
use crate::error::Result;
use crate::models::vacature::Vacature;

const VACATURE_COLUMNS: &str = "id, title, subtitle, slug, vacature_number, description, \
    long_description, seo_content, requirements, benefits, category_id, company_name, image_key, \
    employment_type, city, location, salary, is_active, archived, published_at, created_at, \
    updated_at, created_by_id, last_updated_by_id";

#[async_trait]
impl VacatureRepository for PgStore {
    async fn insert_vacature(&self, v: &Vacature) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vacatures (
                id, title, subtitle, slug, vacature_number,
                description, long_description, seo_content, requirements, benefits,
                category_id, company_name, image_key, employment_type, city,
                location, salary, is_active, archived, published_at,
                created_at, updated_at, created_by_id, last_updated_by_id
            ) VALUES (
                $1,$2,$3,$4,$5,
                $6,$7,$8,$9,$10,
                $11,$12,$13,$14,$15,
                $16,$17,$18,$19,$20,
                $21,$22,$23,$24
            )
            "#,
        )
        .bind(v.id)
        .bind(&v.title)
        .bind(&v.subtitle)
        .bind(&v.slug)
        .bind(v.vacature_number)
        .bind(&v.description)
        .bind(&v.long_description)
        .bind(&v.seo_content)
        .bind(&v.requirements)
        .bind(&v.benefits)
        .bind(v.category_id)
        .bind(&v.company_name)
        .bind(&v.image_key)
        .bind(&v.employment_type)
        .bind(&v.city)
        .bind(&v.location)
        .bind(v.salary)
        .bind(v.is_active)
        .bind(v.archived)
        .bind(v.published_at)
        .bind(v.created_at)
        .bind(v.updated_at)
        .bind(v.created_by_id)
        .bind(v.last_updated_by_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_vacature(&self, v: &Vacature) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE vacatures
            SET
                title = $2,
                subtitle = $3,
                slug = $4,
                vacature_number = $5,
                description = $6,
                long_description = $7,
                seo_content = $8,
                requirements = $9,
                benefits = $10,
                category_id = $11,
                company_name = $12,
                image_key = $13,
                employment_type = $14,
                city = $15,
                location = $16,
                salary = $17,
                is_active = $18,
                archived = $19,
                published_at = $20,
                updated_at = $21,
                last_updated_by_id = $22
            WHERE id = $1
            "#,
        )
        .bind(v.id)
        .bind(&v.title)
        .bind(&v.subtitle)
        .bind(&v.slug)
        .bind(v.vacature_number)
        .bind(&v.description)
        .bind(&v.long_description)
        .bind(&v.seo_content)
        .bind(&v.requirements)
        .bind(&v.benefits)
        .bind(v.category_id)
        .bind(&v.company_name)
        .bind(&v.image_key)
        .bind(&v.employment_type)
        .bind(&v.city)
        .bind(&v.location)
        .bind(v.salary)
        .bind(v.is_active)
        .bind(v.archived)
        .bind(v.published_at)
        .bind(v.updated_at)
        .bind(v.last_updated_by_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_vacature(&self, id: Uuid) -> Result<Option<Vacature>> {
        let vacature = sqlx::query_as::<_, Vacature>(&format!(
            "SELECT {} FROM vacatures WHERE id = $1",
            VACATURE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vacature)
    }

    async fn find_vacature_by_slug(&self, slug: &str) -> Result<Option<Vacature>> {
        let vacature = sqlx::query_as::<_, Vacature>(&format!(
            "SELECT {} FROM vacatures WHERE slug = $1",
            VACATURE_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vacature)
    }

    async fn find_vacature_by_number(&self, number: i32) -> Result<Option<Vacature>> {
        let vacature = sqlx::query_as::<_, Vacature>(&format!(
            "SELECT {} FROM vacatures WHERE vacature_number = $1",
            VACATURE_COLUMNS
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vacature)
    }

    async fn list_vacatures(&self, filter: &VacatureFilter) -> Result<Vec<Vacature>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM vacatures WHERE TRUE", VACATURE_COLUMNS));

        if let Some(active) = filter.active {
            qb.push(" AND is_active = ").push_bind(active);
        }
        if let Some(archived) = filter.archived {
            qb.push(" AND archived = ").push_bind(archived);
        }
        if let Some(category_id) = filter.category_id {
            qb.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(city) = &filter.city {
            qb.push(" AND LOWER(city) = LOWER(").push_bind(city.clone()).push(")");
        }
        if let Some(search) = &filter.search {
            qb.push(" AND title ILIKE ")
                .push_bind(contains_pattern(search))
                .push(r" ESCAPE '\'");
        }
        qb.push(" ORDER BY COALESCE(published_at, created_at) DESC");

        let items = qb
            .build_query_as::<Vacature>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn delete_vacature(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM vacatures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_vacatures_in_category(&self, category_id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vacatures WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn vacature_counts(&self) -> Result<VacatureCounts> {
        let (total, active, archived) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE is_active AND NOT archived),
                COUNT(*) FILTER (WHERE archived)
            FROM vacatures
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(VacatureCounts {
            total,
            active,
            archived,
        })
    }
}
