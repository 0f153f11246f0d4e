use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{contains_pattern, ApplicationFilter, ApplicationRepository, PgStore};
use crate::error::Result;
use crate::models::application::{Application, ApplicationHistory, ApplicationStatus};

const APPLICATION_COLUMNS: &str = "id, first_name, last_name, email, phone, birth_date, city, \
    gender, experience, selected_vacatures, availability, vacature_id, status, notes, source, \
    created_at, updated_at";

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ApplicationFilter) {
    qb.push(" WHERE TRUE");
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR last_name ILIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR email ILIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }
}

#[async_trait]
impl ApplicationRepository for PgStore {
    async fn insert_application(&self, a: &Application) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (
                id, first_name, last_name, email, phone,
                birth_date, city, gender, experience, selected_vacatures,
                availability, vacature_id, status, notes, source,
                created_at, updated_at
            ) VALUES (
                $1,$2,$3,$4,$5,
                $6,$7,$8,$9,$10,
                $11,$12,$13,$14,$15,
                $16,$17
            )
            "#,
        )
        .bind(a.id)
        .bind(&a.first_name)
        .bind(&a.last_name)
        .bind(&a.email)
        .bind(&a.phone)
        .bind(a.birth_date)
        .bind(&a.city)
        .bind(&a.gender)
        .bind(&a.experience)
        .bind(&a.selected_vacatures)
        .bind(&a.availability)
        .bind(a.vacature_id)
        .bind(a.status)
        .bind(&a.notes)
        .bind(&a.source)
        .bind(a.created_at)
        .bind(a.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<(Vec<Application>, i64)> {
        let mut items_qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM applications", APPLICATION_COLUMNS));
        push_filters(&mut items_qb, filter);
        items_qb
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);
        let items = items_qb
            .build_query_as::<Application>()
            .fetch_all(&self.pool)
            .await?;

        let mut total_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM applications");
        push_filters(&mut total_qb, filter);
        let total = total_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn save_application(
        &self,
        a: &Application,
        history: &[ApplicationHistory],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE applications
            SET status = $2, notes = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(a.id)
        .bind(a.status)
        .bind(&a.notes)
        .bind(a.updated_at)
        .execute(&mut *tx)
        .await?;

        for entry in history {
            sqlx::query(
                r#"
                INSERT INTO application_history (
                    id, application_id, type, old_status, new_status, note, user_name, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(entry.id)
            .bind(entry.application_id)
            .bind(entry.kind)
            .bind(entry.old_status)
            .bind(entry.new_status)
            .bind(&entry.note)
            .bind(&entry.user_name)
            .bind(entry.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn application_history(&self, application_id: Uuid) -> Result<Vec<ApplicationHistory>> {
        let entries = sqlx::query_as::<_, ApplicationHistory>(
            r#"
            SELECT id, application_id, type, old_status, new_status, note, user_name, created_at
            FROM application_history
            WHERE application_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn application_status_counts(&self) -> Result<Vec<(ApplicationStatus, i64)>> {
        let rows = sqlx::query_as::<_, (ApplicationStatus, i64)>(
            "SELECT status, COUNT(*) FROM applications GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn applications_per_day(&self, since: DateTime<Utc>) -> Result<Vec<(NaiveDate, i64)>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*)
            FROM applications
            WHERE created_at >= $1
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
