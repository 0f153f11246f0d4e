use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::database::{ApplicationRepository, CategoryRepository, VacatureRepository};
use crate::dto::dashboard_dto::{DailyCount, DashboardStats};
use crate::error::Result;
use crate::models::application::ApplicationStatus;

/// Number of days in the application series, today included.
pub const DASHBOARD_DAYS: i64 = 7;

#[derive(Clone)]
pub struct DashboardService {
    vacatures: Arc<dyn VacatureRepository>,
    categories: Arc<dyn CategoryRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl DashboardService {
    pub fn new(
        vacatures: Arc<dyn VacatureRepository>,
        categories: Arc<dyn CategoryRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            vacatures,
            categories,
            applications,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.stats_at(Utc::now()).await
    }

    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let counts = self.vacatures.vacature_counts().await?;
        let total_categories = self.categories.count_categories().await?;

        let mut by_status: BTreeMap<String, i64> = ApplicationStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for (status, count) in self.applications.application_status_counts().await? {
            by_status.insert(status.as_str().to_string(), count);
        }
        let total_applications: i64 = by_status.values().sum();
        let new_applications = by_status
            .get(ApplicationStatus::New.as_str())
            .copied()
            .unwrap_or(0);

        let today = now.date_naive();
        let first_day = today - Duration::days(DASHBOARD_DAYS - 1);
        let since = Utc.from_utc_datetime(&first_day.and_time(NaiveTime::MIN));
        let per_day = self.applications.applications_per_day(since).await?;

        Ok(DashboardStats {
            total_vacatures: counts.total,
            active_vacatures: counts.active,
            archived_vacatures: counts.archived,
            total_categories,
            total_applications,
            new_applications,
            applications_by_status: by_status,
            applications_per_day: fill_days(first_day, today, &per_day),
        })
    }
}

fn fill_days(first: NaiveDate, last: NaiveDate, counts: &[(NaiveDate, i64)]) -> Vec<DailyCount> {
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| DailyCount {
            date,
            count: counts
                .iter()
                .find(|(d, _)| *d == date)
                .map(|(_, c)| *c)
                .unwrap_or(0),
        })
        .collect()
}
