use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vacatures: i64,
    pub active_vacatures: i64,
    pub archived_vacatures: i64,
    pub total_categories: i64,
    pub total_applications: i64,
    pub new_applications: i64,
    /// Keyed by status name; every status is present.
    pub applications_by_status: BTreeMap<String, i64>,
    /// Oldest day first, days without applications included as zero.
    pub applications_per_day: Vec<DailyCount>,
}
