use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(custom(function = "crate::utils::validation::validate_not_blank"))]
    #[validate(length(max = 100))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 32))]
    pub color: Option<String>,
    #[validate(length(max = 64))]
    pub icon: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
