pub mod access;
pub mod application_service;
pub mod auth_service;
pub mod category_service;
pub mod dashboard_service;
pub mod user_service;
pub mod vacature_service;
