pub mod application_dto;
pub mod category_dto;
pub mod dashboard_dto;
pub mod user_dto;
pub mod vacature_dto;
