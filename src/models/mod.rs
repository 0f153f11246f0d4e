pub mod application;
pub mod category;
pub mod user;
pub mod vacature;
