pub mod config;
pub mod database;
pub mod doc;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::{
    memory::MemoryStore, ApplicationRepository, CategoryRepository, UserRepository,
    VacatureRepository,
};
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    category_service::CategoryService, dashboard_service::DashboardService,
    user_service::UserService, vacature_service::VacatureService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub category_service: CategoryService,
    pub vacature_service: VacatureService,
    pub application_service: ApplicationService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Wires every service onto one store implementing all repository ports.
    pub fn new<S>(config: Config, store: Arc<S>) -> Self
    where
        S: UserRepository + CategoryRepository + VacatureRepository + ApplicationRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let categories: Arc<dyn CategoryRepository> = store.clone();
        let vacatures: Arc<dyn VacatureRepository> = store.clone();
        let applications: Arc<dyn ApplicationRepository> = store;

        let auth_service =
            AuthService::new(users.clone(), &config.jwt_secret, config.session_ttl_hours);
        let user_service = UserService::new(users);
        let category_service = CategoryService::new(categories.clone(), vacatures.clone());
        let vacature_service = VacatureService::new(vacatures.clone(), categories.clone());
        let application_service = ApplicationService::new(applications.clone(), vacatures.clone());
        let dashboard_service = DashboardService::new(vacatures, categories, applications);

        Self {
            config: Arc::new(config),
            auth_service,
            user_service,
            category_service,
            vacature_service,
            application_service,
            dashboard_service,
        }
    }

    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }
}
