use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vacature_backend::{
    config::{Config, Environment},
    database::{
        pool::{create_pool, run_migrations},
        PgStore,
    },
    routes, AppState,
};

#[derive(Debug, Parser)]
#[command(name = "vacature-backend", version, about = "Job board API and back office")]
struct Cli {
    /// Run against the in-process store instead of PostgreSQL.
    #[arg(long)]
    in_memory: bool,

    /// Apply pending migrations and exit.
    #[arg(long, conflicts_with = "in_memory")]
    migrate_only: bool,

    /// Create a SUPER_ADMIN with this email if none exists yet. The password
    /// is read from BOOTSTRAP_ADMIN_PASSWORD.
    #[arg(long, value_name = "EMAIL")]
    bootstrap_admin: Option<String>,

    #[arg(long, env = "BOOTSTRAP_ADMIN_PASSWORD", hide_env_values = true)]
    bootstrap_admin_password: Option<String>,
}

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match environment {
        Environment::Production => builder.json().init(),
        Environment::Development => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.environment);

    let state = if cli.in_memory {
        info!("using in-memory store; data is lost on shutdown");
        AppState::in_memory(config.clone())
    } else {
        let pool = create_pool(config.require_database_url()?).await?;
        run_migrations(&pool).await?;
        if cli.migrate_only {
            info!("migrations applied");
            return Ok(());
        }
        AppState::new(config.clone(), Arc::new(PgStore::new(pool)))
    };

    if let Some(email) = cli.bootstrap_admin.as_deref() {
        let password = cli.bootstrap_admin_password.as_deref().ok_or_else(|| {
            anyhow::anyhow!("--bootstrap-admin requires BOOTSTRAP_ADMIN_PASSWORD")
        })?;
        let created = state
            .user_service
            .bootstrap_super_admin(email, "Super Admin", password)
            .await?;
        if created {
            info!(email = %email, "bootstrap super admin created");
        } else {
            info!(email = %email, "bootstrap super admin already present");
        }
    }

    let app = routes::app(state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
