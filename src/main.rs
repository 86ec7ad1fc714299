use anyhow::Result;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use restaurant_orderservice::{
    app_state::AppState,
    bootstrap, config,
    context::RequireIdentity,
    db,
    orders::OrderService,
    repositories::pg::PgRepositories,
    routes,
};

/// Migrations embedded into the binary which helps with streamlining image building process
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();
    bootstrap::init_env();

    let config = config::load()?;

    tracing::info!("Running migrations...");
    let migrations_count = db::run_migrations_blocking(MIGRATIONS, &config.database.url).await?;
    tracing::info!("Run {} new migrations successfully", migrations_count);

    let pool = db::create_pool(&config.database).await?;
    let repositories = PgRepositories::new(pool);
    let orders = OrderService::new(
        repositories.orders,
        repositories.cart_items,
        repositories.selected_cart_items,
        repositories.merchants,
        RequireIdentity,
    );

    tracing::info!("Bootstrapping...");
    let app = routes::app(AppState::new(orders));
    bootstrap::serve("OrderService", app, &config.server).await
}
