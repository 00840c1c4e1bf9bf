use sea_orm::Database;
use tracing::info;

use benefix_hr::config::HrConfig;
use benefix_hr::router::build_router;
use benefix_hr::state::AppState;

#[tokio::main]
async fn main() {
    benefix_core::tracing::init_tracing();

    let config = HrConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        import_default_password: config.import_default_password,
        import_max_rows: config.import_max_rows,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.hr_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("hr service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
