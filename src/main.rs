use axum::{
    routing::{get, post},
    Router,
};
use invoice_admin_rust::{
    api, create_pool, AppConfig, CredentialsVerifier, InvoiceActions, PgCredentialsVerifier,
    PgInvoiceStore, RouteCache,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database.url).await?;
    info!("Database pool created");

    // 组装动作服务与凭证校验器
    let store = Arc::new(PgInvoiceStore::new(pool.clone()));
    let cache = Arc::new(RouteCache::new());
    let actions = Arc::new(InvoiceActions::new(store, cache));
    let verifier: Arc<dyn CredentialsVerifier> = Arc::new(PgCredentialsVerifier::new(pool));

    let state = api::AppState { actions, verifier };

    // 构建路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/invoices", post(api::create_invoice))
        .route("/api/invoices/:id", post(api::update_invoice))
        .route("/api/invoices/:id/delete", post(api::delete_invoice))
        .route("/api/login", post(api::authenticate))
        .layer(ServiceBuilder::new())
        .with_state(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/invoices            - Create invoice");
    info!("  POST /api/invoices/:id        - Update invoice");
    info!("  POST /api/invoices/:id/delete - Delete invoice");
    info!("  POST /api/login               - Credentials sign-in");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
