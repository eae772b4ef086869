mod activity_log;
mod auth;
mod biaya_lain;
mod modal;
mod report;
mod saldo;
mod setor;
mod tarik_kredit;
mod tarik_tunai;
mod transfer;
mod transfer_debit;
mod user;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::state::AppState;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::activity_log::activity_log_routes;
pub use self::auth::auth_routes;
pub use self::biaya_lain::biaya_lain_routes;
pub use self::modal::modal_routes;
pub use self::report::report_routes;
pub use self::saldo::saldo_routes;
pub use self::setor::setor_routes;
pub use self::tarik_kredit::tarik_kredit_routes;
pub use self::tarik_tunai::tarik_tunai_routes;
pub use self::transfer::transfer_routes;
pub use self::transfer_debit::transfer_debit_routes;
pub use self::user::users_routes;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_user_handler,
        auth::get_me_handler,
        user::get_users,
        user::create_user,
        user::update_user,
        user::delete_user,
        saldo::get_saldos,
        saldo::get_total,
        saldo::get_saldo_user,
        saldo::recompute_saldo,
        modal::get_modals,
        modal::get_history,
        modal::create_modal,
        modal::update_modal,
        transfer::get_transfers,
        transfer::get_favorites,
        transfer::create_transfer,
        transfer::update_transfer,
        transfer::update_transfer_status,
        setor::get_setors,
        setor::create_setor,
        setor::approve_setor,
        transfer_debit::get_transfer_debits,
        transfer_debit::create_transfer_debit,
        tarik_tunai::get_tarik_tunai,
        tarik_tunai::create_tarik_tunai,
        tarik_kredit::get_tarik_kredit,
        tarik_kredit::create_tarik_kredit,
        biaya_lain::get_biaya_lain,
        biaya_lain::create_biaya_lain,
        report::get_summary,
        report::get_dashboard,
        report::get_chart,
        report::get_transfer_chart,
        report::get_transfer_debit_chart,
        activity_log::get_activity_logs
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and current user"),
        (name = "User", description = "Owner-only account management"),
        (name = "Saldo", description = "Authoritative cashier balances"),
        (name = "Modal", description = "Float deposits"),
        (name = "Transfer", description = "Outgoing transfers for customers"),
        (name = "Setor Admin", description = "Cash hand-offs to the owner"),
        (name = "Transfer Debit", description = "Debit card transfer fees"),
        (name = "Tarik Tunai", description = "Cash withdrawals"),
        (name = "Tarik Kredit", description = "Credit-card cash advances"),
        (name = "Biaya Lain", description = "Miscellaneous fees"),
        (name = "Laporan", description = "Reports, dashboard and charts"),
        (name = "Activity Log", description = "Audit trail")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let mut router = OpenApiRouter::with_openapi(ApiDoc::openapi());

        router = router.merge(auth_routes(shared_state.clone()));
        router = router.merge(users_routes(shared_state.clone()));
        router = router.merge(saldo_routes(shared_state.clone()));
        router = router.merge(modal_routes(shared_state.clone()));
        router = router.merge(transfer_routes(shared_state.clone()));
        router = router.merge(setor_routes(shared_state.clone()));
        router = router.merge(transfer_debit_routes(shared_state.clone()));
        router = router.merge(tarik_tunai_routes(shared_state.clone()));
        router = router.merge(tarik_kredit_routes(shared_state.clone()));
        router = router.merge(biaya_lain_routes(shared_state.clone()));
        router = router.merge(report_routes(shared_state.clone()));
        router = router.merge(activity_log_routes(shared_state));

        let router = router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(TraceLayer::new_for_http());

        let (router, api) = router.split_for_parts();

        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, metric_port: u16, app_state: AppState) -> Result<()> {
        let shared_state = Arc::new(app_state);

        let app = Self::build(shared_state.clone());

        let metrics_app = Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state);

        let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("Failed to bind API listener on port {port}"))?;
        let metrics_listener = TcpListener::bind(format!("0.0.0.0:{metric_port}"))
            .await
            .with_context(|| format!("Failed to bind metrics listener on port {metric_port}"))?;

        info!("Server running on http://{}", listener.local_addr()?);
        info!("Swagger UI: http://localhost:{port}/swagger-ui");
        info!("Metrics on http://{}/metrics", metrics_listener.local_addr()?);

        let api_server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        );
        let metrics_server = axum::serve(metrics_listener, metrics_app);

        tokio::try_join!(
            async { api_server.await.context("API server failed") },
            async { metrics_server.await.context("Metrics server failed") },
        )?;

        Ok(())
    }
}
