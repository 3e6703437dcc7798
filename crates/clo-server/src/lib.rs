pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router for the project at `root`.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    router(state::AppState::new(root))
}

/// Build the Router over an already-constructed state.
pub fn router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Form
        .route("/", get(routes::index::index))
        // Goal mapping
        .route("/api/mapping", get(routes::goals::get_mapping))
        .route("/api/get_peos/{ieg}", get(routes::goals::get_peos))
        .route("/api/get_plos/{peo}", get(routes::goals::get_plos))
        // Lookups
        .route("/api/profiles", get(routes::lookup::list_profiles))
        .route("/api/outcomes", get(routes::lookup::list_outcomes))
        .route("/api/get_blooms/{outcome}", get(routes::lookup::get_blooms))
        .route(
            "/api/get_verbs/{outcome}/{level}",
            get(routes::lookup::get_verbs),
        )
        .route(
            "/api/get_meta/{outcome}/{level}",
            get(routes::lookup::get_meta),
        )
        // Generation
        .route("/generate", post(routes::generate::generate))
        // History
        .route("/api/history", get(routes::history::list_history))
        .route(
            "/api/history/{id}",
            put(routes::history::update_record).delete(routes::history::delete_record),
        )
        .route("/reset_table", get(routes::history::reset_table))
        // Export
        .route("/download", get(routes::download::download))
        .route("/download_rubric", get(routes::download::download_rubric))
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the CLO composer server.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("CLO composer listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
