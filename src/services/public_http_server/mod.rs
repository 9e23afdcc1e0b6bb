use {
    crate::state::AppState,
    axum::{
        http,
        routing::{get, post},
        Router,
    },
    std::{
        net::{IpAddr, SocketAddr},
        sync::Arc,
    },
    tokio::net::TcpListener,
    tower::ServiceBuilder,
    tower_http::{
        cors::{Any, CorsLayer},
        request_id::MakeRequestUuid,
        trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
        ServiceBuilderExt,
    },
    tracing::{info, Level},
};

pub const SWEEP_ENDPOINT: &str = "/v1/sweep";

pub mod handlers;

pub async fn start(
    bind_ip: IpAddr,
    port: u16,
    state: Arc<AppState>,
) -> Result<(), std::io::Error> {
    let global_middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(true),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(true),
                ),
        )
        .propagate_x_request_id()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]),
        );

    let app = Router::new()
        .route("/health", get(handlers::health::handler))
        .route(SWEEP_ENDPOINT, post(handlers::sweep::handler))
        .layer(global_middleware)
        .with_state(state);

    let addr = SocketAddr::from((bind_ip, port));
    info!("Starting public HTTP server on {}", addr);

    axum::serve(TcpListener::bind(addr).await?, app.into_make_service()).await
}
