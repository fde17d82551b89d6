use crate::common::error::AvatarError;
use crate::common::format::Format;
use crate::container::Container;
use crate::entities::{avatar, user};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde::Serialize;
use std::iter::once;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::{any::Any, time::Duration};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, sensitive_headers::SetSensitiveRequestHeadersLayer,
    timeout::TimeoutLayer, validate_request::ValidateRequestHeaderLayer,
};
use tracing::{event, info_span, log::info, Instrument, Level};
use uuid::Uuid;

const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;
const MAX_REQUEST_DURATION_SECONDS: u64 = 30;

pub async fn start(container: Arc<Container>) {
    let app = Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .route("/users/:user_id/avatar", post(upload_avatar_route))
                .route(
                    "/users/:user_id/avatar/generate",
                    post(generate_avatar_route),
                )
                .layer(
                    ServiceBuilder::new()
                        .layer(SetSensitiveRequestHeadersLayer::new(once(
                            header::AUTHORIZATION,
                        )))
                        .layer(ValidateRequestHeaderLayer::bearer(
                            container.settings.api_key().as_str(),
                        ))
                        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES)),
                ),
        )
        .route("/avatars/:file_name", get(get_avatar_route))
        .route("/", get(health_check_route))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(trace_id))
                .layer(middleware::from_fn(request_event))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    MAX_REQUEST_DURATION_SECONDS,
                ))),
        )
        .with_state(container);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8081));

    info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("received shutdown signal");
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!("caught panic: {}", details);

    return (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseError { error: details }),
    )
        .into_response();
}

// TODO: Get trace id from headers if present
async fn trace_id<B>(request: Request<B>, next: Next<B>) -> Result<Response, StatusCode> {
    let trace_id = Uuid::new_v4();
    let span = info_span!("request", %trace_id);
    async move {
        let response = next.run(request).await;
        Ok(response)
    }
    .instrument(span)
    .await
}

async fn request_event<B>(request: Request<B>, next: Next<B>) -> Result<Response, StatusCode> {
    let start = std::time::Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    if status >= 500 {
        event!(Level::ERROR, status, method, uri, duration_ms, "response",);
    } else if status >= 400 {
        event!(Level::WARN, status, method, uri, duration_ms, "response",);
    } else {
        event!(Level::INFO, status, method, uri, duration_ms, "response",);
    };

    Ok(response)
}

async fn health_check_route() -> StatusCode {
    return StatusCode::OK;
}

// The user subsystem owns identities; callers pass the parts the pipeline
// reads alongside the id in the path.
#[derive(Deserialize, Debug, Default)]
struct IdentityParams {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

async fn upload_avatar_route(
    State(container): State<Arc<Container>>,
    Path(user_id): Path<u64>,
    Query(identity): Query<IdentityParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let user = user::new(user_id, identity.name, identity.email);
    let payload = avatar::ImagePayload::new(content_type, body.to_vec());

    let file_name = match container.save_avatar.execute(&user, &payload).await {
        Ok(file_name) => file_name,
        Err(e @ AvatarError::UnsupportedContentType(_)) => {
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ResponseError {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("could not save avatar for user {}: {}", user_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseError {
                    error: String::from("could not save avatar"),
                }),
            )
                .into_response();
        }
    };

    let url = container.get_avatar.url_for(&file_name);

    return (StatusCode::CREATED, Json(avatar::new(file_name, url))).into_response();
}

#[derive(Deserialize, Debug)]
struct GenerateAvatarRequest {
    name: String,
    email: String,
}

async fn generate_avatar_route(
    State(container): State<Arc<Container>>,
    Path(user_id): Path<u64>,
    Json(request): Json<GenerateAvatarRequest>,
) -> Response {
    let user = user::new(user_id, request.name, request.email);

    // never fails, worst case is the default reference
    let file_name = container.generate_avatar.execute(&user, None).await;
    let url = container.get_avatar.url_for(&file_name);

    return (StatusCode::CREATED, Json(avatar::new(file_name, url))).into_response();
}

async fn get_avatar_route(
    State(container): State<Arc<Container>>,
    Path(file_name): Path<String>,
) -> Response {
    let extension = file_name.rsplit('.').next().unwrap_or("");
    let content_type = match Format::from_extension(extension) {
        Ok(format) => format.content_type(),
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ResponseError {
                    error: String::from("no such avatar"),
                }),
            )
                .into_response();
        }
    };

    let body = match container.get_avatar.execute(file_name).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("could not load avatar: {}", e);
            return (
                StatusCode::NOT_FOUND,
                Json(ResponseError {
                    error: String::from("no such avatar"),
                }),
            )
                .into_response();
        }
    };

    return (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response();
}

#[derive(Serialize, Debug)]
struct ResponseError {
    error: String,
}
