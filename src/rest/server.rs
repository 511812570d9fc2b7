//! Axum HTTP surface for the tour resource.
//!
//! Status-code mapping: 201 create, 200 read/update, 204 delete; failures
//! map through `ApiError::status_code`.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::errors::ApiError;
use crate::observability::{Logger, Severity};
use crate::service::TourService;
use crate::store::ResourceStore;

use super::config::HttpServerConfig;
use super::response::{ListBody, SingleBody};

/// HTTP server wrapping one tour service
pub struct RestServer<S: ResourceStore> {
    service: Arc<TourService<S>>,
    config: HttpServerConfig,
}

impl<S: ResourceStore + 'static> RestServer<S> {
    pub fn new(store: S, config: HttpServerConfig) -> Self {
        Self {
            service: Arc::new(TourService::new(store)),
            config,
        }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let cors = if self.config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = self
                .config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route(
                "/api/v1/tours",
                get(list_tours::<S>).post(create_tour::<S>),
            )
            .route(
                "/api/v1/tours/{id}",
                get(get_tour::<S>)
                    .patch(update_tour::<S>)
                    .delete(delete_tour::<S>),
            )
            .with_state(self.service.clone())
            .layer(cors)
    }

    /// Start serving (async, runs until the listener fails)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{}", e)))?;

        let router = self.router();
        let listener = TcpListener::bind(addr).await?;
        Logger::log(
            Severity::Info,
            "server_started",
            &[("addr", &addr.to_string())],
        );
        axum::serve(listener, router).await
    }
}

type ServerState<S> = Arc<TourService<S>>;

async fn list_tours<S: ResourceStore + 'static>(
    State(service): State<ServerState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListBody<Value>>, ApiError> {
    let tours = service.list(&params)?;
    Ok(Json(ListBody::new(tours)))
}

async fn create_tour<S: ResourceStore + 'static>(
    State(service): State<ServerState<S>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<SingleBody<Value>>), ApiError> {
    let tour = service.create(body)?;
    Ok((StatusCode::CREATED, Json(SingleBody::new(tour))))
}

async fn get_tour<S: ResourceStore + 'static>(
    State(service): State<ServerState<S>>,
    Path(id): Path<String>,
) -> Result<Json<SingleBody<Value>>, ApiError> {
    let tour = service.get(&id)?;
    Ok(Json(SingleBody::new(tour)))
}

async fn update_tour<S: ResourceStore + 'static>(
    State(service): State<ServerState<S>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<SingleBody<Value>>, ApiError> {
    let tour = service.update(&id, &body)?;
    Ok(Json(SingleBody::new(tour)))
}

async fn delete_tour<S: ResourceStore + 'static>(
    State(service): State<ServerState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
