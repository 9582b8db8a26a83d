use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

#[cfg(feature = "graphql")]
use std::sync::Arc;
#[cfg(feature = "graphql")]
use axum::extract::State;
#[cfg(feature = "graphql")]
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
#[cfg(feature = "graphql")]
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema};
#[cfg(feature = "graphql")]
use crate::services::{BcryptHasher, OrganizationService, UserService};
#[cfg(feature = "graphql")]
use crate::store::SeaOrmStore;

use super::handlers::health;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    #[cfg(feature = "graphql")]
    pub graphql_schema: GraphQLSchema,
}

pub async fn create_app(db: DatabaseConnection, config: &ServerConfig) -> Result<Router> {
    #[cfg(feature = "graphql")]
    let graphql_schema = {
        let store = Arc::new(SeaOrmStore::new(db));
        let organization_service = Arc::new(OrganizationService::with_default_rules(store.clone()));
        let user_service = Arc::new(UserService::with_default_rules(
            store,
            BcryptHasher::new(config.bcrypt_cost),
        ));

        let context = GraphQLContext::new(organization_service, user_service)
            .with_password_redaction(config.redact_password_hash);
        build_schema(context)
    };

    // Without the GraphQL surface nothing reads the database yet
    #[cfg(not(feature = "graphql"))]
    drop(db);

    let state = AppState {
        #[cfg(feature = "graphql")]
        graphql_schema,
    };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any),
    };

    #[allow(unused_mut)]
    let mut app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check));

    #[cfg(feature = "graphql")]
    {
        app = app.route("/graphql", get(graphql_playground).post(graphql_handler));
    }

    let app = app
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

#[cfg(feature = "graphql")]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    tracing::debug!("GraphQL request received");
    let response = state.graphql_schema.execute(req.into_inner()).await;
    tracing::debug!("GraphQL request completed");
    response.into()
}

#[cfg(feature = "graphql")]
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
