//! Backend entry point: wires the file-processing endpoints, the request
//! gate, health probes, and OpenAPI docs over the persistence store.

use std::env;
use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::domain::MergeService;
use backend::inbound::http::files::{add_users, analyze};
use backend::inbound::http::gate::{no_token, token};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url =
        env::var("DATABASE_URL").map_err(|_| io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)?;

    // The store collaborator is built once here and injected explicitly;
    // nothing else holds a handle to it.
    let state = HttpState {
        merge: MergeService::new(Arc::new(DieselUserRepository::new(pool))),
    };

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/file").service(analyze).service(add_users))
            .service(
                web::scope("/api/testmiddleware")
                    .service(token)
                    .service(no_token),
            )
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(("0.0.0.0", 8080))?;

    health_state.mark_ready();
    server.run().await
}
