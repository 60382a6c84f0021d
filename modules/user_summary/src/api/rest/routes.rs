use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::SummaryService;

/// Mount the module's endpoints and attach the service extension.
pub fn register_routes(router: Router, service: Arc<SummaryService>) -> Router {
    router
        .route("/summary", get(handlers::get_summary))
        .route("/users", get(handlers::list_users))
        .layer(Extension(service))
}
