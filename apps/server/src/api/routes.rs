//! FHIR API routes
//!
//! The exposed interactions are create, read, and type-level search.
//! Update, delete, and history are deliberately absent; adding them is an
//! extension of the service layer, not a routing concern.

use crate::api::handlers::{crud, search};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn fhir_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:resource_type",
            post(crud::create_resource).get(search::search_type),
        )
        .route("/:resource_type/:id", get(crud::read_resource))
}
