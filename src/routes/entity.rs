//! Entity CRUD routes: one nested router per entity, each carrying its own repository.

use crate::config::entities;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::service::Repository;
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/<segment>` and `/<segment>/:id` for products, suppliers, and orders.
pub fn entity_routes(state: AppState) -> Router {
    entities().into_iter().fold(Router::new(), |router, entity| {
        router.nest(
            &format!("/{}", entity.path_segment),
            resource_routes(state.repository(entity)),
        )
    })
}

fn resource_routes(repo: Repository) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .with_state(repo)
}
