use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use tower_http::trace::TraceLayer;

use cradle_core::health::{healthz, readyz};
use cradle_core::middleware::request_id_layer;

use crate::gate::require_session;
use crate::handlers::baby::get_baby;
use crate::handlers::event::{
    create_event, delete_event, get_event, list_events, update_event,
};
use crate::handlers::event_type::{
    create_event_type, delete_event_type, list_event_types, update_event_type,
};
use crate::handlers::session::{sign_in, sign_out};
use crate::handlers::user::{change_password, get_me};
use crate::state::AppState;

/// Every route except health and the session endpoints sits behind the
/// access gate; an unauthenticated caller cannot reach a handler.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/users/@me", get(get_me))
        .route("/users/@me/password", put(change_password))
        .route("/baby", get(get_baby))
        .route(
            "/babies/{baby_id}/event-types",
            get(list_event_types).post(create_event_type),
        )
        .route(
            "/event-types/{type_id}",
            patch(update_event_type).delete(delete_event_type),
        )
        .route(
            "/babies/{baby_id}/events",
            get(list_events).post(create_event),
        )
        .route(
            "/events/{event_id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/session", post(sign_in).delete(sign_out))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
