use axum::{
    Extension, Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::db::sqlite::AdvisingStorage;
use crate::handlers::{self, directory, identity, sessions, settings, templates};
use crate::identity::SharedIdentity;

/// State shared by every resource handler.
#[derive(Clone)]
pub struct AdminState {
    pub storage: AdvisingStorage,
}

impl AdminState {
    pub fn new(storage: AdvisingStorage) -> Self {
        Self { storage }
    }
}

/// Full application router. The identity context is only installed on `/api/auth`.
pub fn admin_router(state: AdminState, identity_ctx: SharedIdentity) -> Router {
    let auth: Router<AdminState> = Router::new()
        .route("/", get(identity::current_identity))
        .route("/login", post(identity::login))
        .route("/logout", post(identity::logout))
        .route("/role", put(identity::switch_role))
        .route("/selectors", put(identity::update_selectors))
        .layer(Extension(identity_ctx));

    let api: Router<AdminState> = Router::new()
        .route(
            "/templates",
            get(templates::list_templates)
                .post(templates::create_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        .route("/templates/{id}", get(templates::get_template))
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::upsert_session),
        )
        .route(
            "/sessions/{id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route(
            "/settings",
            get(settings::get_settings)
                .post(settings::upsert_setting)
                .put(settings::bulk_upsert_settings),
        )
        .route(
            "/students",
            get(directory::list_students).post(directory::create_student),
        )
        .route("/students/{id}", get(directory::get_student))
        .route(
            "/periods",
            get(directory::list_periods).post(directory::create_period),
        )
        .nest("/auth", auth);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .fallback(handlers::handler404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
