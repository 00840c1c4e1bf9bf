use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use benefix_core::health::{healthz, readyz};
use benefix_core::middleware::request_id_layer;

use crate::handlers::{
    dependent::{
        add_dependent, assign_dependent_policy, list_dependents, remove_dependent,
        update_dependent,
    },
    employee::{
        assign_policy, delete_employee, enroll_employee, get_employee, get_me, list_employees,
        update_employee,
    },
    import::{import_employees, import_employees_file},
    login::login,
    policy::{create_policy, list_policies},
    token::{check_token, create_token, refresh_token, revoke_token},
};
use crate::state::AppState;

/// Roster uploads can run to a few thousand rows; 10 MiB covers them with room.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/token", get(check_token))
        .route("/auth/token", post(create_token))
        .route("/auth/token", patch(refresh_token))
        .route("/auth/token", delete(revoke_token))
        // Employees
        .route("/employees", get(list_employees))
        .route("/employees", post(enroll_employee))
        .route("/employees/@me", get(get_me))
        .route("/employees/import", post(import_employees))
        .route("/employees/import/file", post(import_employees_file))
        .route("/employees/{employee_id}", get(get_employee))
        .route("/employees/{employee_id}", patch(update_employee))
        .route("/employees/{employee_id}", delete(delete_employee))
        .route("/employees/{employee_id}/policy", patch(assign_policy))
        // Dependents
        .route("/employees/{employee_id}/dependents", get(list_dependents))
        .route("/employees/{employee_id}/dependents", post(add_dependent))
        .route("/dependents/{dependent_id}", patch(update_dependent))
        .route("/dependents/{dependent_id}", delete(remove_dependent))
        .route(
            "/dependents/{dependent_id}/policy",
            patch(assign_dependent_policy),
        )
        // Policies
        .route("/policies", get(list_policies))
        .route("/policies", post(create_policy))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(request_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
