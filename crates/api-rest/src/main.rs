//! PHR REST API server.
//!
//! Exposes the patient record operations from `phr-core` over HTTP:
//! viewing, lookup, sorting, creation, partial update, and deletion of
//! patient records, with OpenAPI/Swagger documentation.
//!
//! Every request performs its own load-modify-save cycle against the shared
//! data file. There is no locking between concurrent writers; see
//! `phr_core::store` for the accepted limitations.

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use phr_core::config::data_file_from_env_value;
use phr_core::{
    lookup, sort_by_metric, CoreConfig, Gender, Patient, PatientError, PatientStore,
    PatientUpdate, PatientView, SortKey, SortOrder, Verdict,
};

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>PHR</title></head>
  <body>
    <h1>Patient Health Records API</h1>
    <p>Interactive documentation is served at <a href="/swagger-ui">/swagger-ui</a>.</p>
  </body>
</html>
"#;

/// Application state shared across REST API handlers
///
/// Holds the patient store used by every endpoint. The store itself is
/// stateless between calls; only configuration is shared.
#[derive(Clone)]
struct AppState {
    store: PatientStore,
}

/// Health check response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

/// Generic success message body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
struct MessageRes {
    message: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
struct ErrorDetail {
    detail: String,
}

/// Request body for creating a patient record.
///
/// Carries the patient id alongside the stored fields; the id becomes the
/// collection key and is not stored inside the record itself.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
struct CreatePatientReq {
    /// Unique patient id, e.g. "P1".
    id: String,
    name: String,
    city: String,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
}

/// Query parameters for the sort endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct SortParams {
    /// Metric to sort by: height, weight or bmi.
    sort_by: String,
    /// Sort direction: asc (default) or desc.
    order: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home,
        health,
        view,
        patient_detail,
        sort_patients,
        create_patient,
        update_patient,
        delete_patient,
    ),
    components(schemas(
        Patient,
        PatientView,
        PatientUpdate,
        Gender,
        Verdict,
        CreatePatientReq,
        HealthRes,
        MessageRes,
        ErrorDetail,
    ))
)]
struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorDetail>);

/// Maps a domain error to an HTTP status and JSON error body.
///
/// Storage failures are logged and surface as an opaque 500; everything else
/// carries its own message to the caller.
fn error_response(err: PatientError) -> ApiError {
    let status = match &err {
        PatientError::InvalidInput(_)
        | PatientError::AlreadyExists(_)
        | PatientError::InvalidSortField(_)
        | PatientError::InvalidSortOrder(_) => StatusCode::BAD_REQUEST,
        PatientError::NotFound => StatusCode::NOT_FOUND,
        PatientError::FileRead(_)
        | PatientError::FileWrite(_)
        | PatientError::Serialization(_)
        | PatientError::Deserialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("storage error: {:?}", err);
        "Internal error".to_string()
    } else {
        err.to_string()
    };

    (status, Json(ErrorDetail { detail }))
}

/// Builds the application router over the given state.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/view", get(view))
        .route("/patient/:patient_id", get(patient_detail))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/:patient_id", put(update_patient))
        .route("/delete/:patient_id", delete(delete_patient))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Main entry point for the PHR REST API server
///
/// Starts the REST API server on the configured address (default: 0.0.0.0:3000)
/// and bootstraps an empty data file on first run.
///
/// # Environment Variables
/// - `PHR_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PHR_DATA_FILE`: Path of the patient data file (default: "patients.json")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data file path is invalid or cannot be bootstrapped, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("phr_api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PHR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = data_file_from_env_value(std::env::var("PHR_DATA_FILE").ok());

    tracing::info!("-- Starting PHR REST API on {}", addr);
    tracing::info!("-- Patient data file: {}", data_file.display());

    let cfg = Arc::new(CoreConfig::new(data_file)?);
    let store = PatientStore::new(cfg);
    store.bootstrap()?;

    let app = router(AppState { store });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "HTML landing page", content_type = "text/html")
    )
)]
/// HTML landing page.
#[axum::debug_handler]
async fn home() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "PHR REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Full collection keyed by patient id, with derived metrics"),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
/// View the full patient collection
///
/// Loads the whole collection and materialises the derived `bmi` and
/// `verdict` metrics on every record.
///
/// # Returns
/// * `Ok(Json<_>)` - Map of patient id to record with derived fields
/// * `Err(ApiError)` - Internal server error if the collection cannot be read
#[axum::debug_handler]
async fn view(State(state): State<AppState>) -> Result<Json<BTreeMap<String, PatientView>>, ApiError> {
    let collection = state.store.load().map_err(error_response)?;

    let views = collection
        .iter()
        .map(|(id, patient)| (id.clone(), patient.to_view()))
        .collect();

    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient id, e.g. P1")
    ),
    responses(
        (status = 200, description = "Patient record with derived metrics", body = PatientView),
        (status = 404, description = "Patient not found", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
/// Fetch a single patient record by id
///
/// # Returns
/// * `Ok(Json<PatientView>)` - The record with derived fields
/// * `Err(ApiError)` - 404 if the id is absent
#[axum::debug_handler]
async fn patient_detail(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
) -> Result<Json<PatientView>, ApiError> {
    let collection = state.store.load().map_err(error_response)?;

    let patient = lookup(&collection, &patient_id).map_err(error_response)?;
    Ok(Json(patient.to_view()))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "Records sorted by the requested metric", body = [PatientView]),
        (status = 400, description = "Invalid sort field or order", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
/// Sort patient records by height, weight or bmi
///
/// Parameters are validated before the collection is touched, so an invalid
/// field or order never yields a partial result.
///
/// # Returns
/// * `Ok(Json<Vec<PatientView>>)` - Sorted records with derived fields
/// * `Err(ApiError)` - 400 listing valid values for a bad parameter
#[axum::debug_handler]
async fn sort_patients(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientView>>, ApiError> {
    let key: SortKey = params.sort_by.parse().map_err(error_response)?;
    let order: SortOrder = params
        .order
        .as_deref()
        .unwrap_or("asc")
        .parse()
        .map_err(error_response)?;

    let collection = state.store.load().map_err(error_response)?;

    Ok(Json(sort_by_metric(&collection, key, order)))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Invalid record or duplicate id", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
/// Create a new patient record
///
/// Validates the incoming record, then inserts it under the given id and
/// writes the collection back.
///
/// # Returns
/// * `Ok((StatusCode, Json<MessageRes>))` - 201 on success
/// * `Err(ApiError)` - 400 for validation failures or an existing id
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let patient = Patient {
        name: req.name,
        city: req.city,
        age: req.age,
        gender: req.gender,
        height: req.height,
        weight: req.weight,
    };
    patient.validate().map_err(error_response)?;

    if req.id.trim().is_empty() {
        return Err(error_response(PatientError::InvalidInput(
            "id cannot be empty".into(),
        )));
    }

    let mut collection = state.store.load().map_err(error_response)?;

    if collection.contains_key(&req.id) {
        return Err(error_response(PatientError::AlreadyExists(req.id)));
    }

    collection.insert(req.id, patient);
    state.store.save(&collection).map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageRes {
            message: "patient created".into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient id, e.g. P1")
    ),
    request_body = PatientUpdate,
    responses(
        (status = 200, description = "Patient updated", body = MessageRes),
        (status = 400, description = "Merged record failed validation", body = ErrorDetail),
        (status = 404, description = "Patient not found", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
/// Partially update a patient record
///
/// Merges only the fields present in the patch onto the stored record and
/// re-validates the merged result before writing back. A failed validation
/// leaves storage untouched.
///
/// # Returns
/// * `Ok(Json<MessageRes>)` - On successful update
/// * `Err(ApiError)` - 404 for an unknown id, 400 for an invalid merge
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
    Json(patch): Json<PatientUpdate>,
) -> Result<Json<MessageRes>, ApiError> {
    let mut collection = state.store.load().map_err(error_response)?;

    let existing = lookup(&collection, &patient_id).map_err(error_response)?;
    let merged = patch.merged(existing).map_err(error_response)?;

    collection.insert(patient_id, merged);
    state.store.save(&collection).map_err(error_response)?;

    Ok(Json(MessageRes {
        message: "patient updated".into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient id, e.g. P1")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
/// Delete a patient record
///
/// Removes the record and writes the collection back. Deleting an absent id
/// returns 404 without modifying storage.
///
/// # Returns
/// * `Ok(Json<MessageRes>)` - On successful deletion
/// * `Err(ApiError)` - 404 if the id is absent
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
) -> Result<Json<MessageRes>, ApiError> {
    let mut collection = state.store.load().map_err(error_response)?;

    if collection.remove(&patient_id).is_none() {
        return Err(error_response(PatientError::NotFound));
    }

    state.store.save(&collection).map_err(error_response)?;

    Ok(Json(MessageRes {
        message: "patient deleted".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const SAMPLE_DATA: &str = r#"{
        "P1": {"name": "Sam", "city": "Ahmedabad", "age": 30, "gender": "male", "height": 1.67, "weight": 70.0},
        "P2": {"name": "Ana", "city": "Pune", "age": 25, "gender": "female", "height": 1.90, "weight": 55.0},
        "P3": {"name": "Kim", "city": "Delhi", "age": 41, "gender": "other", "height": 1.55, "weight": 62.0}
    }"#;

    fn test_app(temp_dir: &TempDir) -> Router {
        let data_file = temp_dir.path().join("patients.json");
        fs::write(&data_file, SAMPLE_DATA).expect("should write fixture");

        let cfg = CoreConfig::new(data_file).expect("CoreConfig::new should succeed");
        router(AppState {
            store: PatientStore::new(Arc::new(cfg)),
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    async fn send_json(
        app: Router,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_home_serves_html() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Patient Health Records"));
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_view_returns_collection_with_derived_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/view").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().unwrap().len(), 3);
        // 70 / 1.67² = 25.0995…
        assert_eq!(body["P1"]["bmi"], 25.1);
        assert_eq!(body["P1"]["verdict"], "obese");
        assert_eq!(body["P2"]["name"], "Ana");
    }

    #[tokio::test]
    async fn test_patient_detail_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/patient/P1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Sam");
        assert_eq!(body["bmi"], 25.1);
        assert_eq!(body["verdict"], "obese");
    }

    #[tokio::test]
    async fn test_patient_detail_absent_is_404() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/patient/P9").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "patient not found");
    }

    #[tokio::test]
    async fn test_sort_by_height_asc() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/sort?sort_by=height&order=asc").await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Kim", "Sam", "Ana"]);
    }

    #[tokio::test]
    async fn test_sort_defaults_to_asc() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/sort?sort_by=weight").await;

        assert_eq!(status, StatusCode::OK);
        let weights: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["weight"].as_f64().unwrap())
            .collect();
        assert_eq!(weights, [55.0, 62.0, 70.0]);
    }

    #[tokio::test]
    async fn test_sort_rejects_invalid_field() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/sort?sort_by=age&order=asc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("height, weight, bmi"));
    }

    #[tokio::test]
    async fn test_sort_rejects_invalid_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = get(test_app(&temp_dir), "/sort?sort_by=bmi&order=upward").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("asc, desc"));
    }

    #[tokio::test]
    async fn test_create_then_visible() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send_json(
            app.clone(),
            "POST",
            "/create",
            serde_json::json!({
                "id": "P4", "name": "Lee", "city": "Goa",
                "age": 52, "gender": "male", "height": 1.75, "weight": 80.0
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "patient created");

        let (status, body) = get(app, "/patient/P4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Lee");
        // 80 / 1.75² = 26.1224…
        assert_eq!(body["bmi"], 26.12);
        assert_eq!(body["verdict"], "obese");
    }

    #[tokio::test]
    async fn test_create_duplicate_id_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = send_json(
            test_app(&temp_dir),
            "POST",
            "/create",
            serde_json::json!({
                "id": "P1", "name": "Sam", "city": "Ahmedabad",
                "age": 30, "gender": "male", "height": 1.67, "weight": 70.0
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_age() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, body) = send_json(
            test_app(&temp_dir),
            "POST",
            "/create",
            serde_json::json!({
                "id": "P5", "name": "Old", "city": "Goa",
                "age": 120, "gender": "other", "height": 1.75, "weight": 80.0
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn test_edit_merges_and_revalidates() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send_json(
            app.clone(),
            "PUT",
            "/edit/P1",
            serde_json::json!({"weight": 64.5, "city": "Mumbai"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "patient updated");

        let (status, body) = get(app, "/patient/P1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "Mumbai");
        assert_eq!(body["weight"], 64.5);
        assert_eq!(body["name"], "Sam");
    }

    #[tokio::test]
    async fn test_edit_invalid_patch_leaves_storage_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, _) = send_json(
            app.clone(),
            "PUT",
            "/edit/P1",
            serde_json::json!({"age": 120}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get(app, "/patient/P1").await;
        assert_eq!(body["age"], 30);
    }

    #[tokio::test]
    async fn test_edit_absent_id_is_404() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (status, _) = send_json(
            test_app(&temp_dir),
            "PUT",
            "/edit/P9",
            serde_json::json!({"weight": 64.5}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_404() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(app.clone(), "DELETE", "/delete/P1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "patient deleted");

        let (status, _) = get(app.clone(), "/patient/P1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = get(app, "/view").await;
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_404_and_keeps_storage() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(app.clone(), "DELETE", "/delete/P9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "patient not found");

        let (_, body) = get(app, "/view").await;
        assert_eq!(body.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_data_file_is_internal_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = CoreConfig::new(temp_dir.path().join("absent.json"))
            .expect("CoreConfig::new should succeed");
        let app = router(AppState {
            store: PatientStore::new(Arc::new(cfg)),
        });

        let (status, body) = get(app, "/view").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal error");
    }
}
