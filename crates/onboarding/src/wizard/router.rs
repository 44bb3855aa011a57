use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::draft::DraftStore;
use super::machine::{FieldUpdate, OnboardingWizard, UpdateError, WizardError};
use super::submit::SubmissionSink;

/// Shared session handle; the mutex realizes the engine's one-mutation-at-a-
/// time execution model.
pub type SharedWizard<D, S> = Arc<Mutex<OnboardingWizard<D, S>>>;

/// Router builder exposing HTTP endpoints over a single wizard session.
pub fn onboarding_router<D, S>(session: SharedWizard<D, S>) -> Router
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    Router::new()
        .route("/api/v1/onboarding/step", get(step_handler::<D, S>))
        .route("/api/v1/onboarding/fields", post(update_field_handler::<D, S>))
        .route(
            "/api/v1/onboarding/attachment",
            post(attachment_handler::<D, S>),
        )
        .route("/api/v1/onboarding/advance", post(advance_handler::<D, S>))
        .route("/api/v1/onboarding/retreat", post(retreat_handler::<D, S>))
        .route("/api/v1/onboarding/submit", post(submit_handler::<D, S>))
        .with_state(session)
}

/// Optional evaluation-date override carried by transition requests.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransitionRequest {
    #[serde(default)]
    today: Option<NaiveDate>,
}

impl TransitionRequest {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachmentRequest {
    file_name: String,
    content_type: String,
    byte_size: u64,
}

pub(crate) async fn step_handler<D, S>(State(session): State<SharedWizard<D, S>>) -> Response
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    let wizard = session.lock().expect("wizard session mutex poisoned");
    let view = wizard.step_view(Local::now().date_naive());
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn update_field_handler<D, S>(
    State(session): State<SharedWizard<D, S>>,
    Json(update): Json<FieldUpdate>,
) -> Response
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    let mut wizard = session.lock().expect("wizard session mutex poisoned");
    match wizard.update_field(update) {
        Ok(()) => {
            let view = wizard.step_view(Local::now().date_naive());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err @ UpdateError::NotesTooLong { .. }) => {
            reject(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
        }
        Err(err @ UpdateError::AlreadySubmitted) => {
            reject(StatusCode::CONFLICT, &err.to_string())
        }
    }
}

pub(crate) async fn attachment_handler<D, S>(
    State(session): State<SharedWizard<D, S>>,
    Json(request): Json<AttachmentRequest>,
) -> Response
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    let mut wizard = session.lock().expect("wizard session mutex poisoned");
    match wizard.attach_profile_picture(
        request.file_name,
        &request.content_type,
        request.byte_size,
    ) {
        Ok(()) => {
            let view = wizard.step_view(Local::now().date_naive());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => reject(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
    }
}

pub(crate) async fn advance_handler<D, S>(
    State(session): State<SharedWizard<D, S>>,
    request: Option<Json<TransitionRequest>>,
) -> Response
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    let request = request.map(|Json(body)| body).unwrap_or_default();
    let mut wizard = session.lock().expect("wizard session mutex poisoned");
    match wizard.advance(request.today()) {
        Ok(_) => {
            let view = wizard.step_view(request.today());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => wizard_error_response(err),
    }
}

pub(crate) async fn retreat_handler<D, S>(
    State(session): State<SharedWizard<D, S>>,
    request: Option<Json<TransitionRequest>>,
) -> Response
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    let request = request.map(|Json(body)| body).unwrap_or_default();
    let mut wizard = session.lock().expect("wizard session mutex poisoned");
    wizard.retreat();
    let view = wizard.step_view(request.today());
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn submit_handler<D, S>(
    State(session): State<SharedWizard<D, S>>,
    request: Option<Json<TransitionRequest>>,
) -> Response
where
    D: DraftStore + 'static,
    S: SubmissionSink + 'static,
{
    let request = request.map(|Json(body)| body).unwrap_or_default();
    let mut wizard = session.lock().expect("wizard session mutex poisoned");
    match wizard.submit(request.today()) {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => wizard_error_response(err),
    }
}

fn wizard_error_response(err: WizardError) -> Response {
    match err {
        WizardError::Invalid(issue) => {
            let payload = json!({
                "error": issue.message,
                "field": issue.field,
                "kind": issue.kind,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        WizardError::NotOnReviewStep | WizardError::AlreadySubmitted => {
            reject(StatusCode::CONFLICT, &err.to_string())
        }
        WizardError::Submission(_) => reject(StatusCode::BAD_GATEWAY, &err.to_string()),
        WizardError::Normalize(_) => {
            reject(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
