use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};

use super::domain::{
    Company, CompanyChanges, CompanyId, CompanyPayload, EducationHistory,
    EducationHistoryPayload, EducationId, Job, JobApplication, JobApplicationPayload, JobChanges,
    JobId, JobPayload, User, UserPayload, WorkHistory, WorkHistoryPayload, WorkId,
};
use super::error::BoardError;
use super::service::JobBoard;
use crate::identity::Identity;

/// Header carrying the caller identity resolved by the fronting auth layer.
pub const CALLER_HEADER: &str = "x-caller-identity";

type Board = State<Arc<JobBoard>>;
type Created<T> = Result<(StatusCode, Json<T>), BoardError>;
type Reply<T> = Result<Json<T>, BoardError>;

/// Router builder exposing every board operation over HTTP.
pub fn board_router(board: Arc<JobBoard>) -> Router {
    Router::new()
        .route("/api/v1/users", post(register_user))
        .route("/api/v1/users/me", get(profile))
        .route(
            "/api/v1/education",
            get(list_education).post(add_education),
        )
        .route(
            "/api/v1/education/:id",
            put(update_education).delete(remove_education),
        )
        .route("/api/v1/work", get(list_work).post(add_work))
        .route("/api/v1/work/:id", put(update_work).delete(remove_work))
        .route("/api/v1/companies", post(register_company))
        .route(
            "/api/v1/companies/:id",
            put(update_company).delete(remove_company),
        )
        .route("/api/v1/companies/:id/jobs", get(list_company_jobs))
        .route("/api/v1/jobs", get(list_open_jobs).post(create_job))
        .route(
            "/api/v1/jobs/:id",
            get(job).put(update_job).delete(remove_job),
        )
        .route("/api/v1/jobs/:id/close", post(close_job))
        .route(
            "/api/v1/applications",
            get(list_applications).post(apply_to_job),
        )
        .with_state(board)
}

/// Missing or blank identity headers resolve to the anonymous caller.
pub fn caller_from_headers(headers: &HeaderMap) -> Identity {
    headers
        .get(CALLER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Identity::new)
        .unwrap_or_else(Identity::anonymous)
}

pub(crate) async fn register_user(
    State(board): Board,
    headers: HeaderMap,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Created<User> {
    let Json(payload) = body?;
    let user = board.register_user(&caller_from_headers(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub(crate) async fn profile(State(board): Board, headers: HeaderMap) -> Reply<User> {
    board.profile(&caller_from_headers(&headers)).map(Json)
}

pub(crate) async fn list_education(
    State(board): Board,
    headers: HeaderMap,
) -> Reply<Vec<EducationHistory>> {
    board
        .list_education_history(&caller_from_headers(&headers))
        .map(Json)
}

pub(crate) async fn add_education(
    State(board): Board,
    headers: HeaderMap,
    body: Result<Json<EducationHistoryPayload>, JsonRejection>,
) -> Created<EducationHistory> {
    let Json(payload) = body?;
    let entry = board.add_education_history(&caller_from_headers(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub(crate) async fn update_education(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<EducationHistoryPayload>, JsonRejection>,
) -> Reply<EducationHistory> {
    let Json(payload) = body?;
    board
        .update_education_history(&caller_from_headers(&headers), &EducationId(id), payload)
        .map(Json)
}

pub(crate) async fn remove_education(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<EducationHistory> {
    board
        .remove_education_history(&caller_from_headers(&headers), &EducationId(id))
        .map(Json)
}

pub(crate) async fn list_work(State(board): Board, headers: HeaderMap) -> Reply<Vec<WorkHistory>> {
    board
        .list_work_history(&caller_from_headers(&headers))
        .map(Json)
}

pub(crate) async fn add_work(
    State(board): Board,
    headers: HeaderMap,
    body: Result<Json<WorkHistoryPayload>, JsonRejection>,
) -> Created<WorkHistory> {
    let Json(payload) = body?;
    let entry = board.add_work_history(&caller_from_headers(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub(crate) async fn update_work(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<WorkHistoryPayload>, JsonRejection>,
) -> Reply<WorkHistory> {
    let Json(payload) = body?;
    board
        .update_work_history(&caller_from_headers(&headers), &WorkId(id), payload)
        .map(Json)
}

pub(crate) async fn remove_work(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<WorkHistory> {
    board
        .remove_work_history(&caller_from_headers(&headers), &WorkId(id))
        .map(Json)
}

pub(crate) async fn register_company(
    State(board): Board,
    headers: HeaderMap,
    body: Result<Json<CompanyPayload>, JsonRejection>,
) -> Created<Company> {
    let Json(payload) = body?;
    let company = board.register_company(&caller_from_headers(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(company)))
}

pub(crate) async fn update_company(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<CompanyChanges>, JsonRejection>,
) -> Reply<Company> {
    let Json(changes) = body?;
    board
        .update_company(&caller_from_headers(&headers), &CompanyId(id), changes)
        .map(Json)
}

pub(crate) async fn remove_company(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<Company> {
    board
        .remove_company(&caller_from_headers(&headers), &CompanyId(id))
        .map(Json)
}

pub(crate) async fn list_company_jobs(
    State(board): Board,
    Path(id): Path<String>,
) -> Reply<Vec<Job>> {
    board.list_open_jobs_by_company(&CompanyId(id)).map(Json)
}

pub(crate) async fn list_open_jobs(State(board): Board) -> Reply<Vec<Job>> {
    board.list_open_jobs().map(Json)
}

pub(crate) async fn job(State(board): Board, Path(id): Path<String>) -> Reply<Job> {
    board.job(&JobId(id)).map(Json)
}

pub(crate) async fn create_job(
    State(board): Board,
    headers: HeaderMap,
    body: Result<Json<JobPayload>, JsonRejection>,
) -> Created<Job> {
    let Json(payload) = body?;
    let job = board.create_job(&caller_from_headers(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(crate) async fn update_job(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<JobChanges>, JsonRejection>,
) -> Reply<Job> {
    let Json(changes) = body?;
    board
        .update_job(&caller_from_headers(&headers), &JobId(id), changes)
        .map(Json)
}

pub(crate) async fn close_job(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<Job> {
    board
        .close_job(&caller_from_headers(&headers), &JobId(id))
        .map(Json)
}

pub(crate) async fn remove_job(
    State(board): Board,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<Job> {
    board
        .remove_job(&caller_from_headers(&headers), &JobId(id))
        .map(Json)
}

pub(crate) async fn apply_to_job(
    State(board): Board,
    headers: HeaderMap,
    body: Result<Json<JobApplicationPayload>, JsonRejection>,
) -> Created<JobApplication> {
    let Json(payload) = body?;
    let application = board.apply_to_job(&caller_from_headers(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub(crate) async fn list_applications(
    State(board): Board,
    headers: HeaderMap,
) -> Reply<Vec<JobApplication>> {
    board
        .list_my_applications(&caller_from_headers(&headers))
        .map(Json)
}
