//! Issue controller: list, details, create, edit, delete.
//!
//! Every handler runs its store work inside one unit of work via
//! [`Database::call`](crate::storage::Database::call). Successful writes end
//! with a `303 See Other` back to the list.

use super::AppState;
use super::antiforgery::verify_token;
use super::error::AppError;
use crate::error::TrackingError;
use crate::format::{self, FormMode};
use crate::model::{IssueForm, filter_issues};
use crate::storage::IssueRepository;
use crate::validation::IssueValidator;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{debug, info};

const LIST_PATH: &str = "/Issue";

type HandlerResult = Result<Response, AppError>;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
}

/// `GET /Issue`
pub async fn index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> HandlerResult {
    let issues = state.db.call(|uow| uow.issues().get_all()).await?;
    let issues = filter_issues(issues, query.search_string.as_deref());
    debug!(count = issues.len(), search = ?query.search_string, "listing issues");
    Ok(Html(format::list_page(&issues, query.search_string.as_deref())).into_response())
}

/// `GET /Issue/Details/{id}`
pub async fn details(State(state): State<AppState>, id: Option<Path<i64>>) -> HandlerResult {
    let Some(Path(id)) = id else {
        return Err(AppError::NotFound);
    };
    let issue = state
        .db
        .call(move |uow| uow.issues().get_by_id(id))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(format::details_page(&issue)).into_response())
}

/// `GET /Issue/Create`
pub async fn create_form(State(state): State<AppState>) -> Html<String> {
    Html(format::form_page(
        FormMode::Create,
        &IssueForm::default(),
        &[],
        &state.form_token,
    ))
}

/// `POST /Issue/Create`
pub async fn create(State(state): State<AppState>, Form(form): Form<IssueForm>) -> HandlerResult {
    verify_token(&state.form_token, form.token.as_deref())?;

    if let Err(errors) = IssueValidator::validate(&form) {
        debug!(errors = errors.len(), "create form rejected");
        return Ok(Html(format::form_page(
            FormMode::Create,
            &form,
            &errors,
            &state.form_token,
        ))
        .into_response());
    }

    // Identity is always assigned by the store on create.
    let mut issue = form.to_issue();
    issue.id = 0;

    let id = state
        .db
        .call(move |uow| {
            uow.issues().add(&mut issue)?;
            uow.complete()?;
            Ok(issue.id)
        })
        .await?;
    info!(id, "issue created");
    Ok(Redirect::to(LIST_PATH).into_response())
}

/// `GET /Issue/Edit/{id}`
pub async fn edit_form(State(state): State<AppState>, id: Option<Path<i64>>) -> HandlerResult {
    let Some(Path(id)) = id else {
        return Err(AppError::NotFound);
    };
    let issue = state
        .db
        .call(move |uow| uow.issues().get_by_id(id))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(format::form_page(
        FormMode::Edit,
        &IssueForm::from_issue(&issue),
        &[],
        &state.form_token,
    ))
    .into_response())
}

/// `POST /Issue/Edit/{id}`
///
/// The path id must agree with the posted `Id`.
pub async fn edit(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
    Form(form): Form<IssueForm>,
) -> HandlerResult {
    verify_token(&state.form_token, form.token.as_deref())?;

    let Some(Path(id)) = id else {
        return Err(AppError::NotFound);
    };
    if form.parsed_id() != Some(id) {
        debug!(id, posted = ?form.id, "edit id mismatch");
        return Err(AppError::NotFound);
    }

    if let Err(errors) = IssueValidator::validate(&form) {
        debug!(id, errors = errors.len(), "edit form rejected");
        return Ok(Html(format::form_page(
            FormMode::Edit,
            &form,
            &errors,
            &state.form_token,
        ))
        .into_response());
    }

    let issue = form.to_issue();
    state
        .db
        .call(move |uow| {
            let issues = uow.issues();
            match issues.update(&issue) {
                Ok(()) => {
                    uow.complete()?;
                    Ok(())
                }
                Err(err) => {
                    if issues.exists(issue.id)? {
                        Err(err)
                    } else {
                        Err(TrackingError::IssueNotFound { id: issue.id })
                    }
                }
            }
        })
        .await?;
    info!(id, "issue updated");
    Ok(Redirect::to(LIST_PATH).into_response())
}

/// `GET /Issue/Delete/{id}`
pub async fn delete_form(State(state): State<AppState>, id: Option<Path<i64>>) -> HandlerResult {
    let Some(Path(id)) = id else {
        return Err(AppError::NotFound);
    };
    let issue = state
        .db
        .call(move |uow| uow.issues().get_by_id(id))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(format::delete_page(&issue, &state.form_token)).into_response())
}

/// `POST /Issue/Delete/{id}`
///
/// Deleting an id that is already gone still redirects to the list.
pub async fn delete(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
    Form(form): Form<IssueForm>,
) -> HandlerResult {
    verify_token(&state.form_token, form.token.as_deref())?;

    let Some(Path(id)) = id else {
        return Err(AppError::NotFound);
    };
    let rows = state
        .db
        .call(move |uow| {
            uow.issues().delete(id)?;
            uow.complete()
        })
        .await?;
    info!(id, rows, "issue deleted");
    Ok(Redirect::to(LIST_PATH).into_response())
}
