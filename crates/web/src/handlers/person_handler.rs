//! Person management handlers.
//!
//! Thin adapters over the repository bound to the datasource named in the
//! path. Every write redirects back to the list.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::AppResult;
use domain::{Datasource, Person};

use crate::extractors::ValidatedForm;
use crate::state::AppState;
use crate::views;

/// Where every write and every missed edit lookup lands
pub const PERSONS_PATH: &str = "/persons";

/// Submitted add/edit form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PersonForm {
    /// Caller-assigned identifier
    #[validate(
        length(min = 1, message = "Id is required"),
        custom(function = "validate_addressable_id")
    )]
    #[schema(example = "1")]
    pub id: String,
    /// Display name
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: String,
}

/// `.` and `..` are dot segments; browsers drop them from edit/delete links.
fn validate_addressable_id(id: &str) -> Result<(), ValidationError> {
    if id == "." || id == ".." {
        return Err(ValidationError::new("dot_segment")
            .with_message("Id cannot be '.' or '..'".into()));
    }
    Ok(())
}

impl From<PersonForm> for Person {
    fn from(form: PersonForm) -> Self {
        Person::new(form.id, form.name)
    }
}

/// Create person routes
pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_persons))
        .route("/add", get(show_add_form))
        .route("/add/:datasource", post(add_person))
        .route("/edit/:datasource", post(update_person))
        .route("/edit/:datasource/:id", get(show_edit_form))
        .route("/delete/:datasource/:id", get(delete_person))
        .route("/procedures", get(show_procedures))
}

/// List persons from both datasources
#[utoipa::path(
    get,
    path = "/persons",
    tag = "Persons",
    responses(
        (status = 200, description = "Combined list view", body = String, content_type = "text/html"),
        (status = 500, description = "A datasource failed")
    )
)]
pub async fn list_persons(State(state): State<AppState>) -> AppResult<Html<String>> {
    let listing = state.directory.list_all().await?;
    Ok(Html(views::person_list(&listing)))
}

/// Show empty add forms for both datasources
#[utoipa::path(
    get,
    path = "/persons/add",
    tag = "Persons",
    responses(
        (status = 200, description = "Add form view", body = String, content_type = "text/html")
    )
)]
pub async fn show_add_form() -> Html<String> {
    Html(views::add_form())
}

/// Add a person to a datasource (insert or overwrite by id)
#[utoipa::path(
    post,
    path = "/persons/add/{datasource}",
    tag = "Persons",
    params(
        ("datasource" = Datasource, Path, description = "Target datasource")
    ),
    request_body(content = PersonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved, redirect to the list"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_person(
    State(state): State<AppState>,
    Path(datasource): Path<Datasource>,
    ValidatedForm(form): ValidatedForm<PersonForm>,
) -> AppResult<Redirect> {
    save(&state, datasource, form).await
}

/// Show the edit form, or go back to the list when the id is unknown
#[utoipa::path(
    get,
    path = "/persons/edit/{datasource}/{id}",
    tag = "Persons",
    params(
        ("datasource" = Datasource, Path, description = "Datasource holding the person"),
        ("id" = String, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Edit form view", body = String, content_type = "text/html"),
        (status = 303, description = "Unknown id, redirect to the list")
    )
)]
pub async fn show_edit_form(
    State(state): State<AppState>,
    Path((datasource, id)): Path<(Datasource, String)>,
) -> AppResult<Response> {
    let person = state.directory.repository(datasource).find_by_id(&id).await?;

    match person {
        Some(person) => Ok(Html(views::edit_form(&person, datasource)).into_response()),
        None => {
            tracing::debug!(%datasource, id = %id, "Edit requested for unknown person");
            Ok(Redirect::to(PERSONS_PATH).into_response())
        }
    }
}

/// Overwrite a person (an unknown id creates a new record)
#[utoipa::path(
    post,
    path = "/persons/edit/{datasource}",
    tag = "Persons",
    params(
        ("datasource" = Datasource, Path, description = "Target datasource")
    ),
    request_body(content = PersonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved, redirect to the list"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(datasource): Path<Datasource>,
    ValidatedForm(form): ValidatedForm<PersonForm>,
) -> AppResult<Redirect> {
    save(&state, datasource, form).await
}

/// Delete a person, whether or not it exists
#[utoipa::path(
    get,
    path = "/persons/delete/{datasource}/{id}",
    tag = "Persons",
    params(
        ("datasource" = Datasource, Path, description = "Datasource holding the person"),
        ("id" = String, Path, description = "Person ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete_person(
    State(state): State<AppState>,
    Path((datasource, id)): Path<(Datasource, String)>,
) -> AppResult<Redirect> {
    state.directory.repository(datasource).delete_by_id(&id).await?;
    Ok(Redirect::to(PERSONS_PATH))
}

/// Run the count routines and show their results or the failure message
#[utoipa::path(
    get,
    path = "/persons/procedures",
    tag = "Persons",
    responses(
        (status = 200, description = "Counts, or the error raised by a routine", body = String, content_type = "text/html")
    )
)]
pub async fn show_procedures(State(state): State<AppState>) -> Html<String> {
    let outcome = state.directory.counts().await.map_err(|e| {
        tracing::warn!(error = %e, "Stored procedure call failed");
        format!("Error executing procedures: {}", e)
    });

    Html(views::procedures(&outcome))
}

async fn save(state: &AppState, datasource: Datasource, form: PersonForm) -> AppResult<Redirect> {
    state
        .directory
        .repository(datasource)
        .save(Person::from(form))
        .await?;
    Ok(Redirect::to(PERSONS_PATH))
}
