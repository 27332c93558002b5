//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::person_handler::PersonForm;
use domain::{Datasource, Person};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::demo_handler::demo,
        crate::handlers::person_handler::list_persons,
        crate::handlers::person_handler::show_add_form,
        crate::handlers::person_handler::add_person,
        crate::handlers::person_handler::show_edit_form,
        crate::handlers::person_handler::update_person,
        crate::handlers::person_handler::delete_person,
        crate::handlers::person_handler::show_procedures,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            Datasource,
            Person,
            PersonForm,
        )
    ),
    tags(
        (name = "Summary", description = "Stored routine counts"),
        (name = "Persons", description = "Person management pages"),
        (name = "Health", description = "Datasource connectivity"),
    )
)]
pub struct ApiDoc;
