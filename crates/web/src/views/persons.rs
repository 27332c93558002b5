//! Person management pages.

use domain::{Datasource, Person};
use person_service_lib::{PersonCounts, PersonListing};

use super::{escape, page, path_segment};

/// Combined list of both datasources.
pub fn person_list(listing: &PersonListing) -> String {
    let sections: String = Datasource::ALL
        .iter()
        .map(|&datasource| {
            let people = match datasource {
                Datasource::Primary => &listing.primary,
                Datasource::Secondary => &listing.secondary,
            };
            person_table(datasource, people)
        })
        .collect();

    page("Persons", &sections)
}

fn person_table(datasource: Datasource, people: &[Person]) -> String {
    let rows: String = if people.is_empty() {
        "<tr><td colspan=\"3\">No persons</td></tr>\n".to_string()
    } else {
        people
            .iter()
            .map(|person| {
                let id = path_segment(&person.id);
                format!(
                    "<tr><td>{id}</td><td>{name}</td><td>\
                     <a href=\"/persons/edit/{ds}/{href}\">Edit</a> \
                     <a href=\"/persons/delete/{ds}/{href}\">Delete</a></td></tr>\n",
                    id = escape(&person.id),
                    name = escape(&person.name),
                    ds = datasource,
                    href = escape(&id),
                )
            })
            .collect()
    };

    format!(
        "<section id=\"{ds}\">\n<h2>{title} database</h2>\n<table>\n\
         <thead><tr><th>ID</th><th>Name</th><th></th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n</section>\n",
        ds = datasource,
        title = capitalize(datasource.as_str()),
        rows = rows,
    )
}

/// Empty add forms, one per datasource.
pub fn add_form() -> String {
    let forms: String = Datasource::ALL
        .iter()
        .map(|&datasource| {
            person_form(
                &format!("Add to {} database", datasource),
                &format!("/persons/add/{}", datasource),
                &Person::default(),
                false,
            )
        })
        .collect();

    page("Add person", &forms)
}

/// Edit form for a person from `datasource`.
pub fn edit_form(person: &Person, datasource: Datasource) -> String {
    let form = person_form(
        &format!("Edit {} person", datasource),
        &format!("/persons/edit/{}", datasource),
        person,
        true,
    );

    page("Edit person", &form)
}

fn person_form(legend: &str, action: &str, person: &Person, lock_id: bool) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n<fieldset>\n<legend>{legend}</legend>\n\
         <label>ID <input type=\"text\" name=\"id\" value=\"{id}\" required{readonly}></label>\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n\
         <button type=\"submit\">Save</button>\n</fieldset>\n</form>\n",
        action = escape(action),
        legend = escape(legend),
        id = escape(&person.id),
        name = escape(&person.name),
        readonly = if lock_id { " readonly" } else { "" },
    )
}

/// Routine counts, or the message of the call that failed.
pub fn procedures(outcome: &Result<PersonCounts, String>) -> String {
    let content = match outcome {
        Ok(counts) => format!(
            "<dl>\n\
             <dt>Primary count</dt><dd id=\"primary-count\">{}</dd>\n\
             <dt>Primary count 2</dt><dd id=\"primary-count-2\">{}</dd>\n\
             <dt>Secondary count</dt><dd id=\"secondary-count\">{}</dd>\n\
             <dt>Secondary count 2</dt><dd id=\"secondary-count-2\">{}</dd>\n\
             </dl>\n",
            counts.primary_count,
            counts.primary_count_2,
            counts.secondary_count,
            counts.secondary_count_2,
        ),
        Err(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
    };

    page("Stored procedures", &content)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
