//! Page renderers.

use super::html::{APP_NAME, escape_html, layout, token_input};
use crate::error::ValidationError;
use crate::model::{Issue, IssueForm};

/// Which issue form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    const fn heading(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Edit",
        }
    }

    const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Save",
        }
    }
}

const FIELDS: [&str; 5] = ["Title", "Description", "Status", "Assignment", "Priority"];

fn field_value<'a>(issue: &'a Issue, field: &str) -> &'a str {
    match field {
        "Title" => &issue.title,
        "Description" => &issue.description,
        "Status" => &issue.status,
        "Assignment" => &issue.assignment,
        "Priority" => &issue.priority,
        _ => "",
    }
}

fn form_value<'a>(form: &'a IssueForm, field: &str) -> &'a str {
    let value = match field {
        "Title" => form.title.as_deref(),
        "Description" => form.description.as_deref(),
        "Status" => form.status.as_deref(),
        "Assignment" => form.assignment.as_deref(),
        "Priority" => form.priority.as_deref(),
        _ => None,
    };
    value.unwrap_or("")
}

/// Definition list shared by the details and delete pages.
fn issue_definition_list(issue: &Issue) -> String {
    let rows: String = FIELDS
        .iter()
        .map(|field| {
            format!(
                "<dt>{field}</dt>\n<dd>{}</dd>\n",
                escape_html(field_value(issue, field))
            )
        })
        .collect();
    format!("<dl class=\"row\">\n{rows}</dl>\n")
}

#[must_use]
pub fn home_page() -> String {
    let body = format!(
        r#"<div class="text-center">
<h1>Welcome to {APP_NAME}</h1>
<p>Keep track of issues: create them, assign them, and close them out.</p>
<p><a href="/Issue">View all issues</a> or <a href="/Issue/Create">report a new one</a>.</p>
</div>"#
    );
    layout("Home", &body)
}

#[must_use]
pub fn privacy_page() -> String {
    layout(
        "Privacy Policy",
        "<h1>Privacy Policy</h1>\n<p>Issues are stored in a local database and are not shared with anyone.</p>",
    )
}

/// Generic error page.
///
/// `request_id` identifies the failed request in the logs; `code` is the
/// machine-readable error code when one is known.
#[must_use]
pub fn error_page(request_id: Option<&str>, code: Option<&str>) -> String {
    let mut body = String::from(
        "<h1 class=\"text-danger\">Error.</h1>\n<h2 class=\"text-danger\">An error occurred while processing your request.</h2>\n",
    );
    if let Some(request_id) = request_id.filter(|id| !id.is_empty()) {
        body.push_str(&format!(
            "<p><strong>Request ID:</strong> <code>{}</code></p>\n",
            escape_html(request_id)
        ));
    }
    if let Some(code) = code {
        body.push_str(&format!(
            "<p><strong>Error code:</strong> <code>{}</code></p>\n",
            escape_html(code)
        ));
    }
    layout("Error", &body)
}

#[must_use]
pub fn not_found_page() -> String {
    layout(
        "Not Found",
        "<h1>Not Found</h1>\n<p>The issue you asked for does not exist.</p>\n<p><a href=\"/Issue\">Back to List</a></p>",
    )
}

#[must_use]
pub fn bad_request_page(message: &str) -> String {
    let body = format!(
        "<h1>Bad Request</h1>\n<p>{}</p>\n<p><a href=\"/Issue\">Back to List</a></p>",
        escape_html(message)
    );
    layout("Bad Request", &body)
}

fn issue_row(issue: &Issue) -> String {
    let cells: String = FIELDS
        .iter()
        .map(|field| format!("<td>{}</td>", escape_html(field_value(issue, field))))
        .collect();
    let id = issue.id;
    format!(
        r#"<tr>{cells}<td><a href="/Issue/Edit/{id}">Edit</a> | <a href="/Issue/Details/{id}">Details</a> | <a href="/Issue/Delete/{id}">Delete</a></td></tr>
"#
    )
}

/// Issue table with the search box.
///
/// `search` is echoed back into the search box.
#[must_use]
pub fn list_page(issues: &[Issue], search: Option<&str>) -> String {
    let headers: String = FIELDS.iter().map(|field| format!("<th>{field}</th>")).collect();
    let rows: String = issues.iter().map(issue_row).collect();
    let body = format!(
        r#"<h1>Issues</h1>
<p><a href="/Issue/Create">Create New</a></p>
<form action="/Issue" method="get">
<p>Find: <input type="text" name="searchString" value="{search}" />
<input type="submit" value="Search" /> <a href="/Issue">Back to Full List</a></p>
</form>
<table class="table">
<thead>
<tr>{headers}<th></th></tr>
</thead>
<tbody>
{rows}</tbody>
</table>
"#,
        search = escape_html(search.unwrap_or(""))
    );
    layout("Issues", &body)
}

#[must_use]
pub fn details_page(issue: &Issue) -> String {
    let body = format!(
        "<h1>Details</h1>\n<div>\n<h4>Issue</h4>\n<hr />\n{}</div>\n<div>\n<a href=\"/Issue/Edit/{}\">Edit</a> | <a href=\"/Issue\">Back to List</a>\n</div>",
        issue_definition_list(issue),
        issue.id
    );
    layout("Details", &body)
}

fn form_field(form: &IssueForm, field: &str, errors: &[ValidationError]) -> String {
    let messages: String = errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| {
            format!(
                "<span class=\"field-validation-error\">{}</span>\n",
                escape_html(&e.message)
            )
        })
        .collect();
    format!(
        r#"<div class="form-group">
<label for="{field}">{field}</label>
<input id="{field}" name="{field}" type="text" value="{}" />
{messages}</div>
"#,
        escape_html(form_value(form, field))
    )
}

/// Create or edit form.
///
/// `form` values are shown exactly as given; `errors` are listed in a
/// summary and next to the field they belong to.
#[must_use]
pub fn form_page(mode: FormMode, form: &IssueForm, errors: &[ValidationError], token: &str) -> String {
    let heading = mode.heading();
    let action = match (mode, form.id.as_deref()) {
        (FormMode::Edit, Some(id)) => format!("/Issue/Edit/{}", escape_html(id)),
        (FormMode::Edit, None) => "/Issue/Edit".to_string(),
        (FormMode::Create, _) => "/Issue/Create".to_string(),
    };

    let summary = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|e| format!("<li>{}</li>\n", escape_html(&e.message)))
            .collect();
        format!("<div class=\"validation-summary-errors\" role=\"alert\"><ul>\n{items}</ul></div>\n")
    };
    let id_input = match mode {
        FormMode::Edit => format!(
            "<input type=\"hidden\" name=\"Id\" value=\"{}\" />\n",
            escape_html(form.id.as_deref().unwrap_or(""))
        ),
        FormMode::Create => String::new(),
    };
    let fields: String = FIELDS
        .iter()
        .map(|field| form_field(form, field, errors))
        .collect();

    let body = format!(
        r#"<h1>{heading}</h1>
<h4>Issue</h4>
<hr />
<form action="{action}" method="post">
{token}
{summary}{id_input}{fields}<div class="form-group"><input type="submit" value="{submit}" /></div>
</form>
<div><a href="/Issue">Back to List</a></div>"#,
        token = token_input(token),
        submit = mode.submit_label()
    );
    layout(heading, &body)
}

/// Delete confirmation.
#[must_use]
pub fn delete_page(issue: &Issue, token: &str) -> String {
    let body = format!(
        r#"<h1>Delete</h1>
<h3>Are you sure you want to delete this?</h3>
<div>
<h4>Issue</h4>
<hr />
{details}<form action="/Issue/Delete/{id}" method="post">
{token}
<input type="submit" value="Delete" /> | <a href="/Issue">Back to List</a>
</form>
</div>"#,
        details = issue_definition_list(issue),
        id = issue.id,
        token = token_input(token)
    );
    layout("Delete", &body)
}
