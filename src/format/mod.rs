//! HTML rendering for `tracking`.
//!
//! Pages are plain strings built from small helpers:
//! - [`html`] - escaping and the shared page layout
//! - [`pages`] - one function per page the web layer serves
//!
//! Every piece of stored or submitted text passes through [`escape_html`]
//! before it reaches the page.

pub mod html;
mod pages;

pub use html::{escape_html, layout};
pub use pages::{
    FormMode, bad_request_page, delete_page, details_page, error_page, form_page, home_page,
    list_page, not_found_page, privacy_page,
};
