//! Server-rendered HTML pages.
//!
//! Templates are stored in `templates/pages/` and use Jinja2 syntax.

pub mod engine;

pub use engine::render_page;
