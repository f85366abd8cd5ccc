//! Page template engine using Jinja2 syntax.
//!
//! Templates live in `templates/pages/` and are loaded once on first use.

use minijinja::{Environment, Value};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the project root
const TEMPLATE_DIR: &str = "templates/pages";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    let template_path = Path::new(TEMPLATE_DIR);
    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    } else {
        tracing::warn!("Template directory '{}' does not exist", TEMPLATE_DIR);
    }

    env
}

/// Recursively load all .html templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "html") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        let template_name = relative.to_string_lossy().replace('\\', "/");
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                // Templates live for the whole process, leaking gives them 'static lifetimes
                let static_name: &'static str = Box::leak(template_name.clone().into_boxed_str());
                let static_content: &'static str = Box::leak(content.into_boxed_str());
                if let Err(e) = env.add_template(static_name, static_content) {
                    tracing::warn!("Failed to load template {}: {}", template_name, e);
                } else {
                    tracing::debug!("Loaded template: {}", template_name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", template_name, e),
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context.
///
/// # Example
/// ```ignore
/// let html = render_page("index.html", minijinja::context! { active_page => "index" })?;
/// ```
pub fn render_page(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_missing_template() {
        let result = render_page("nonexistent.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_page_templates_load() {
        for name in [
            "index.html",
            "educations.html",
            "riskreport.html",
            "eventreport.html",
            "reports.html",
            "precautions.html",
            "login.html",
            "register.html",
            "profile.html",
        ] {
            assert!(template_exists(name), "missing template {}", name);
        }
    }

    #[test]
    fn test_render_notice_is_escaped() {
        let html = render_page(
            "login.html",
            context! { active_page => "login", notice => "<b>hi</b>" },
        )
        .unwrap();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }
}
