//! One-shot banner messages carried through redirects.
//!
//! Browser forms redirect to `path?notice=..&notice_kind=..` and the page handler
//! hands both values to the template.

use axum::response::Redirect;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Query parameters read by every page handler
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub notice_kind: Option<String>,
}

pub fn notice_url(path: &str, kind: NoticeKind, message: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}notice={}&notice_kind={}",
        path,
        separator,
        urlencoding::encode(message),
        kind.as_str()
    )
}

pub fn redirect_with_notice(path: &str, kind: NoticeKind, message: &str) -> Redirect {
    Redirect::to(&notice_url(path, kind, message))
}
