//! Access-token route guard.
//!
//! Checks only that the access-token cookie is *present*, exactly like the
//! client-side route guard it replaces. The token's value is never compared
//! against anything server-side, so this is a navigation convenience, not
//! an authorization control — do not mistake it for one.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use talehub_core::error::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// Returns `true` if a non-empty `cookie_name=value` pair appears in the
/// `Cookie` header value.
fn has_access_cookie(header_value: &str, cookie_name: &str) -> bool {
    header_value.split(';').any(|pair| {
        pair.trim()
            .strip_prefix(cookie_name)
            .and_then(|rest| rest.strip_prefix('='))
            .is_some_and(|token| !token.is_empty())
    })
}

/// Middleware rejecting requests without the access-token cookie.
pub async fn require_access_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.access_token_cookie.as_str();
    let present = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| has_access_cookie(value, cookie_name));

    if present {
        next.run(request).await
    } else {
        ApiError(DomainError::Unauthorized("missing access token".into())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_cookie_among_others() {
        assert!(has_access_cookie(
            "theme=dark; talehub-access-token=AbCd1234; lang=en",
            "talehub-access-token"
        ));
    }

    #[test]
    fn test_rejects_empty_and_missing_values() {
        assert!(!has_access_cookie(
            "talehub-access-token=",
            "talehub-access-token"
        ));
        assert!(!has_access_cookie("theme=dark", "talehub-access-token"));
    }

    #[test]
    fn test_name_must_match_exactly() {
        assert!(!has_access_cookie(
            "talehub-access-token-old=x",
            "talehub-access-token"
        ));
    }
}
