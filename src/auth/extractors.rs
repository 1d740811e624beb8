use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use bson::oid::ObjectId;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

use super::{jwt::JwtKeys, repo};

/// The authenticated caller, resolved to a live user record.
///
/// Every failure path — missing header, bad scheme, forged or expired
/// token, subject that is not a valid id, subject with no stored user —
/// rejects with the same 401 so a caller cannot probe which stage
/// failed. The distinctions live only in the logs.
pub struct CurrentUser {
    pub id: ObjectId,
    pub email: String,
    pub name: Option<String>,
}

/// Pull the token out of an Authorization header value. The auth scheme
/// is case-insensitive per RFC 7235.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::InvalidToken)?;

        let token = bearer_token(auth).ok_or(ApiError::InvalidToken)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|reason| {
            warn!(%reason, "token rejected");
            ApiError::InvalidToken
        })?;

        // A subject that is not a well-formed id never reaches the store.
        let subject = ObjectId::parse_str(&claims.sub).map_err(|_| {
            warn!("token subject is not a valid object id");
            ApiError::InvalidToken
        })?;

        let user = repo::find_by_id(&state.db, subject)
            .await
            .map_err(ApiError::store)?
            .ok_or_else(|| {
                warn!(subject = %subject, "token subject has no user record");
                ApiError::InvalidToken
            })?;

        Ok(CurrentUser {
            id: subject,
            email: user.email,
            name: user.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("BEARER abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
        assert_eq!(bearer_token(""), None);
    }
}
