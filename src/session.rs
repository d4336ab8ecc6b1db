use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpRequest};

use crate::errors::AppError;

pub const SESSION_HEADER: &str = "x-session-id";
pub const DEFAULT_SESSION: &str = "anonymous";
const MAX_SESSION_ID_LEN: usize = 128;

/// History scope for the request, taken from the `X-Session-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn parse(header: Option<&str>) -> Result<Self, AppError> {
        let value = header.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Ok(SessionId(DEFAULT_SESSION.to_string()));
        }
        if value.len() > MAX_SESSION_ID_LEN {
            return Err(AppError::ValidationError(format!(
                "session id must be at most {} characters",
                MAX_SESSION_ID_LEN
            )));
        }
        Ok(SessionId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let header = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok());

        ready(SessionId::parse(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_header_uses_default_session() {
        assert_eq!(SessionId::parse(None).unwrap().as_str(), DEFAULT_SESSION);
        assert_eq!(SessionId::parse(Some("  ")).unwrap().as_str(), DEFAULT_SESSION);
    }

    #[test]
    fn header_value_is_trimmed() {
        assert_eq!(SessionId::parse(Some(" tab-42 ")).unwrap().as_str(), "tab-42");
    }

    #[test]
    fn overlong_session_id_is_rejected() {
        let long = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(matches!(
            SessionId::parse(Some(&long)),
            Err(AppError::ValidationError(_))
        ));
    }
}
