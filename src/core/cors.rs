use crate::domain::model::{InvocationContext, ResponseEnvelope};
use crate::domain::ports::Responder;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
/// One day, in seconds.
pub const MAX_AGE: &str = "86400";

/// Answers CORS preflight (OPTIONS) requests with a fixed permissive policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsResponder;

impl Responder for CorsResponder {
    fn respond(&self, _request: &serde_json::Value, _context: &InvocationContext) -> ResponseEnvelope {
        ResponseEnvelope::ok(
            [
                ("Access-Control-Allow-Origin", ALLOW_ORIGIN),
                ("Access-Control-Allow-Methods", ALLOW_METHODS),
                ("Access-Control-Allow-Headers", ALLOW_HEADERS),
                ("Access-Control-Max-Age", MAX_AGE),
            ],
            "",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_headers() {
        let response = CorsResponder.respond(&serde_json::Value::Null, &InvocationContext::default());

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers.len(), 4);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            response.header("Access-Control-Allow-Methods"),
            Some("GET, POST, OPTIONS")
        );
        assert_eq!(
            response.header("Access-Control-Allow-Headers"),
            Some("Content-Type, Authorization")
        );
        assert_eq!(response.header("Access-Control-Max-Age"), Some("86400"));
        assert!(response.body.is_empty());
    }
}
