use crate::domain::model::{HealthStatus, InvocationContext, ResponseEnvelope};
use crate::domain::ports::Responder;

pub const SERVICE_NAME: &str = "Connect Agent API";
pub const PLATFORM: &str = "Vercel Serverless";

/// Liveness endpoint. Always healthy: if this runs, the function is up.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthResponder;

impl HealthResponder {
    pub fn status() -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            platform: PLATFORM.to_string(),
        }
    }

    fn body() -> String {
        // 固定結構的序列化不會失敗；保留字面值作為後備
        serde_json::to_string(&Self::status()).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize health status: {}", e);
            format!(
                r#"{{"status":"healthy","service":"{}","platform":"{}"}}"#,
                SERVICE_NAME, PLATFORM
            )
        })
    }
}

impl Responder for HealthResponder {
    fn respond(&self, _request: &serde_json::Value, _context: &InvocationContext) -> ResponseEnvelope {
        ResponseEnvelope::ok(
            [
                ("Content-Type", "application/json"),
                ("Access-Control-Allow-Origin", "*"),
            ],
            Self::body(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_body_field_order() {
        let response = HealthResponder.respond(&serde_json::json!({}), &InvocationContext::default());

        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            response.body,
            r#"{"status":"healthy","service":"Connect Agent API","platform":"Vercel Serverless"}"#
        );
    }
}
