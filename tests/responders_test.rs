use connect_devkit::{
    CorsResponder, HealthResponder, InvocationContext, Responder, ResponseEnvelope,
};
use serde_json::{json, Value};

fn sample_requests() -> Vec<Value> {
    vec![
        Value::Null,
        json!({}),
        json!({"httpMethod": "OPTIONS", "path": "/api/ask"}),
        json!({"httpMethod": "GET", "headers": {"Origin": "https://example.com"}}),
        json!([1, 2, 3]),
        json!("not even an object"),
    ]
}

fn contexts() -> Vec<InvocationContext> {
    vec![
        InvocationContext::default(),
        InvocationContext {
            request_id: Some("req-123".to_string()),
        },
    ]
}

#[test]
fn test_cors_response_for_any_input() {
    for request in sample_requests() {
        for context in contexts() {
            let response = CorsResponder.respond(&request, &context);

            assert_eq!(response.status_code, 200);
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
            assert_eq!(response.body, "");
        }
    }
}

#[test]
fn test_health_response_for_any_input() {
    for request in sample_requests() {
        for context in contexts() {
            let response = HealthResponder.respond(&request, &context);

            assert_eq!(response.status_code, 200);
            assert_eq!(response.header("Content-Type"), Some("application/json"));
            assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));

            let body: Value = serde_json::from_str(&response.body).unwrap();
            assert_eq!(
                body,
                json!({
                    "status": "healthy",
                    "service": "Connect Agent API",
                    "platform": "Vercel Serverless"
                })
            );
        }
    }
}

#[test]
fn test_responses_are_byte_identical_across_invocations() {
    let responders: [&dyn Responder; 2] = [&CorsResponder, &HealthResponder];

    for responder in responders {
        let first = serde_json::to_vec(
            &responder.respond(&Value::Null, &InvocationContext::default()),
        )
        .unwrap();

        for request in sample_requests() {
            for context in contexts() {
                for _ in 0..3 {
                    let again = serde_json::to_vec(&responder.respond(&request, &context)).unwrap();
                    assert_eq!(first, again);
                }
            }
        }
    }
}

#[test]
fn test_envelope_wire_format() {
    let response = CorsResponder.respond(&Value::Null, &InvocationContext::default());
    let wire: Value = serde_json::to_value(&response).unwrap();

    assert_eq!(wire["statusCode"], json!(200));
    assert_eq!(wire["body"], json!(""));
    assert_eq!(wire["headers"]["Access-Control-Max-Age"], json!("86400"));

    let parsed: ResponseEnvelope = serde_json::from_value(wire).unwrap();
    assert_eq!(parsed, response);
}
