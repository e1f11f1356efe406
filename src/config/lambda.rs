use crate::core::cors::CorsResponder;
use crate::core::health::HealthResponder;
use crate::domain::model::{InvocationContext, ResponseEnvelope};
use crate::domain::ports::Responder;
use crate::utils::error::{DevkitError, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which handler a serverless deployment serves. Each function is deployed
/// separately, so this is fixed per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderKind {
    Cors,
    Health,
}

impl FromStr for ResponderKind {
    type Err = DevkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cors" | "_cors" | "options" => Ok(Self::Cors),
            "health" => Ok(Self::Health),
            other => Err(DevkitError::InvalidConfigValueError {
                field: "RESPONDER".to_string(),
                value: other.to_string(),
                reason: "Expected one of: cors, health".to_string(),
            }),
        }
    }
}

impl fmt::Display for ResponderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cors => f.write_str("cors"),
            Self::Health => f.write_str("health"),
        }
    }
}

impl Responder for ResponderKind {
    fn respond(&self, request: &serde_json::Value, context: &InvocationContext) -> ResponseEnvelope {
        match self {
            Self::Cors => CorsResponder.respond(request, context),
            Self::Health => HealthResponder.respond(request, context),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub responder: ResponderKind,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let responder = match lookup("RESPONDER") {
            Some(value) => value.parse()?,
            None => ResponderKind::Health,
        };
        Ok(Self { responder })
    }
}
