pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::LauncherArgs;

pub use adapters::TokioSpawner;
pub use config::lambda::{LambdaConfig, ResponderKind};
pub use config::LauncherConfig;
pub use core::cors::CorsResponder;
pub use core::health::HealthResponder;
pub use core::launcher::{DevLauncher, LaunchOutcome, LaunchPlan, LaunchReport};
pub use domain::model::{InvocationContext, ResponseEnvelope};
pub use domain::ports::Responder;
pub use utils::error::{DevkitError, Result};
