#[cfg(feature = "lambda")]
use connect_devkit::utils::logger;
#[cfg(feature = "lambda")]
use connect_devkit::{InvocationContext, LambdaConfig, Responder, ResponderKind, ResponseEnvelope};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(
    event: LambdaEvent<serde_json::Value>,
    responder: ResponderKind,
) -> Result<ResponseEnvelope, Error> {
    let context = InvocationContext {
        request_id: Some(event.context.request_id.clone()),
    };

    let response = responder.respond(&event.payload, &context);
    tracing::info!(
        request_id = %event.context.request_id,
        responder = %responder,
        status = response.status_code,
        "Handled request"
    );
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    tracing::info!("Serving {} responder", config.responder);

    let responder = config.responder;
    run(service_fn(move |event| function_handler(event, responder))).await
}
