use std::sync::Arc;

use console_operator::{context_data::ContextData, controller_console, model::Error};
use kube::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let version: &str = env!("CARGO_PKG_VERSION");
    info!("Starting console-operator {}", version);
    let client: Client = Client::try_default().await?;
    let context_data: Arc<ContextData> = Arc::new(ContextData::new(client.clone())?);
    info!(
        "Operator instance {}/{} reconciling console configuration",
        context_data.config.instance.namespace, context_data.config.instance.name
    );
    controller_console::run(client, context_data).await;
    info!("Controller Console exited");
    Ok(())
}
