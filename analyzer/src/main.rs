use analyzer::{AnalysisRequest, ClientConfig, Exchange, analyze};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("analyzer=info".parse()?))
        .init();

    tracing::info!("Connecting to exchange...");
    let exchange = Exchange::connect(ClientConfig::default()).await?;

    // Top BTC-quoted symbols by 24h volume
    let request = AnalysisRequest {
        quote_assets: Some(vec!["BTC".to_string()]),
        order_by: Some("volume[desc]".to_string()),
        fields: Some(vec!["symbol".to_string(), "volume".to_string()]),
        ..Default::default()
    };

    let records = analyze(&exchange, &request).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
