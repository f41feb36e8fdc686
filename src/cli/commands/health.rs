use std::time::Duration;

use anyhow::Context;
use serde_json::{json, Value};

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

pub async fn handle(base_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        output_success(
            &output_format,
            &format!("{} is healthy", base_url),
            Some(json!({ "status": status.as_u16(), "health": body })),
        )
    } else {
        output_error(
            &output_format,
            &format!("{} responded {}", base_url, status),
            Some("UNHEALTHY"),
        )?;
        anyhow::bail!("health check failed with status {}", status)
    }
}
