use serde_json::json;

use crate::auth::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

pub fn handle(password: &str, cost: Option<u32>, output_format: OutputFormat) -> anyhow::Result<()> {
    let cost = cost.unwrap_or(config::config().security.bcrypt_cost);
    let hash = hash_password(password, cost)?;

    match output_format {
        OutputFormat::Text => println!("{}", hash),
        OutputFormat::Json => output_success(
            &output_format,
            "Password hashed",
            Some(json!({ "hash": hash, "cost": cost })),
        )?,
    }
    Ok(())
}
