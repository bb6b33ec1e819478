//! CLI runner - executes the real roomcraft binary
//!
//! Each run gets its own working directory and a scrubbed environment so a
//! developer's config file or API key never leaks into a test.

use std::path::Path;
use std::process::Output;

use anyhow::Result;
use tokio::process::Command;

/// Run `roomcraft` with `args` in `dir`, pointing it at `base_url`
pub async fn run_cli(
    dir: &Path,
    base_url: &str,
    api_key: Option<&str>,
    args: &[&str],
) -> Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_roomcraft"));
    command
        .args(args)
        .current_dir(dir)
        .env_remove("GEMINI_API_KEY")
        .env_remove("ROOMCRAFT_API_KEY")
        .env("ROOMCRAFT_BASE_URL", base_url)
        .env("ROOMCRAFT_TIMEOUT_SECS", "10")
        .env("RUST_LOG", "roomcraft=warn");

    if let Some(key) = api_key {
        command.env("ROOMCRAFT_API_KEY", key);
    }

    Ok(command.output().await?)
}
