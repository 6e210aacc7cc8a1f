//! kcat collaborator for the produce/consume round-trip

use std::fs::File;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::common::{Error, Result};

use super::exec::{describe_status, run_tool};

/// Publish the contents of a local file to a topic
pub async fn produce(bin: &Path, broker: &str, topic: &str, payload_file: &Path) -> Result<()> {
    let args = produce_args(broker, topic, payload_file);
    let status = run_tool(bin, &args).await.map_err(|e| Error::Produce {
        topic: topic.to_string(),
        detail: format!("kcat failed to execute: {e}"),
    })?;

    if !status.success() {
        return Err(Error::Produce {
            topic: topic.to_string(),
            detail: describe_status(status),
        });
    }
    Ok(())
}

/// Consume a topic to end-of-stream, redirecting stdout into a local file
///
/// `-e` makes kcat exit once no further records arrive, so this is bounded.
pub async fn consume_to_file(
    bin: &Path,
    broker: &str,
    topic: &str,
    output_file: &Path,
) -> Result<()> {
    let output = File::create(output_file).map_err(|e| Error::Consume {
        topic: topic.to_string(),
        detail: format!("failed to create '{}': {e}", output_file.display()),
    })?;

    let args = consume_args(broker, topic);
    tracing::debug!("Running: {} {}", bin.display(), args.join(" "));

    let status = Command::new(bin)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(output))
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::Consume {
            topic: topic.to_string(),
            detail: format!("kcat failed to execute: {e}"),
        })?;

    if !status.success() {
        return Err(Error::Consume {
            topic: topic.to_string(),
            detail: describe_status(status),
        });
    }
    Ok(())
}

fn produce_args(broker: &str, topic: &str, payload_file: &Path) -> Vec<String> {
    vec![
        "-b".into(),
        broker.into(),
        "-t".into(),
        topic.into(),
        "-P".into(),
        payload_file.display().to_string(),
    ]
}

fn consume_args(broker: &str, topic: &str) -> Vec<String> {
    vec![
        "-b".into(),
        broker.into(),
        "-t".into(),
        topic.into(),
        "-C".into(),
        "-e".into(),
    ]
}
