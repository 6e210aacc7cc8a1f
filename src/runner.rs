//! Sequential tutorial orchestration
//!
//! Executes the documented getting-started steps in order. Control flow is
//! strictly linear; the only concurrency is the background port-forward,
//! which is owned by a guard so it is terminated on every exit path. The
//! two local files of the round-trip check are owned by a second guard
//! with the same guarantee.

use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;

use crate::common::{Config, Error, Result};
use crate::install::{self, Mode};
use crate::tools::{kcat, Kubectl};

/// Manifest file names, fixed by convention
const ZOOKEEPER_MANIFEST: &str = "zookeeper.yaml";
const KAFKA_ZNODE_MANIFEST: &str = "kafka-znode.yaml";
const KAFKA_MANIFEST: &str = "kafka.yaml";

/// Run the full tutorial against the current cluster
pub async fn run(mode: Mode, config: &Config, manifest_dir: &Path) -> Result<()> {
    install::preflight(mode, config)?;

    step("Installing operators");
    install::install_operators(mode, config).await?;
    done("Operators installed");

    let kubectl = Kubectl::new(config);

    step("Applying ZooKeeper cluster");
    kubectl.apply(&manifest_dir.join(ZOOKEEPER_MANIFEST)).await?;
    kubectl.apply(&manifest_dir.join(KAFKA_ZNODE_MANIFEST)).await?;

    // Readiness heuristic only: gives the operator time to create the
    // statefulset before we start watching it.
    readiness_pause(config).await;

    step("Waiting for ZooKeeper rollout");
    kubectl
        .rollout_status(
            &format!("statefulset/{}", config.cluster.zookeeper_statefulset),
            config.timeouts.rollout_secs,
        )
        .await?;
    done("ZooKeeper ready");

    step("Applying Kafka cluster");
    kubectl.apply(&manifest_dir.join(KAFKA_MANIFEST)).await?;
    readiness_pause(config).await;

    step("Waiting for Kafka rollout");
    kubectl
        .rollout_status(
            &format!("statefulset/{}", config.cluster.kafka_statefulset),
            config.timeouts.rollout_secs,
        )
        .await?;
    done("Kafka ready");

    step("Starting port-forward");
    let port = config.cluster.broker_port;
    let forward = kubectl.port_forward(&config.cluster.kafka_service, port)?;
    readiness_pause(config).await;

    let result = round_trip(config, &format!("localhost:{port}")).await;

    // Success path: terminate explicitly; on error the guard's Drop kills it.
    forward.terminate().await;
    result?;

    done("Tutorial verified");
    Ok(())
}

/// Produce the test payload, consume it back, and assert it survived
async fn round_trip(config: &Config, broker: &str) -> Result<()> {
    let kafka = &config.kafka;
    let artifacts = Artifacts::create(&kafka.payload_file, &kafka.output_file, &kafka.payload)?;

    step("Producing test data");
    kcat::produce(&config.tools.kcat, broker, &kafka.topic, &artifacts.payload_path).await?;

    step("Consuming test data");
    kcat::consume_to_file(&config.tools.kcat, broker, &kafka.topic, &artifacts.output_path)
        .await?;

    let consumed =
        std::fs::read_to_string(&artifacts.output_path).map_err(|e| Error::FileRead {
            path: artifacts.output_path.display().to_string(),
            error: e.to_string(),
        })?;

    if !consumed.contains(&kafka.payload) {
        return Err(Error::Assertion {
            payload: kafka.payload.clone(),
        });
    }

    done("Round-trip verified");
    Ok(())
}

/// Fixed pause used as a readiness proxy between phases
async fn readiness_pause(config: &Config) {
    let secs = config.timeouts.readiness_sleep_secs;
    if secs > 0 {
        tracing::debug!("Pausing {secs}s for readiness");
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
}

fn step(msg: &str) {
    println!("{} {}", "==>".blue().bold(), msg);
}

fn done(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Guard around the two ephemeral local files
///
/// Created right before producing, so no earlier failure leaves files
/// behind. Drop deletes both on every exit path.
struct Artifacts {
    payload_path: PathBuf,
    output_path: PathBuf,
}

impl Artifacts {
    fn create(payload_path: &Path, output_path: &Path, payload: &str) -> Result<Self> {
        std::fs::write(payload_path, format!("{payload}\n"))?;
        Ok(Self {
            payload_path: payload_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
        })
    }
}

impl Drop for Artifacts {
    fn drop(&mut self) {
        for path in [&self.payload_path, &self.output_path] {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove '{}': {e}", path.display());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifacts_are_deleted_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("data");
        let output = dir.path().join("read-data");

        let artifacts = Artifacts::create(&payload, &output, "some test data").unwrap();
        assert_eq!(
            std::fs::read_to_string(&payload).unwrap(),
            "some test data\n"
        );
        std::fs::write(&output, "consumed\n").unwrap();

        drop(artifacts);
        assert!(!payload.exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_artifacts_drop_tolerates_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("data");
        let output = dir.path().join("read-data");

        // Output never created, e.g. when produce already failed
        let artifacts = Artifacts::create(&payload, &output, "x").unwrap();
        drop(artifacts);
        assert!(!payload.exists());
    }
}
