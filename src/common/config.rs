//! Configuration file handling
//!
//! Every knob has a default matching the written tutorial, so the runner
//! works with no config file at all. A TOML file can override tool paths
//! (useful on clusters where the binaries live outside PATH), the pinned
//! release, resource names, and the readiness timings.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tutorial.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Paths to the external command-line tools
    #[serde(default)]
    pub tools: Tools,

    /// Pinned operator release and helm repository
    #[serde(default)]
    pub release: Release,

    /// Names of the cluster resources the tutorial creates
    #[serde(default)]
    pub cluster: Cluster,

    /// Topic, payload and local file names for the round-trip check
    #[serde(default)]
    pub kafka: Kafka,

    /// Readiness timings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Paths to the external tools; bare names are resolved on PATH
#[derive(Debug, Deserialize)]
pub struct Tools {
    #[serde(default = "default_helm")]
    pub helm: PathBuf,

    #[serde(default = "default_stackablectl")]
    pub stackablectl: PathBuf,

    #[serde(default = "default_kubectl")]
    pub kubectl: PathBuf,

    #[serde(default = "default_kcat")]
    pub kcat: PathBuf,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            helm: default_helm(),
            stackablectl: default_stackablectl(),
            kubectl: default_kubectl(),
            kcat: default_kcat(),
        }
    }
}

fn default_helm() -> PathBuf {
    PathBuf::from("helm")
}
fn default_stackablectl() -> PathBuf {
    PathBuf::from("stackablectl")
}
fn default_kubectl() -> PathBuf {
    PathBuf::from("kubectl")
}
fn default_kcat() -> PathBuf {
    PathBuf::from("kcat")
}

/// Pinned operator release
#[derive(Debug, Deserialize)]
pub struct Release {
    /// Version installed for all four operators
    #[serde(default = "default_version")]
    pub version: String,

    /// Name under which the helm repository is registered
    #[serde(default = "default_repo_name")]
    pub helm_repo_name: String,

    /// URL of the helm repository
    #[serde(default = "default_repo_url")]
    pub helm_repo_url: String,
}

impl Default for Release {
    fn default() -> Self {
        Self {
            version: default_version(),
            helm_repo_name: default_repo_name(),
            helm_repo_url: default_repo_url(),
        }
    }
}

fn default_version() -> String {
    "23.4.0".to_string()
}
fn default_repo_name() -> String {
    "stackable-stable".to_string()
}
fn default_repo_url() -> String {
    "https://repo.stackable.tech/repository/helm-stable/".to_string()
}

/// Cluster resource names, matching the shipped manifests
#[derive(Debug, Deserialize)]
pub struct Cluster {
    /// Namespace for kubectl invocations; omitted when unset
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default = "default_zookeeper_statefulset")]
    pub zookeeper_statefulset: String,

    #[serde(default = "default_kafka_statefulset")]
    pub kafka_statefulset: String,

    /// Service the broker port-forward targets
    #[serde(default = "default_kafka_service")]
    pub kafka_service: String,

    #[serde(default = "default_broker_port")]
    pub broker_port: u16,
}

impl Default for Cluster {
    fn default() -> Self {
        Self {
            namespace: None,
            zookeeper_statefulset: default_zookeeper_statefulset(),
            kafka_statefulset: default_kafka_statefulset(),
            kafka_service: default_kafka_service(),
            broker_port: default_broker_port(),
        }
    }
}

fn default_zookeeper_statefulset() -> String {
    "simple-zk-server-default".to_string()
}
fn default_kafka_statefulset() -> String {
    "simple-kafka-broker-default".to_string()
}
fn default_kafka_service() -> String {
    "simple-kafka".to_string()
}
fn default_broker_port() -> u16 {
    9092
}

/// Round-trip check settings
#[derive(Debug, Deserialize)]
pub struct Kafka {
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Literal line written and asserted on
    #[serde(default = "default_payload")]
    pub payload: String,

    /// Local file the payload is staged in before producing
    #[serde(default = "default_payload_file")]
    pub payload_file: PathBuf,

    /// Local file the consumed records are redirected into
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for Kafka {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            payload: default_payload(),
            payload_file: default_payload_file(),
            output_file: default_output_file(),
        }
    }
}

fn default_topic() -> String {
    "test-data-topic".to_string()
}
fn default_payload() -> String {
    "some test data".to_string()
}
fn default_payload_file() -> PathBuf {
    PathBuf::from("data")
}
fn default_output_file() -> PathBuf {
    PathBuf::from("read-data")
}

/// Readiness timings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Fixed pause between applying a resource and watching its rollout,
    /// and after starting the port-forward. A heuristic, not a guarantee;
    /// raise it on slow clusters.
    #[serde(default = "default_readiness_sleep")]
    pub readiness_sleep_secs: u64,

    /// Passed to `kubectl rollout status --timeout`
    #[serde(default = "default_rollout")]
    pub rollout_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            readiness_sleep_secs: default_readiness_sleep(),
            rollout_secs: default_rollout(),
        }
    }
}

fn default_readiness_sleep() -> u64 {
    5
}
fn default_rollout() -> u64 {
    300
}

impl Config {
    /// Load configuration
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// `tutorial.toml` in the working directory is used if present,
    /// otherwise all defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
