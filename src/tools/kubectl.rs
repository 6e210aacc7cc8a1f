//! Kubernetes CLI collaborator
//!
//! Covers the three primitives the tutorial needs: declarative apply,
//! blocking rollout watch, and a background port-forward whose process is
//! guaranteed to be terminated on every exit path.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::common::{Config, Error, Result};

use super::exec::{describe_status, run_tool};

/// Handle to the `kubectl` binary plus invocation-wide settings
pub struct Kubectl {
    bin: PathBuf,
    namespace: Option<String>,
}

impl Kubectl {
    pub fn new(config: &Config) -> Self {
        Self {
            bin: config.tools.kubectl.clone(),
            namespace: config.cluster.namespace.clone(),
        }
    }

    /// `kubectl apply -f <manifest>`
    pub async fn apply(&self, manifest: &Path) -> Result<()> {
        let args = apply_args(manifest, self.namespace.as_deref());
        let status = run_tool(&self.bin, &args)
            .await
            .map_err(|e| Error::apply(manifest, format!("kubectl failed to execute: {e}")))?;

        if !status.success() {
            return Err(Error::apply(manifest, describe_status(status)));
        }
        Ok(())
    }

    /// `kubectl rollout status --watch` for a workload like `statefulset/name`
    ///
    /// Blocks until the workload is ready or kubectl's own timeout fires.
    pub async fn rollout_status(&self, workload: &str, timeout_secs: u64) -> Result<()> {
        let args = rollout_status_args(workload, timeout_secs, self.namespace.as_deref());
        let status = run_tool(&self.bin, &args).await.map_err(|e| Error::Rollout {
            workload: workload.to_string(),
            detail: format!("kubectl failed to execute: {e}"),
        })?;

        if !status.success() {
            return Err(Error::Rollout {
                workload: workload.to_string(),
                detail: describe_status(status),
            });
        }
        Ok(())
    }

    /// Spawn a background `kubectl port-forward svc/<service> <port>`
    ///
    /// The returned guard owns the child for the rest of the run.
    pub fn port_forward(&self, service: &str, port: u16) -> Result<PortForward> {
        let args = port_forward_args(service, port, self.namespace.as_deref());
        tracing::debug!("Spawning: {} {}", self.bin.display(), args.join(" "));

        let child = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::PortForward {
                service: service.to_string(),
                detail: e.to_string(),
            })?;

        Ok(PortForward {
            child,
            target: format!("svc/{service} {port}"),
        })
    }
}

/// Guard around the background port-forward process
///
/// Terminated exactly once per run: explicitly via [`terminate`] on the
/// success path, or by `Drop` when the run fails or is interrupted.
///
/// [`terminate`]: PortForward::terminate
pub struct PortForward {
    child: Child,
    target: String,
}

impl PortForward {
    /// Kill the forwarding process and reap it
    pub async fn terminate(mut self) {
        tracing::debug!("Terminating port-forward to {}", self.target);
        if let Err(e) = self.child.kill().await {
            tracing::warn!("Failed to terminate port-forward: {e}");
        }
    }
}

impl Drop for PortForward {
    fn drop(&mut self) {
        // No-op if terminate() already reaped the child
        let _ = self.child.start_kill();
    }
}

fn apply_args(manifest: &Path, namespace: Option<&str>) -> Vec<String> {
    let mut args = namespace_args(namespace);
    args.extend(["apply".into(), "-f".into(), manifest.display().to_string()]);
    args
}

fn rollout_status_args(workload: &str, timeout_secs: u64, namespace: Option<&str>) -> Vec<String> {
    let mut args = namespace_args(namespace);
    args.extend([
        "rollout".into(),
        "status".into(),
        "--watch".into(),
        format!("--timeout={timeout_secs}s"),
        workload.into(),
    ]);
    args
}

fn port_forward_args(service: &str, port: u16, namespace: Option<&str>) -> Vec<String> {
    let mut args = namespace_args(namespace);
    args.extend(["port-forward".into(), format!("svc/{service}"), port.to_string()]);
    args
}

fn namespace_args(namespace: Option<&str>) -> Vec<String> {
    match namespace {
        Some(ns) => vec!["--namespace".into(), ns.into()],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_args() {
        let args = apply_args(Path::new("manifests/zookeeper.yaml"), None);
        assert_eq!(args, vec!["apply", "-f", "manifests/zookeeper.yaml"]);
    }

    #[test]
    fn test_rollout_args_watch_with_timeout() {
        let args = rollout_status_args("statefulset/simple-zk-server-default", 300, None);
        assert_eq!(
            args,
            vec![
                "rollout",
                "status",
                "--watch",
                "--timeout=300s",
                "statefulset/simple-zk-server-default",
            ]
        );
    }

    #[test]
    fn test_namespace_is_prepended_when_set() {
        let args = port_forward_args("simple-kafka", 9092, Some("tutorial"));
        assert_eq!(
            args,
            vec!["--namespace", "tutorial", "port-forward", "svc/simple-kafka", "9092"]
        );
    }
}
