//! Helm front-end for operator installation

use std::path::Path;

use crate::common::{Error, Result};

use super::exec::{describe_status, run_tool};

/// Register a chart repository
pub async fn repo_add(bin: &Path, name: &str, url: &str) -> Result<()> {
    let args = repo_add_args(name, url);
    let status = run_tool(bin, &args)
        .await
        .map_err(|e| Error::Installation(format!("helm repo add failed to execute: {e}")))?;

    if !status.success() {
        return Err(Error::Installation(format!(
            "helm repo add '{name}' failed with {}",
            describe_status(status)
        )));
    }
    Ok(())
}

/// Install one chart at a pinned version, waiting until it reports ready
pub async fn install(bin: &Path, repo: &str, chart: &str, version: &str) -> Result<()> {
    let args = install_args(repo, chart, version);
    let status = run_tool(bin, &args)
        .await
        .map_err(|e| Error::Installation(format!("helm install failed to execute: {e}")))?;

    if !status.success() {
        return Err(Error::Installation(format!(
            "helm install '{chart}' {version} failed with {}",
            describe_status(status)
        )));
    }
    Ok(())
}

fn repo_add_args(name: &str, url: &str) -> Vec<String> {
    vec!["repo".into(), "add".into(), name.into(), url.into()]
}

fn install_args(repo: &str, chart: &str, version: &str) -> Vec<String> {
    vec![
        "install".into(),
        "--wait".into(),
        chart.into(),
        format!("{repo}/{chart}"),
        "--version".into(),
        version.into(),
    ]
}
