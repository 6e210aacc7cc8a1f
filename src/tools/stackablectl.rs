//! stackablectl front-end for operator installation
//!
//! One invocation installs all operators; ordering and waiting are handled
//! by the tool itself.

use std::path::Path;

use crate::common::{Error, Result};

use super::exec::{describe_status, run_tool};

/// Install the named operators at a pinned version
pub async fn operator_install(bin: &Path, operators: &[&str], version: &str) -> Result<()> {
    let args = operator_install_args(operators, version);
    let status = run_tool(bin, &args).await.map_err(|e| {
        Error::Installation(format!("stackablectl operator install failed to execute: {e}"))
    })?;

    if !status.success() {
        return Err(Error::Installation(format!(
            "stackablectl operator install failed with {}",
            describe_status(status)
        )));
    }
    Ok(())
}

fn operator_install_args(operators: &[&str], version: &str) -> Vec<String> {
    let mut args = vec!["operator".to_string(), "install".to_string()];
    args.extend(operators.iter().map(|op| format!("{op}={version}")));
    args
}
