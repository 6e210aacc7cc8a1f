//! Shared process execution helper

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

/// Run a tool to completion with inherited stdout/stderr
pub async fn run_tool(program: &Path, args: &[String]) -> std::io::Result<ExitStatus> {
    tracing::debug!("Running: {} {}", program.display(), args.join(" "));

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
}

/// Human-readable description of how a process exited
pub fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_tool_reports_exit_status() {
        let status = run_tool(Path::new("false"), &[]).await.unwrap();
        assert!(!status.success());
        assert_eq!(describe_status(status), "exit code 1");
    }

    #[tokio::test]
    async fn test_run_tool_missing_binary_is_io_error() {
        let result = run_tool(Path::new("/nonexistent/tool"), &[]).await;
        assert!(result.is_err());
    }
}
