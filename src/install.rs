//! Installation strategy selection and operator installation
//!
//! Two front-ends install the same four operators at the same pinned
//! version; the mode token picks one at startup and is immutable after.

use std::path::Path;
use std::str::FromStr;

use crate::common::{Config, Error, Result};
use crate::tools::{helm, stackablectl};

/// Operators the tutorial depends on, installed in this order
pub const OPERATORS: [&str; 4] = ["commons", "secret", "zookeeper", "kafka"];

/// Installation front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Helm,
    Stackablectl,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "helm" => Ok(Mode::Helm),
            "stackablectl" => Ok(Mode::Stackablectl),
            other => Err(Error::InvalidArgument(other.to_string())),
        }
    }
}

impl Mode {
    /// Tools this mode will invoke, for the preflight check
    fn required_tools<'a>(&self, config: &'a Config) -> Vec<(&'static str, &'a Path)> {
        let front_end = match self {
            Mode::Helm => ("helm", config.tools.helm.as_path()),
            Mode::Stackablectl => ("stackablectl", config.tools.stackablectl.as_path()),
        };
        vec![
            front_end,
            ("kubectl", config.tools.kubectl.as_path()),
            ("kcat", config.tools.kcat.as_path()),
        ]
    }
}

/// Verify every tool the run will invoke can be resolved
pub fn preflight(mode: Mode, config: &Config) -> Result<()> {
    for (name, path) in mode.required_tools(config) {
        which::which(path).map_err(|e| Error::tool_not_found(name, &e))?;
    }
    Ok(())
}

/// Install the four operators using the selected front-end
///
/// Helm installs sequentially with `--wait`; stackablectl handles ordering
/// and waiting internally in a single invocation. No retries: the first
/// non-zero exit aborts.
pub async fn install_operators(mode: Mode, config: &Config) -> Result<()> {
    let version = &config.release.version;

    match mode {
        Mode::Helm => {
            let bin = &config.tools.helm;
            let repo = &config.release.helm_repo_name;
            helm::repo_add(bin, repo, &config.release.helm_repo_url).await?;
            for operator in OPERATORS {
                let chart = format!("{operator}-operator");
                tracing::info!("Installing {chart} {version}");
                helm::install(bin, repo, &chart, version).await?;
            }
        }
        Mode::Stackablectl => {
            tracing::info!("Installing operators {} at {version}", OPERATORS.join(", "));
            stackablectl::operator_install(&config.tools.stackablectl, &OPERATORS, version)
                .await?;
        }
    }
    Ok(())
}
