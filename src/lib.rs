//! Tutorial runner - keeps the Kafka getting-started guide honest
//!
//! This library drives the documented ZooKeeper/Kafka installation steps
//! against a real Kubernetes cluster and verifies that a produced record
//! can be consumed again through a port-forwarded broker.

pub mod common;
pub mod install;
pub mod runner;
pub mod tools;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use install::Mode;
