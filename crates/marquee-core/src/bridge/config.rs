//! Bridge configuration and execution capability detection.

use std::sync::OnceLock;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Where dispatched jobs run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// On the calling thread, resolving immediately
    Inline,
    /// On a dedicated thread spawned per dispatch
    Background,
}

impl ExecutionMode {
    /// The best mode this platform supports, detected once per process.
    pub fn detect() -> Self {
        static DETECTED: OnceLock<ExecutionMode> = OnceLock::new();

        *DETECTED.get_or_init(|| {
            let mode = if background_available() {
                ExecutionMode::Background
            } else {
                ExecutionMode::Inline
            };
            info!("Execution bridge detected {:?} mode", mode);
            mode
        })
    }
}

fn background_available() -> bool {
    if cfg!(target_arch = "wasm32") {
        return false;
    }
    std::thread::available_parallelism().is_ok()
}

/// Requested execution mode, resolved against platform support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPreference {
    /// Background when available, otherwise inline
    #[default]
    Auto,
    /// Always inline
    Inline,
    /// Background, downgraded to inline with a warning if unsupported
    Background,
}

impl ExecutionPreference {
    pub fn resolve(self) -> ExecutionMode {
        match self {
            ExecutionPreference::Auto => ExecutionMode::detect(),
            ExecutionPreference::Inline => ExecutionMode::Inline,
            ExecutionPreference::Background => match ExecutionMode::detect() {
                ExecutionMode::Background => ExecutionMode::Background,
                ExecutionMode::Inline => {
                    warn!("Background execution requested but unavailable; running inline");
                    ExecutionMode::Inline
                }
            },
        }
    }
}

/// Execution bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Requested execution mode
    pub preference: ExecutionPreference,
    /// Prefix for worker thread names; the job name is appended
    pub thread_name: String,
    /// Worker stack size in bytes (platform default when `None`)
    pub stack_size: Option<usize>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            preference: ExecutionPreference::Auto,
            thread_name: "marquee-worker".to_string(),
            stack_size: None,
        }
    }
}
