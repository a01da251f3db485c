//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Default upload limit: 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Title used when publishing without one.
pub const DEFAULT_PUBLISH_TITLE: &str = "Generated Template";

/// What to do when an exporter fails to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFailurePolicy {
    /// Log the failure and hand back an empty artifact.
    MaskAsEmpty,
    /// Return the failure to the caller.
    Propagate,
}

/// Settings shared by all pipeline operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,

    /// Handling of exporter render failures.
    pub render_failure_policy: RenderFailurePolicy,

    /// Title for published documents when the caller gives none.
    pub default_publish_title: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            render_failure_policy: RenderFailurePolicy::MaskAsEmpty,
            default_publish_title: DEFAULT_PUBLISH_TITLE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Set the upload limit.
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Set the render failure policy.
    pub fn with_render_failure_policy(mut self, policy: RenderFailurePolicy) -> Self {
        self.render_failure_policy = policy;
        self
    }
}
