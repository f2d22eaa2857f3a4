use std::path::{Path, PathBuf};

use super::{ChatUsage, ScriptTask};

/// A model-proposed replacement for a script, not yet written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteProposal {
    path: PathBuf,
    task: ScriptTask,
    original: String,
    proposed: String,
    round_trip_millis: f64,
    usage: ChatUsage,
}

impl RewriteProposal {
    pub fn new(
        path: impl Into<PathBuf>,
        task: ScriptTask,
        original: String,
        proposed: String,
    ) -> Self {
        Self {
            path: path.into(),
            task,
            original,
            proposed,
            round_trip_millis: 0.0,
            usage: ChatUsage::default(),
        }
    }

    pub fn with_timing(mut self, round_trip_millis: f64, usage: ChatUsage) -> Self {
        self.round_trip_millis = round_trip_millis;
        self.usage = usage;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn task(&self) -> &ScriptTask {
        &self.task
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn proposed(&self) -> &str {
        &self.proposed
    }

    pub fn round_trip_millis(&self) -> f64 {
        self.round_trip_millis
    }

    pub fn usage(&self) -> &ChatUsage {
        &self.usage
    }

    pub fn is_unchanged(&self) -> bool {
        self.original == self.proposed
    }
}
