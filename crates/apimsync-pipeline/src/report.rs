//! Outcome of one pipeline stage

use serde::Serialize;
use std::fmt;

/// Pipeline stage a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    ServiceExport,
    Export,
    Offramp,
    Onramp,
    Import,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ServiceExport => "service export",
            Stage::Export => "export",
            Stage::Offramp => "offramp",
            Stage::Onramp => "onramp",
            Stage::Import => "import",
        };
        write!(f, "{}", name)
    }
}

/// One API that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFailure {
    pub api: String,
    pub message: String,
}

/// What a stage did for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub platform: String,

    /// Names written by the stage, in processing order
    pub processed: Vec<String>,

    /// Names left alone because they were already staged
    pub skipped: Vec<String>,

    /// Per-API failures; the stage carried on past each of them
    pub errors: Vec<ApiFailure>,

    /// Stage-level problem that stopped the stage before any API was touched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl StageReport {
    pub fn new(stage: Stage, platform: impl Into<String>) -> Self {
        Self {
            stage,
            platform: platform.into(),
            processed: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
            problem: None,
        }
    }

    /// A stage that could not run at all
    pub fn aborted(stage: Stage, platform: impl Into<String>, problem: impl fmt::Display) -> Self {
        let mut report = Self::new(stage, platform);
        report.problem = Some(problem.to_string());
        report
    }

    pub fn record_failure(&mut self, api: impl Into<String>, message: impl fmt::Display) {
        let api = api.into();
        let message = message.to_string();
        tracing::warn!("{} of {} failed: {}", self.stage, api, message);
        self.errors.push(ApiFailure { api, message });
    }

    pub fn is_success(&self) -> bool {
        self.problem.is_none() && self.errors.is_empty()
    }

    /// One line per problem, empty when the stage succeeded
    pub fn problems(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(problem) = &self.problem {
            lines.push(format!("{} ({}): {}", self.stage, self.platform, problem));
        }
        for failure in &self.errors {
            lines.push(format!(
                "{} ({}): {}: {}",
                self.stage, self.platform, failure.api, failure.message
            ));
        }
        lines
    }
}
