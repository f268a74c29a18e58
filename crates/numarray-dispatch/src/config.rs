//! Engine configuration

use numarray_core::{
    Error, ExecutionContext, ExecutionStrategy, ReportPolicy, Result, DEFAULT_PARALLEL_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Settings fixed when an [`Engine`](crate::Engine) is constructed
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```
/// use numarray_dispatch::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "check_results": true }"#).unwrap();
/// assert!(config.check_results);
/// assert!(!config.verbose);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log every registration and synthesized resolution at `info`
    pub verbose: bool,
    /// Run the finiteness checker on every result before returning it
    pub check_results: bool,
    /// Coordinate reported by the finiteness checker
    pub report_policy: ReportPolicy,
    /// Column scheduling for kernels
    pub execution: ExecutionStrategy,
    /// Element count from which `Auto` execution goes parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            check_results: false,
            report_policy: ReportPolicy::FirstOccurrence,
            execution: ExecutionStrategy::Auto,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document
    ///
    /// # Errors
    /// `Configuration` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("Invalid engine config: {e}")))
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_check_results(mut self, check_results: bool) -> Self {
        self.check_results = check_results;
        self
    }

    pub fn with_report_policy(mut self, policy: ReportPolicy) -> Self {
        self.report_policy = policy;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Execution context kernels run under
    pub fn execution_context(&self) -> ExecutionContext {
        ExecutionContext::new(self.execution, self.parallel_threshold)
    }
}
