//! Rendering of engine outcomes

use serde::Serialize;
use serde_json::json;

use nwtunnel_core::{Flow, FlowError, FlowMetrics, MaxFlowResult};

/// Exit status of a successful computation
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status when source and sink are not connected
pub const EXIT_NO_PATH: u8 = 1;

/// Exit status when the graph description cannot be loaded
pub const EXIT_LOAD_FAILURE: u8 = 2;

/// Output format of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One human-readable sentence
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// JSON shape of a successful computation
///
/// Written through the serializer rather than a `Value`, which cannot hold
/// totals beyond `u64::MAX`.
#[derive(Debug, Serialize)]
struct SuccessReport<'a> {
    source: &'a str,
    sink: &'a str,
    max_flow: Flow,
    metrics: &'a FlowMetrics,
}

/// Renders a successful computation
pub fn render_success(
    source: &str,
    sink: &str,
    result: &MaxFlowResult<String>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "the maximum capacity between {} and {} is {}",
            source, sink, result.max_flow
        )),
        OutputFormat::Json => serde_json::to_string(&SuccessReport {
            source,
            sink,
            max_flow: result.max_flow,
            metrics: &result.metrics,
        }),
    }
}

/// Renders the no-path outcome
pub fn render_no_path(error: &FlowError<String>, format: OutputFormat) -> String {
    match (format, error) {
        (OutputFormat::Text, _) => error.to_string(),
        (OutputFormat::Json, FlowError::NoPath { src, sink }) => json!({
            "source": src,
            "sink": sink,
            "error": error.to_string(),
        })
        .to_string(),
    }
}
