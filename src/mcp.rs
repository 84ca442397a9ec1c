use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

use crate::commands::detect::detect;
use crate::commands::list::list_outputs;
use crate::commands::split::{execute, SplitInputs};
use crate::config::Config;
use crate::report::ReportKind;
use crate::sink;

// Request structs for tools

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SplitReportsRequest {
    #[schemars(description = "RegisteredCourses PDF (one page per student)")]
    #[serde(default)]
    pub registered_courses: Option<String>,
    #[schemars(description = "CGPAProgress PDF (each student starts with 'Student ID')")]
    #[serde(default)]
    pub cgpa: Option<String>,
    #[schemars(description = "History PDF (each student starts with 'Student ID')")]
    #[serde(default)]
    pub history: Option<String>,
    #[schemars(description = "Schedule PDF (student ID inside brackets)")]
    #[serde(default)]
    pub schedule: Option<String>,
    #[schemars(
        description = "Output directory. If omitted, files are staged in a temporary directory"
    )]
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DetectRecordsRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Report kind: registered-courses, cgpa, history or schedule")]
    pub kind: ReportKind,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListOutputsRequest {
    #[schemars(description = "Output directory produced by split_reports")]
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct SplitServer {
    tool_router: ToolRouter<Self>,
    cfg: Config,
}

impl SplitServer {
    pub fn new(cfg: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            cfg,
        }
    }
}

#[tool_router]
impl SplitServer {
    #[tool(description = "Split student reports into one PDF per student, stored as <output_dir>/<student id>/<prefix> <student id>.pdf. Returns the list of generated files.")]
    async fn split_reports(&self, Parameters(req): Parameters<SplitReportsRequest>) -> String {
        let cfg = self.cfg.clone();
        blocking(move || {
            let inputs = SplitInputs {
                registered_courses: non_empty(req.registered_courses),
                cgpa: non_empty(req.cgpa),
                history: non_empty(req.history),
                schedule: non_empty(req.schedule),
            };
            let destination = non_empty(req.output_dir).or_else(|| cfg.output.destination());
            let sink = sink::select(destination, cfg.output.staging_root());

            match execute(&inputs, sink.as_ref()) {
                Ok(summary) => serde_json::to_string_pretty(&summary)
                    .unwrap_or_else(|e| format!("Error: {}", e)),
                Err(e) => format!("Error: {:#}", e),
            }
        })
        .await
    }

    #[tool(description = "Show how a report would be split into student records (identifier and 1-based pages) without writing files")]
    async fn detect_records(&self, Parameters(req): Parameters<DetectRecordsRequest>) -> String {
        blocking(move || match detect(&req.path, req.kind) {
            Ok(detection) => serde_json::to_string_pretty(&detection)
                .unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {:#}", e),
        })
        .await
    }

    #[tool(description = "List split PDFs under an output directory, grouped by student identifier")]
    async fn list_outputs(&self, Parameters(req): Parameters<ListOutputsRequest>) -> String {
        blocking(move || match list_outputs(&req.path) {
            Ok(files) => {
                serde_json::to_string_pretty(&files).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {:#}", e),
        })
        .await
    }
}

/// PDF parsing and file writes stay off the async workers.
async fn blocking<F>(work: F) -> String
where
    F: FnOnce() -> String + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .unwrap_or_else(|e| format!("Error: {}", e))
}

fn non_empty(value: Option<String>) -> Option<PathBuf> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| PathBuf::from(s.trim()))
}

#[tool_handler]
impl ServerHandler for SplitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Student report splitting tools. Use split_reports to split RegisteredCourses, \
                 CGPAProgress, History and Schedule PDFs into per-student files, detect_records \
                 to preview how a report groups into students, and list_outputs to see what a \
                 previous split produced."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(cfg: Config) -> Result<()> {
    let server = SplitServer::new(cfg);
    info!("serving MCP on stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
