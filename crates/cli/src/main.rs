//! `flow` CLI entry-point.
//!
//! Available sub-commands:
//! - `validate` — check a workflow JSON file and print its execution order.
//! - `run`      — thread an event payload through a workflow and print the record.
//! - `evaluate` — evaluate a single condition against an email payload.
//!
//! Logs go to stderr so stdout stays machine-readable JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::{
    create_record, targets_for, ExecutorConfig, UnknownNodePolicy, Workflow, WorkflowExecutor,
};
use nodes::{evaluate, Operator, Payload, TriggerKind};

#[derive(Parser)]
#[command(
    name = "flow",
    about = "Email-to-task workflow data-flow engine",
    version
)]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset, e.g. `debug` or `engine=debug`.
    #[arg(long, global = true, env = "FLOW_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a workflow definition JSON file.
    Validate {
        /// Path to the workflow JSON file.
        path: PathBuf,
        /// Treat node types without an evaluator as errors.
        #[arg(long, env = "FLOW_STRICT_NODES")]
        strict_nodes: bool,
    },
    /// Run a workflow against one trigger payload.
    Run {
        /// Path to the workflow JSON file.
        path: PathBuf,
        /// Path to the trigger payload JSON object.
        #[arg(long)]
        event: PathBuf,
        /// Treat node types without an evaluator as errors.
        #[arg(long, env = "FLOW_STRICT_NODES")]
        strict_nodes: bool,
    },
    /// Evaluate one condition against an email payload.
    Evaluate {
        /// Path to the email payload JSON object.
        #[arg(long)]
        event: PathBuf,
        /// Field path, e.g. `email.subject`.
        #[arg(long)]
        field: String,
        /// One of `contains`, `equals`, `startsWith`, `endsWith`.
        #[arg(long)]
        operator: String,
        #[arg(long)]
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log);

    match cli.command {
        Command::Validate { path, strict_nodes } => {
            let workflow = read_workflow(&path)?;
            let order = executor(strict_nodes)
                .validate(&workflow)
                .with_context(|| format!("workflow '{}' is invalid", workflow.name))?;
            info!("workflow '{}' is valid", workflow.name);
            println!("{}", serde_json::to_string_pretty(&json!({ "order": order }))?);
        }
        Command::Run { path, event, strict_nodes } => {
            let workflow = read_workflow(&path)?;
            let payload = read_payload(&event)?;
            let result = executor(strict_nodes)
                .run(&workflow, payload)
                .with_context(|| format!("workflow '{}' failed", workflow.name))?;

            let passed = result.record.conditions_passed();
            let targets = targets_for(&result.record);
            let output = json!({
                "executionId": result.execution_id,
                "record": result.record,
                "conditionsPassed": passed,
                "targets": targets,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Evaluate { event, field, operator, value } => {
            let record = create_record(TriggerKind::Email, read_payload(&event)?);
            let operator = Operator::from(operator);
            let passed = evaluate(&field, &operator, &value, &record);
            println!("{}", json!({ "field": field, "operator": operator, "value": value, "result": passed }));
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the `--log` / `FLOW_LOG` level is used.
fn init_logging(level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), level))
        .with_writer(std::io::stderr)
        .init();
}

fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn executor(strict_nodes: bool) -> WorkflowExecutor {
    let unknown_nodes = if strict_nodes {
        UnknownNodePolicy::Reject
    } else {
        UnknownNodePolicy::PassThrough
    };
    WorkflowExecutor::new(ExecutorConfig { unknown_nodes })
}

fn read_workflow(path: &Path) -> Result<Workflow> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid workflow JSON in {}", path.display()))
}

fn read_payload(path: &Path) -> Result<Payload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} must contain a JSON object", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_configured_level() {
        assert_eq!(log_filter(Some("engine=debug"), "warn").to_string(), "engine=debug");
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        assert_eq!(log_filter(None, "warn").to_string(), "warn");
    }
}
