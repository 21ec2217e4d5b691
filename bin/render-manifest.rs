//! Render Kubernetes custom resource manifests from the command line
//!
//! Drives the same provider the Terraform plugin uses, without Terraform.
//!
//! # Usage
//!
//! List the available resource types:
//! ```bash
//! cargo run --bin render-manifest -- list
//! ```
//!
//! Render a configuration (JSON or YAML, attribute names in snake_case):
//! ```bash
//! cargo run --bin render-manifest -- render k8s_ceph_rook_io_ceph_nfs_v1 nfs.yaml
//! ```
//!
//! Convert existing manifests into resource state:
//! ```bash
//! cargo run --bin render-manifest -- import fixtures/ceph-nfs.yaml
//! ```
//!
//! Set `RUST_LOG=kube_manifest_provider=debug` to trace lifecycle calls.

use clap::{Parser, Subcommand};
use kube_manifest_provider::{CreateRequest, Provider, ProviderBuilder};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "render-manifest")]
#[command(about = "Render Kubernetes custom resources as YAML manifests", long_about = None)]
struct Args {
    /// Provider type name, prefix of every resource type name
    #[arg(long, default_value = "k8s")]
    type_name: String,

    /// Skip configuration validation
    #[arg(long)]
    no_validate: bool,

    /// Fixed resource id instead of the current timestamp
    #[arg(long)]
    id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered resource types
    List,
    /// Print the attribute schema of a resource type as JSON
    Schema { type_name: String },
    /// Render a resource configuration and print the manifest
    Render { type_name: String, config: PathBuf },
    /// Import manifests and print the resulting state as JSON
    Import { manifests: PathBuf },
}

/// What a command prints and whether it succeeded
#[derive(Debug, Default)]
struct Output {
    stdout: String,
    stderr: Vec<String>,
    failed: bool,
}

impl Output {
    fn exit_code(&self) -> ExitCode {
        if self.failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let provider = build_provider(&args);
    let output = run(&provider, &args.command)?;

    for line in &output.stderr {
        eprintln!("{}", line);
    }
    print!("{}", output.stdout);
    Ok(output.exit_code())
}

fn build_provider(args: &Args) -> Provider {
    let mut builder = ProviderBuilder::new()
        .with_type_name(&args.type_name)
        .with_rook_resources();
    if args.no_validate {
        builder = builder.without_validation();
    }
    if let Some(id) = args.id.clone() {
        builder = builder.with_id_generator(move || id.clone());
    }
    builder.build()
}

fn run(provider: &Provider, command: &Command) -> CliResult<Output> {
    match command {
        Command::List => Ok(list(provider)),
        Command::Schema { type_name } => schema(provider, type_name),
        Command::Render { type_name, config } => {
            debug!("Reading configuration from {}", config.display());
            render(provider, type_name, &fs::read_to_string(config)?)
        }
        Command::Import { manifests } => import(provider, &fs::read_to_string(manifests)?),
    }
}

fn list(provider: &Provider) -> Output {
    let stdout = provider
        .resource_types()
        .iter()
        .map(|type_name| format!("{}\n", type_name))
        .collect();
    Output {
        stdout,
        ..Default::default()
    }
}

fn schema(provider: &Provider, type_name: &str) -> CliResult<Output> {
    let schema = provider.resource_schema(type_name)?;
    Ok(Output {
        stdout: format!("{}\n", serde_json::to_string_pretty(&schema)?),
        ..Default::default()
    })
}

/// Render a JSON or YAML configuration (YAML is a superset of JSON)
fn render(provider: &Provider, type_name: &str, config: &str) -> CliResult<Output> {
    let plan: Value = serde_yaml::from_str(config)?;
    let response = provider.create(type_name, CreateRequest { plan })?;

    let mut output = Output {
        stderr: response.diagnostics.iter().map(ToString::to_string).collect(),
        failed: response.diagnostics.has_error(),
        ..Default::default()
    };
    match response.state {
        Some(state) if !output.failed => {
            output.stdout = state["yaml"].as_str().unwrap_or_default().to_string();
        }
        _ => output.failed = true,
    }
    Ok(output)
}

fn import(provider: &Provider, manifests: &str) -> CliResult<Output> {
    let imported = provider.import_manifests(manifests)?;
    info!("Imported {} manifests", imported.len());

    let mut output = Output::default();
    for resource in &imported {
        for diagnostic in &resource.diagnostics {
            output
                .stderr
                .push(format!("{}: {}", resource.type_name, diagnostic));
        }
        output.failed |= resource.state.is_none() || resource.diagnostics.has_error();
    }

    let states: Vec<Value> = imported
        .into_iter()
        .map(|r| serde_json::json!({ "type": r.type_name, "state": r.state }))
        .collect();
    output.stdout = format!("{}\n", serde_json::to_string_pretty(&states)?);
    Ok(output)
}
