// SPDX-License-Identifier: MIT OR Apache-2.0
//! ReSTIR DI pink room pipeline.
//!
//! Builds the ReSTIR DI render graph, registers it with a renderer session,
//! loads the pink room scene and applies window, clock and frame capture
//! settings. Paths come from an optional RON configuration file.
//!
//! ```text
//! restir_pink_room [CONFIG.ron] [--export-graph PATH] [--write-default-config PATH]
//! ```

mod config;
mod startup;

use config::PipelineConfig;
use restir_session::Session;
use startup::{configure_session, export_graph, StartupError};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Configuration file; built-in defaults when absent
    config: Option<PathBuf>,
    /// Write the assembled graph as JSON
    export_graph: Option<PathBuf>,
    /// Write the default configuration and exit
    write_default_config: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--export-graph" => {
                    let path = args.next().ok_or("--export-graph requires a path")?;
                    parsed.export_graph = Some(PathBuf::from(path));
                }
                "--write-default-config" => {
                    let path = args.next().ok_or("--write-default-config requires a path")?;
                    parsed.write_default_config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
                path => {
                    if parsed.config.is_some() {
                        return Err(format!("Unexpected argument: {path}"));
                    }
                    parsed.config = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }
}

fn run(args: &Args) -> Result<(), StartupError> {
    if let Some(path) = &args.write_default_config {
        PipelineConfig::default().save(path)?;
        tracing::info!("Wrote default configuration to {:?}", path);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration {:?}", path);
            PipelineConfig::load(path)?
        }
        None => PipelineConfig::default(),
    };

    let mut session = Session::new();
    configure_session(&mut session, &config)?;

    if let Some(graph) = session.active_graph() {
        match graph.execution_order() {
            Ok(order) => tracing::info!("Pass order: {}", order.join(" -> ")),
            Err(e) => tracing::warn!("{e}"),
        }
        if let Some(path) = &args.export_graph {
            export_graph(graph, path)?;
        }
    }

    let snapshot = session.snapshot().to_bytes()?;
    tracing::info!("Session ready ({} byte snapshot)", snapshot.len());
    Ok(())
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("restir_app=info,restir_session=info,restir_graph=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ReSTIR DI pipeline v{}", env!("CARGO_PKG_VERSION"));

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        tracing::error!("Startup failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|a| (*a).to_string()))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());

        let args = parse(&["room.ron", "--export-graph", "graph.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("room.ron")));
        assert_eq!(args.export_graph, Some(PathBuf::from("graph.json")));

        assert!(parse(&["--export-graph"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.ron", "b.ron"]).is_err());
    }

    #[test]
    fn test_write_default_config() {
        let path = std::env::temp_dir().join(format!("restir_main_{}_default.ron", std::process::id()));
        let args = Args {
            write_default_config: Some(path.clone()),
            ..Default::default()
        };
        run(&args).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), PipelineConfig::default());
        std::fs::remove_file(path).ok();
    }
}
