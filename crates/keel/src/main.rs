mod cli;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use keel_core::host::phases::{APPLY_THEME, REGISTER_SERVICES, STARTUP_SEQUENCE};
use keel_core::{AsExtension, Extension, HostAssembly, HostConfig, HostSummary};
use log::error;

use crate::cli::{Cli, Command};

// Statically linked extension crates. Referencing them here keeps their
// registrations in the final link even though nothing calls them directly.
use access_log as _;
use basic_themes as _;
use host_baseline as _;
use status_pages as _;

fn main() -> ExitCode {
    // Logging first, so discovery warnings during any command are visible.
    let _ = env_logger::try_init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run { config, json } => run(config.as_deref(), json),
        Command::Extensions { json } => list_extensions(json),
        Command::Phases => {
            print_phases();
            Ok(())
        }
        Command::Ping => {
            println!("pong");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<&Path>, json: bool) -> Result<(), Box<dyn Error>> {
    let config = match config_path {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };

    let mut assembly = HostAssembly::discover();
    let host = assembly.start(config)?;
    let summary = host.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &HostSummary) {
    println!("Host '{}' ({})", summary.name, summary.environment);
    println!("  listen: {}", summary.listen);
    println!("  services: {}", summary.services.join(", "));
    println!("  middleware: {}", summary.middleware.join(", "));
    println!("  routes:");
    for route in &summary.routes {
        println!("    {} -> {}", route.path, route.handler);
    }
    println!("  styles:");
    for (key, value) in &summary.styles {
        println!("    {key} = {value}");
    }
}

fn list_extensions(json: bool) -> Result<(), Box<dyn Error>> {
    let assembly = HostAssembly::discover();

    if json {
        let describe = |ext: &dyn Extension| {
            serde_json::json!({
                "name": ext.name(),
                "priority": ext.priority(),
                "executed": ext.state().executed_count(),
            })
        };
        let modules: Vec<_> = assembly
            .modules()
            .iter()
            .map(|module| describe(module.as_extension()))
            .collect();
        let themes: Vec<_> = assembly
            .themes()
            .iter()
            .map(|theme| describe(theme.as_extension()))
            .collect();
        let listing = serde_json::json!({ "modules": modules, "themes": themes });
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("host modules:");
    for module in assembly.modules().iter() {
        println!("  {} ({})", module.name(), module.priority());
    }
    println!("themes:");
    for theme in assembly.themes().iter() {
        println!("  {} ({})", theme.name(), theme.priority());
    }
    Ok(())
}

fn print_phases() {
    println!("{REGISTER_SERVICES}");
    for phase in STARTUP_SEQUENCE {
        println!("{phase}");
    }
    println!("{APPLY_THEME}");
}
