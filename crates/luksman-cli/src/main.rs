//! Interactive menu-driven manager for LUKS container files.

mod menu;
mod prompt;

use anyhow::Context;
use log::debug;
use luksman_core::config::LuksmanConfig;
use luksman_core::ident::RandomNames;
use luksman_core::layout::Layout;
use luksman_core::{logging, privilege};
use luksman_system::SystemContainerProvider;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    logging::init("warn");

    if !privilege::running_as_root() {
        println!("This program manages block devices and mounts; run it as root.");
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = LuksmanConfig::resolve_path();
    debug!("loading configuration from {}", config_path.display());
    let config = LuksmanConfig::load_or_default(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;

    let issues = config.validate();
    if !issues.is_empty() {
        eprintln!("configuration problems in {}:", config_path.display());
        for issue in &issues {
            eprintln!("  - {issue}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let provider =
        SystemContainerProvider::from_config(&config).context("resolving external tools")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = menu::run_loop(
        &config,
        &provider,
        &RandomNames,
        &Layout::system(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    let mut out = stdout.lock();
    writeln!(out, "Bye.")?;
    out.flush()?;

    Ok(match outcome {
        menu::LoopOutcome::Exit => ExitCode::SUCCESS,
        menu::LoopOutcome::ValidationFailure => ExitCode::FAILURE,
    })
}
