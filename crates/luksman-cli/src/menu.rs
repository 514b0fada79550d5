//! The main menu loop and per-operation prompting.
//!
//! Contract: external-tool failures and operator cancellation always return
//! to the menu. The only in-loop condition that ends the process abnormally
//! is a container-size validation failure during creation, which the caller
//! turns into exit code 1.

use crate::prompt::{self, PromptLine};
use luksman_core::config::LuksmanConfig;
use luksman_core::error::LuksmanError;
use luksman_core::ident::NameFactory;
use luksman_core::layout::Layout;
use luksman_core::provider::ContainerProvider;
use luksman_core::workflow::{self, CreateRequest, OpenRequest, WorkflowLevel, WorkflowReport};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Create,
    Open,
    Close,
    Status,
    Cleanup,
    Exit,
}

/// Why the menu loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    Exit,
    ValidationFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpOutcome {
    Done,
    ValidationFailure,
}

pub fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim() {
        "1" => Some(Choice::Create),
        "2" => Some(Choice::Open),
        "3" => Some(Choice::Close),
        "4" => Some(Choice::Status),
        "5" => Some(Choice::Cleanup),
        "6" => Some(Choice::Exit),
        _ => None,
    }
}

/// Run the interactive loop until the operator exits.
pub fn run_loop<P, N, R, W>(
    config: &LuksmanConfig,
    provider: &P,
    names: &N,
    layout: &Layout,
    input: &mut R,
    out: &mut W,
) -> io::Result<LoopOutcome>
where
    P: ContainerProvider<Error = LuksmanError>,
    N: NameFactory,
    R: BufRead,
    W: Write,
{
    loop {
        clear_screen(out)?;
        writeln!(out, "*** LUKS container manager ***\n")?;
        show_mappings(provider, out)?;
        writeln!(out, "\nWhat would you like to do?")?;
        writeln!(out, "1 = Create a new LUKS container")?;
        writeln!(out, "2 = Open a LUKS container")?;
        writeln!(out, "3 = Close a LUKS container")?;
        writeln!(out, "4 = Check status of a mapping name")?;
        writeln!(out, "5 = Clean mount points")?;
        writeln!(out, "6 = Exit\n")?;

        let selection = match prompt::read_input(input, out, "> ")? {
            PromptLine::Eof => return Ok(LoopOutcome::Exit),
            PromptLine::Cancelled => continue,
            PromptLine::Value(value) => value,
        };
        let Some(choice) = parse_choice(&selection) else {
            continue;
        };

        clear_screen(out)?;
        match choice {
            Choice::Exit => return Ok(LoopOutcome::Exit),
            Choice::Create => {
                if run_create(config, provider, names, layout, input, out)?
                    == OpOutcome::ValidationFailure
                {
                    return Ok(LoopOutcome::ValidationFailure);
                }
            }
            Choice::Open => run_open(config, provider, names, layout, input, out)?,
            Choice::Close => run_close(provider, layout, input, out)?,
            Choice::Status => run_status(provider, input, out)?,
            Choice::Cleanup => run_cleanup(provider, layout, input, out)?,
        }
    }
}

fn run_create<P, N, R, W>(
    config: &LuksmanConfig,
    provider: &P,
    names: &N,
    layout: &Layout,
    input: &mut R,
    out: &mut W,
) -> io::Result<OpOutcome>
where
    P: ContainerProvider<Error = LuksmanError>,
    N: NameFactory,
    R: BufRead,
    W: Write,
{
    writeln!(out, "*** Create a new LUKS container ***")?;
    writeln!(out, "Enter a blank line at any prompt to abort.\n")?;

    let PromptLine::Value(container) = prompt::read_input(input, out, "Container file path: ")?
    else {
        return Ok(OpOutcome::Done);
    };
    let PromptLine::Value(size_raw) = prompt::read_input(input, out, "Container size in MiB: ")?
    else {
        return Ok(OpOutcome::Done);
    };
    let Ok(size_mib) = size_raw.parse::<u64>() else {
        writeln!(out, "error: container size must be a whole number of MiB")?;
        return Ok(OpOutcome::ValidationFailure);
    };

    let request = CreateRequest {
        container: PathBuf::from(container),
        size_mib,
    };
    match workflow::create(config, provider, names, layout, &request) {
        Ok(report) => {
            render_report(out, &report)?;
            prompt::pause(input, out)?;
            Ok(OpOutcome::Done)
        }
        Err(LuksmanError::Validation(message)) => {
            writeln!(out, "error: {message}")?;
            Ok(OpOutcome::ValidationFailure)
        }
        Err(err) => {
            writeln!(out, "error: {err}")?;
            prompt::pause(input, out)?;
            Ok(OpOutcome::Done)
        }
    }
}

fn run_open<P, N, R, W>(
    config: &LuksmanConfig,
    provider: &P,
    names: &N,
    layout: &Layout,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    P: ContainerProvider<Error = LuksmanError>,
    N: NameFactory,
    R: BufRead,
    W: Write,
{
    writeln!(out, "*** Open a LUKS container ***")?;
    writeln!(out, "Enter a blank line at any prompt to abort.\n")?;

    let PromptLine::Value(container) = prompt::read_input(input, out, "Container file to open: ")?
    else {
        return Ok(());
    };

    let request = OpenRequest {
        container: PathBuf::from(container),
    };
    finish_operation(
        workflow::open(config, provider, names, layout, &request),
        input,
        out,
    )
}

fn run_close<P, R, W>(provider: &P, layout: &Layout, input: &mut R, out: &mut W) -> io::Result<()>
where
    P: ContainerProvider<Error = LuksmanError>,
    R: BufRead,
    W: Write,
{
    writeln!(out, "*** Close a LUKS container ***")?;
    writeln!(out, "Enter a blank line at any prompt to abort.\n")?;
    show_mappings(provider, out)?;
    writeln!(out)?;

    let PromptLine::Value(mapping) = prompt::read_input(input, out, "Enter mapping name: ")?
    else {
        return Ok(());
    };

    finish_operation(workflow::close(provider, layout, &mapping), input, out)
}

fn run_status<P, R, W>(provider: &P, input: &mut R, out: &mut W) -> io::Result<()>
where
    P: ContainerProvider<Error = LuksmanError>,
    R: BufRead,
    W: Write,
{
    writeln!(out, "*** Check container status ***")?;
    writeln!(out, "Enter a blank line at any prompt to abort.\n")?;
    show_mappings(provider, out)?;
    writeln!(out)?;

    let PromptLine::Value(mapping) = prompt::read_input(input, out, "Enter mapping name: ")?
    else {
        return Ok(());
    };

    finish_operation(workflow::status(provider, &mapping), input, out)
}

fn run_cleanup<P, R, W>(provider: &P, layout: &Layout, input: &mut R, out: &mut W) -> io::Result<()>
where
    P: ContainerProvider<Error = LuksmanError>,
    R: BufRead,
    W: Write,
{
    writeln!(out, "*** Clean mount points ***\n")?;
    writeln!(
        out,
        "WARNING: this removes {} recursively, without checking for active mounts.",
        layout.mount_root().display()
    )?;
    writeln!(out, "Do not proceed while mapping names are active.\n")?;
    show_mappings(provider, out)?;
    writeln!(out)?;

    let confirmation = prompt::read_input(input, out, "Type YES to proceed: ")?;
    if confirmation != PromptLine::Value("YES".into()) {
        writeln!(out, "Cleanup aborted.")?;
        return Ok(());
    }

    finish_operation(workflow::clean_mount_points(provider, layout), input, out)
}

/// Render a workflow result and hold the screen; errors come back to the menu.
fn finish_operation<R, W>(
    result: Result<WorkflowReport, LuksmanError>,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    match result {
        Ok(report) => render_report(out, &report)?,
        Err(err) => writeln!(out, "error: {err}")?,
    }
    prompt::pause(input, out)
}

fn show_mappings<P, W>(provider: &P, out: &mut W) -> io::Result<()>
where
    P: ContainerProvider<Error = LuksmanError>,
    W: Write,
{
    writeln!(out, "Active mapping names:")?;
    out.flush()?;
    if let Err(err) = provider.list_mappings() {
        writeln!(out, "  (listing failed: {err})")?;
    }
    Ok(())
}

fn render_report<W: Write>(out: &mut W, report: &WorkflowReport) -> io::Result<()> {
    writeln!(out, "{}", report.title)?;
    for event in &report.events {
        writeln!(out, "  [{}] {}", level_tag(event.level), event.message)?;
    }
    Ok(())
}

fn level_tag(level: WorkflowLevel) -> &'static str {
    match level {
        WorkflowLevel::Info => "INFO",
        WorkflowLevel::Success => "OK",
        WorkflowLevel::Warn => "WARN",
    }
}

fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[2J\x1b[H")?;
    out.flush()
}
