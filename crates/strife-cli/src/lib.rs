//! CLI logic for the Strife declaration parser.
//!
//! This module contains the core CLI logic: load the configuration, parse the
//! input file with its includes, optionally lower it, and write an outline.

pub mod error_adapter;
pub mod outline;

mod args;
mod config;

pub use args::Args;

use std::{fmt, fs, io};

use log::info;

use strife::{Frontend, ParseOutput, StrifeError, codebase::Codebase};

/// Run the Strife CLI application
///
/// This function parses the input file through the Strife front end and
/// writes the resulting outline to the output file, or to stdout.
///
/// # Errors
///
/// Returns `StrifeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), StrifeError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing source"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let frontend = Frontend::new(app_config);
    let output = frontend.parse_file(&args.input)?;

    let text = render(args, &frontend, &output).map_err(io::Error::other)?;

    match &args.output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path; "Outline written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn render(args: &Args, frontend: &Frontend, output: &ParseOutput) -> Result<String, fmt::Error> {
    let lowered;
    let tree: &Codebase = if args.lower {
        lowered = frontend.lower(output.codebase());
        &lowered
    } else {
        output.codebase()
    };

    let mut text = String::new();
    outline::write_tree(&mut text, tree)?;
    if args.tasks {
        outline::write_task_items(&mut text, &tree.all_task_items())?;
    }
    if args.bindings {
        outline::write_bindings(&mut text, &frontend.bindings(output.codebase()))?;
    }
    Ok(text)
}
