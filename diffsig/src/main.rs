//! # diffsig
//!
//! A CLI for estimating how much *meaningful* change a patch contains.
//!
//! ## Overview
//!
//! diffsig is built on top of diffsiglib. It reads a unified multi-file diff
//! (from a file or stdin), drops ignorable files, cancels moved and
//! reformatted lines, and prints the significant-line count.
//!
//! ## Usage
//!
//! ```bash
//! # Count the significant lines of a saved patch
//! diffsig changes.patch
//!
//! # Pipe straight from git
//! git diff main..feature | diffsig
//!
//! # Show the per-file breakdown
//! git diff | diffsig --by-file
//!
//! # Extend the ignore list, or start it empty
//! diffsig changes.patch --ignore generated/ --ignore .pb.go
//! diffsig changes.patch --no-default-ignores
//!
//! # Machine-readable output
//! diffsig changes.patch --output json
//! ```

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use diffsiglib::{
    analyze_patch, CountOptions, IgnoreConfig, LineNormalizer, SignificanceReport,
};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("diffsig")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count the significant changed lines of a unified diff")
        .arg(
            Arg::new("patch")
                .help("Patch file to analyze; reads stdin when omitted or '-'"),
        )
        .arg(
            Arg::new("ignore")
                .short('i')
                .long("ignore")
                .action(ArgAction::Append)
                .value_name("SUBSTRING")
                .help("Ignore files whose path contains this substring (can be repeated)"),
        )
        .arg(
            Arg::new("no-default-ignores")
                .long("no-default-ignores")
                .action(ArgAction::SetTrue)
                .help("Start from an empty ignore list instead of the built-in one"),
        )
        .arg(
            Arg::new("strip-chars")
                .long("strip-chars")
                .value_name("CHARS")
                .help("Punctuation the normalizer deletes before comparing lines [default: \"'`;,]"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show the per-file breakdown"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
}

/// Read the patch text from the positional argument or stdin.
fn read_patch(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.get_one::<String>("patch").map(String::as_str) {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read patch from stdin")?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read patch file '{path}'")),
    }
}

/// Translate CLI flags into library options.
fn build_options(matches: &ArgMatches) -> CountOptions {
    let mut ignore = if matches.get_flag("no-default-ignores") {
        IgnoreConfig::empty()
    } else {
        IgnoreConfig::new()
    };
    if let Some(extra) = matches.get_many::<String>("ignore") {
        ignore = ignore.extend(extra.cloned());
    }

    let normalizer = match matches.get_one::<String>("strip-chars") {
        Some(chars) => LineNormalizer::with_chars(chars.chars()),
        None => LineNormalizer::new(),
    };

    CountOptions::new().ignore(ignore).normalizer(normalizer)
}

/// Render the human-readable report.
fn render_text(report: &SignificanceReport, by_file: bool) -> String {
    let mut lines = Vec::new();

    if by_file {
        for file in &report.files {
            lines.push(format!(
                "{} => {}: {} lines",
                file.old_path, file.new_path, file.lines
            ));
        }
        if !report.files.is_empty() {
            lines.push(String::new());
        }
    }

    lines.push(format!(
        "including moved lines: +{} / -{}",
        report.including_moved.added, report.including_moved.deleted
    ));
    lines.push(format!(
        "excluding moved lines: +{} / -{}",
        report.significant.added, report.significant.deleted
    ));
    lines.push(format!(
        "{} {}",
        style("significant lines:").bold(),
        style(report.significant_lines()).bold()
    ));

    lines.join("\n")
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let patch = read_patch(matches)?;
    let options = build_options(matches);
    let report = analyze_patch(&patch, &options)?;

    if matches.get_one::<String>("output").map(String::as_str) == Some("json") {
        let mut value = serde_json::to_value(&report)?;
        value["significant_lines"] = serde_json::json!(report.significant_lines());
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    Ok(render_text(&report, matches.get_flag("by-file")))
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
