//! Command-line argument parsing
//!
//! Supports:
//! - Running a source file through its language toolchain
//! - Printing a highlighted file (ANSI or JSON spans)
//! - Listing the registered languages
//! - Writing a language's starter template

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edit-and-run companion for many languages
#[derive(Parser, Debug)]
#[command(name = "mocha", version, about = "Run and highlight source files in many languages")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Compile (if needed) and run a file, streaming its console output
    Run {
        file: PathBuf,
        /// Language id; detected from the extension when omitted
        #[arg(short, long, value_name = "ID")]
        language: Option<String>,
    },

    /// Print a file with syntax highlighting
    Highlight {
        file: PathBuf,
        /// Language id; detected from the extension when omitted
        #[arg(short, long, value_name = "ID")]
        language: Option<String>,
        /// Emit token spans as JSON instead of colored text
        #[arg(long)]
        json: bool,
        /// Scan the whole text at once so block comments may span lines
        #[arg(long)]
        whole_document: bool,
    },

    /// List languages with their extension and run strategy
    Languages,

    /// Write a language's sample program to PATH (extension is enforced)
    New {
        #[arg(value_name = "LANGUAGE")]
        language: String,
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}
