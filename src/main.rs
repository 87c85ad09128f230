use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use mocha::cli::{CliArgs, CliCommand};
use mocha::document::Document;
use mocha::language::{LanguageRegistry, LanguageSpec};
use mocha::syntax::{Highlighter, Tokenizer};
use mocha::theme::{self, Theme};
use mocha::{MochaConfig, Session};

/// How often `mocha run` drains background output
const PUMP_INTERVAL: Duration = Duration::from_millis(20);

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();

    mocha::tracing::init();
    let config = MochaConfig::load();

    match args.command {
        CliCommand::Run { file, language } => run_file(&config, file, language.as_deref()),
        CliCommand::Highlight {
            file,
            language,
            json,
            whole_document,
        } => {
            highlight_file(&config, &file, language.as_deref(), json, whole_document)?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Languages => {
            list_languages()?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::New { language, path } => {
            new_file(&language, &path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_file(config: &MochaConfig, file: PathBuf, language: Option<&str>) -> Result<ExitCode> {
    let mut session = Session::from_config(config);
    let tab = match language {
        Some(id) => session.open_file_as(&file, id),
        None => session.open_file(&file),
    }
    .with_context(|| format!("failed to open {}", file.display()))?;

    session
        .run(tab)
        .with_context(|| format!("failed to run {}", file.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut printed = 0;
    loop {
        session.process_messages();
        let Some(current) = session.tab(tab) else {
            break;
        };

        let fresh = current.console.since(printed);
        if !fresh.is_empty() {
            out.write_all(fresh.as_bytes())?;
            out.flush()?;
            printed = current.console.len();
        }

        if !current.is_running() {
            break;
        }
        std::thread::sleep(PUMP_INTERVAL);
    }

    let succeeded = session
        .tab(tab)
        .and_then(|t| t.last_result())
        .is_some_and(|result| result.is_success());
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn resolve_language(path: &Path, language: Option<&str>) -> Result<&'static LanguageSpec> {
    let registry = LanguageRegistry::builtin();
    match language {
        Some(id) => Ok(registry.resolve(id)?),
        None => Ok(registry.from_path(path)),
    }
}

fn highlight_file(
    config: &MochaConfig,
    file: &Path,
    language: Option<&str>,
    json: bool,
    whole_document: bool,
) -> Result<()> {
    let spec = resolve_language(file, language)?;
    let document = Document::from_file(file.to_path_buf())?;
    let text = document.text();

    let spans = if whole_document {
        Tokenizer::for_language(spec).classify(&text)
    } else {
        let mut highlighter = Highlighter::new(spec);
        highlighter.refresh(&document);
        highlighter.document_spans(&document)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &spans).context("failed to write spans")?;
        writeln!(out)?;
    } else {
        let theme = theme::load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!("Theme {:?} unavailable ({}), using mocha", config.theme, e);
            Theme::mocha()
        });
        out.write_all(theme.paint(&text, &spans).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn list_languages() -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:<12} {:<6} {:<18} TOOLCHAIN", "LANGUAGE", "EXT", "STRATEGY")?;
    for spec in LanguageRegistry::builtin().iter() {
        writeln!(
            out,
            "{:<12} {:<6} {:<18} {}",
            spec.id,
            spec.extension,
            spec.strategy.kind(),
            spec.strategy.toolchain().unwrap_or("-")
        )?;
    }
    Ok(())
}

fn new_file(language: &str, path: &Path) -> Result<()> {
    let spec = LanguageRegistry::builtin().resolve(language)?;
    let mut document = Document::with_text(spec.sample);
    let written = document
        .save(Some(path), spec.extension)
        .with_context(|| format!("failed to create {} file", spec.id))?;
    println!("Created {}", written.display());
    Ok(())
}
