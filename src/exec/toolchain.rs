//! Toolchain invoker
//!
//! Runs the compile step of a strategy synchronously on the calling thread
//! and turns a strategy into something runnable. Callers that must stay
//! responsive invoke this from a background thread.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::strategy::{
    direct_argv, source_dir, CompileRecipe, ExecutionStrategy, RunCommand, Scaffold,
};

/// Result of a compile step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Compiler exited 0; diagnostics may still hold warnings
    Success { diagnostics: String },
    /// Compiler exited non-zero; diagnostics verbatim
    CompileFailed { diagnostics: String },
    /// Compiler binary could not be found
    ToolchainMissing { tool: String },
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Success { .. })
    }
}

/// What to do with a saved file once any compile step is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preparation {
    /// Start this command; `diagnostics` holds compiler warnings, if any
    Run {
        command: RunCommand,
        diagnostics: Option<String>,
    },
    /// Hand this file to the external viewer. `fallback` explains why when
    /// the strategy wanted to run it instead.
    OpenExternal {
        path: PathBuf,
        diagnostics: Option<String>,
        fallback: Option<String>,
    },
    CompileFailed { diagnostics: String },
    ToolchainMissing { tool: String },
    Unsupported,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToolchainInvoker;

impl ToolchainInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Run the compiler of `recipe` on `source`, capturing all of its output
    pub fn compile(&self, recipe: &CompileRecipe, source: &Path) -> CompileOutcome {
        let artifact = recipe.artifact.resolve(source);
        let args = super::strategy::expand(recipe.args, source, Some(&artifact));
        let cwd = source_dir(source);

        tracing::info!(
            "Compiling {} with {} (artifact {})",
            source.display(),
            recipe.compiler,
            artifact.display()
        );

        let output = Command::new(recipe.compiler)
            .args(&args)
            .current_dir(&cwd)
            .stdin(Stdio::null())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Compiler {} not found: {}", recipe.compiler, e);
                return CompileOutcome::ToolchainMissing {
                    tool: recipe.compiler.to_string(),
                };
            }
            Err(e) => {
                tracing::warn!("Failed to start compiler {}: {}", recipe.compiler, e);
                return CompileOutcome::CompileFailed {
                    diagnostics: format!("Failed to start {}: {}", recipe.compiler, e),
                };
            }
        };

        // Some compilers (tsc) report errors on stdout
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            if !diagnostics.is_empty() && !diagnostics.ends_with('\n') {
                diagnostics.push('\n');
            }
            diagnostics.push_str(&stdout);
        }

        if output.status.success() {
            tracing::info!(
                "Compiled {} ({} bytes of diagnostics)",
                source.display(),
                diagnostics.len()
            );
            CompileOutcome::Success { diagnostics }
        } else {
            tracing::info!("Compilation of {} failed: {}", source.display(), output.status);
            CompileOutcome::CompileFailed { diagnostics }
        }
    }

    /// Whether `tool --version` runs and exits 0
    pub fn probe(&self, tool: &str) -> bool {
        let available = Command::new(tool)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        tracing::debug!("Probe {} --version: {}", tool, available);
        available
    }

    /// Resolve a strategy for `source` into a runnable preparation
    pub fn prepare(&self, strategy: &ExecutionStrategy, source: &Path) -> Preparation {
        match strategy {
            ExecutionStrategy::Direct {
                argv,
                named,
                requires,
                scaffold,
            } => {
                if let Some(requirement) = requires {
                    if !self.probe(requirement.tool) {
                        return Preparation::ToolchainMissing {
                            tool: requirement.label.to_string(),
                        };
                    }
                }
                if let Some(scaffold) = scaffold {
                    if let Err(missing) = self.scaffold(scaffold, source) {
                        return missing;
                    }
                }
                let argv = direct_argv(*argv, *named, source);
                Preparation::Run {
                    command: RunCommand::from_template(argv, source, None),
                    diagnostics: None,
                }
            }
            ExecutionStrategy::CompileThenRun(recipe) => self.prepare_compiled(recipe, source),
            ExecutionStrategy::OpenExternal => Preparation::OpenExternal {
                path: source.to_path_buf(),
                diagnostics: None,
                fallback: None,
            },
            ExecutionStrategy::Unsupported => Preparation::Unsupported,
        }
    }

    fn prepare_compiled(&self, recipe: &CompileRecipe, source: &Path) -> Preparation {
        let diagnostics = match self.compile(recipe, source) {
            CompileOutcome::Success { diagnostics } => {
                (!diagnostics.trim().is_empty()).then_some(diagnostics)
            }
            CompileOutcome::CompileFailed { diagnostics } => {
                return Preparation::CompileFailed { diagnostics }
            }
            CompileOutcome::ToolchainMissing { tool } => {
                return Preparation::ToolchainMissing { tool }
            }
        };

        let artifact = recipe.artifact.resolve(source);

        if let Some(runtime) = recipe.runtime_probe {
            if !self.probe(runtime) {
                tracing::info!(
                    "{} unavailable, opening {} externally",
                    runtime,
                    artifact.display()
                );
                return Preparation::OpenExternal {
                    fallback: Some(format!(
                        "{} not found - opened compiled {} in browser",
                        runtime,
                        artifact
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default()
                    )),
                    path: artifact,
                    diagnostics,
                };
            }
        }

        Preparation::Run {
            command: RunCommand::from_template(recipe.run, source, Some(&artifact)),
            diagnostics,
        }
    }

    /// One-time project setup. Missing tool is reported like a missing compiler.
    fn scaffold(&self, scaffold: &Scaffold, source: &Path) -> Result<(), Preparation> {
        let dir = source_dir(source);
        if dir.join(scaffold.marker).exists() {
            return Ok(());
        }

        let command = RunCommand::from_template(scaffold.argv, source, None);
        let tool = command.program_display();
        let Some(mut cmd) = command.to_command() else {
            return Ok(());
        };

        tracing::info!("Scaffolding project in {}: {}", dir.display(), command);
        match cmd.stdin(Stdio::null()).output() {
            Ok(output) if !output.status.success() => {
                tracing::warn!(
                    "Scaffold command exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr)
                );
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Preparation::ToolchainMissing { tool })
            }
            Err(e) => {
                tracing::warn!("Scaffold command failed to start: {}", e);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::strategy::{Arg, ArtifactPath, NamedArgv, Requirement};

    const MISSING: CompileRecipe = CompileRecipe {
        compiler: "mocha-no-such-compiler-7f3a",
        args: &[Arg::Source],
        artifact: ArtifactPath::SiblingWithExtension("out"),
        run: &[Arg::Artifact],
        runtime_probe: None,
    };

    #[test]
    fn test_missing_compiler_is_toolchain_missing() {
        let outcome = ToolchainInvoker::new().compile(&MISSING, Path::new("/tmp/x.c"));
        assert_eq!(
            outcome,
            CompileOutcome::ToolchainMissing {
                tool: "mocha-no-such-compiler-7f3a".to_string()
            }
        );
    }

    #[test]
    fn test_prepare_missing_compiler_builds_no_command() {
        let strategy = ExecutionStrategy::CompileThenRun(MISSING);
        let prepared = ToolchainInvoker::new().prepare(&strategy, Path::new("/tmp/x.c"));
        assert!(matches!(prepared, Preparation::ToolchainMissing { .. }));
    }

    #[test]
    fn test_prepare_direct() {
        let strategy = ExecutionStrategy::direct(&[Arg::Lit("ruby"), Arg::Source]);
        let prepared = ToolchainInvoker::new().prepare(&strategy, Path::new("/w/a.rb"));
        match prepared {
            Preparation::Run {
                command,
                diagnostics,
            } => {
                assert_eq!(command.to_string(), "ruby /w/a.rb");
                assert_eq!(command.cwd, PathBuf::from("/w"));
                assert!(diagnostics.is_none());
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_prepare_direct_missing_requirement_reports_label() {
        let strategy = ExecutionStrategy::Direct {
            argv: &[Arg::Lit("mocha-no-such-runtime-7f3a"), Arg::Lit("run")],
            named: None,
            requires: Some(Requirement {
                tool: "mocha-no-such-runtime-7f3a",
                label: "Example SDK",
            }),
            scaffold: None,
        };
        let prepared = ToolchainInvoker::new().prepare(&strategy, Path::new("/w/a.cs"));
        assert_eq!(
            prepared,
            Preparation::ToolchainMissing {
                tool: "Example SDK".to_string()
            }
        );
    }

    #[test]
    fn test_prepare_direct_uses_named_argv() {
        let strategy = ExecutionStrategy::Direct {
            argv: &[Arg::Lit("nix-shell"), Arg::Source],
            named: Some(NamedArgv {
                file_name: "flake.nix",
                argv: &[Arg::Lit("nix"), Arg::Lit("develop"), Arg::Lit(".")],
            }),
            requires: None,
            scaffold: None,
        };
        let invoker = ToolchainInvoker::new();

        let Preparation::Run { command, .. } = invoker.prepare(&strategy, Path::new("/w/flake.nix"))
        else {
            panic!("Expected Run for flake.nix");
        };
        assert_eq!(command.to_string(), "nix develop .");
        assert_eq!(command.cwd, PathBuf::from("/w"));

        let Preparation::Run { command, .. } = invoker.prepare(&strategy, Path::new("/w/shell.nix"))
        else {
            panic!("Expected Run for shell.nix");
        };
        assert_eq!(command.to_string(), "nix-shell /w/shell.nix");
    }

    #[test]
    fn test_prepare_open_external_and_unsupported() {
        let invoker = ToolchainInvoker::new();
        assert!(matches!(
            invoker.prepare(&ExecutionStrategy::OpenExternal, Path::new("/w/index.html")),
            Preparation::OpenExternal { fallback: None, .. }
        ));
        assert_eq!(
            invoker.prepare(&ExecutionStrategy::Unsupported, Path::new("/w/k.ptx")),
            Preparation::Unsupported
        );
    }

    #[test]
    fn test_probe_missing_tool() {
        assert!(!ToolchainInvoker::new().probe("mocha-no-such-runtime-7f3a"));
    }
}
