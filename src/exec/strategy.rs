//! Execution strategies and argv templates
//!
//! Every language resolves its run recipe through [`ExecutionStrategy`]. The
//! argv builders are plain data ([`Arg`] templates) expanded against the saved
//! source path, so no language needs bespoke code to say how it runs.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One element of an argv template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// A literal argument (or the program name when first)
    Lit(&'static str),
    /// Absolute path of the saved source file
    Source,
    /// Path of the compiled artifact (falls back to the source for direct runs)
    Artifact,
    /// Source file name without its extension (JVM class name)
    Stem,
}

/// An argv template; the first element is the program
pub type Argv = &'static [Arg];

/// Where a compile step leaves its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactPath {
    /// Next to the source with the extension replaced (`hello.c` -> `hello.out`)
    SiblingWithExtension(&'static str),
    /// A fixed file name in the source directory (`output.jar`)
    InSourceDir(&'static str),
}

impl ArtifactPath {
    pub fn resolve(&self, source: &Path) -> PathBuf {
        match self {
            ArtifactPath::SiblingWithExtension(ext) => source.with_extension(ext),
            ArtifactPath::InSourceDir(name) => source_dir(source).join(name),
        }
    }
}

/// Compile-then-run recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileRecipe {
    /// Compiler binary, reported by name when missing
    pub compiler: &'static str,
    /// Compiler arguments (program excluded)
    pub args: Argv,
    pub artifact: ArtifactPath,
    /// Run command built from the artifact
    pub run: Argv,
    /// Secondary runtime that must answer `--version` before the run command
    /// is used. When it does not, the artifact is opened externally instead.
    pub runtime_probe: Option<&'static str>,
}

/// One-time project setup performed before a direct run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scaffold {
    /// File in the source directory whose presence means setup already happened
    pub marker: &'static str,
    pub argv: Argv,
}

/// A tool that must answer `--version` before a direct run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub tool: &'static str,
    /// Name reported when the tool is missing (".NET SDK")
    pub label: &'static str,
}

/// Argv used instead of the default one for sources with this exact file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedArgv {
    pub file_name: &'static str,
    pub argv: Argv,
}

/// How a saved file becomes a running process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Hand the source straight to an interpreter
    Direct {
        argv: Argv,
        named: Option<NamedArgv>,
        requires: Option<Requirement>,
        scaffold: Option<Scaffold>,
    },
    /// Compile to an artifact, then run it
    CompileThenRun(CompileRecipe),
    /// Open the file in the default browser/viewer
    OpenExternal,
    /// No runner exists for this language
    Unsupported,
}

impl ExecutionStrategy {
    pub const fn direct(argv: Argv) -> Self {
        ExecutionStrategy::Direct {
            argv,
            named: None,
            requires: None,
            scaffold: None,
        }
    }

    /// Short label used by `mocha languages` and in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionStrategy::Direct { .. } => "direct",
            ExecutionStrategy::CompileThenRun(_) => "compile-then-run",
            ExecutionStrategy::OpenExternal => "open-external",
            ExecutionStrategy::Unsupported => "unsupported",
        }
    }

    /// The binary this strategy needs first (interpreter or compiler)
    pub fn toolchain(&self) -> Option<&'static str> {
        match self {
            ExecutionStrategy::Direct { argv, requires, .. } => {
                requires.map(|r| r.tool).or_else(|| program_name(argv))
            }
            ExecutionStrategy::CompileThenRun(recipe) => Some(recipe.compiler),
            ExecutionStrategy::OpenExternal | ExecutionStrategy::Unsupported => None,
        }
    }
}

/// Argv template for a direct run of `source`
pub fn direct_argv(argv: Argv, named: Option<NamedArgv>, source: &Path) -> Argv {
    match named {
        Some(named) if source.file_name().is_some_and(|n| n == named.file_name) => named.argv,
        _ => argv,
    }
}

fn program_name(argv: Argv) -> Option<&'static str> {
    match argv.first() {
        Some(Arg::Lit(program)) => Some(*program),
        _ => None,
    }
}

/// Directory a source file lives in (runs and compiles use it as cwd)
pub fn source_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Expand an argv template against a source path and optional artifact
pub fn expand(argv: Argv, source: &Path, artifact: Option<&Path>) -> Vec<OsString> {
    argv.iter()
        .map(|arg| match arg {
            Arg::Lit(s) => OsString::from(s),
            Arg::Source => source.as_os_str().to_owned(),
            Arg::Artifact => artifact.unwrap_or(source).as_os_str().to_owned(),
            Arg::Stem => source
                .file_stem()
                .map(|stem| stem.to_owned())
                .unwrap_or_default(),
        })
        .collect()
}

/// A fully expanded command line with its working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub argv: Vec<OsString>,
    pub cwd: PathBuf,
}

impl RunCommand {
    pub fn new(argv: Vec<OsString>, cwd: PathBuf) -> Self {
        Self { argv, cwd }
    }

    /// Build from a template; cwd is the source directory
    pub fn from_template(argv: Argv, source: &Path, artifact: Option<&Path>) -> Self {
        Self::new(expand(argv, source, artifact), source_dir(source))
    }

    pub fn program(&self) -> Option<&OsString> {
        self.argv.first()
    }

    /// Program name as text, for messages
    pub fn program_display(&self) -> String {
        self.program()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// A `std::process::Command` with program, args and cwd set.
    /// Returns `None` for an empty argv.
    pub fn to_command(&self) -> Option<Command> {
        let (program, args) = self.argv.split_first()?;
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&self.cwd);
        Some(cmd)
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self.argv.iter().map(|a| a.to_string_lossy()).collect();
        write!(f, "{}", parts.join(" "))
    }
}
