//! Language table and lookups
//!
//! Maps language identifiers to extension, comment syntax, keywords, sample
//! template and execution strategy. This table is the only place language
//! identifiers are spelled out; every other component asks it.

use std::path::Path;
use std::sync::OnceLock;

use super::{keywords, samples};
use crate::error::{Error, Result};
use crate::exec::strategy::{
    Arg, ArtifactPath, CompileRecipe, ExecutionStrategy, NamedArgv, Requirement, Scaffold,
};

/// Comment family of a language; selects the comment highlight rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `# ...` to end of line
    Hash,
    /// `-- ...` to end of line
    DoubleDash,
    /// `// ...` plus `/* ... */`
    CFamily,
    /// `<!-- ... -->`
    Markup,
    /// `/* ... */` only
    Stylesheet,
}

/// Immutable description of one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSpec {
    /// Unique key, e.g. "Python"
    pub id: &'static str,
    /// Canonical extension including the dot
    pub extension: &'static str,
    pub comment: CommentSyntax,
    pub strategy: ExecutionStrategy,
    pub keywords: &'static [&'static str],
    pub sample: &'static str,
}

/// The set of known languages, in registration order
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    specs: Vec<LanguageSpec>,
}

impl LanguageRegistry {
    /// Build a registry, rejecting duplicate ids or extensions
    pub fn new(specs: Vec<LanguageSpec>) -> Result<Self> {
        for (i, spec) in specs.iter().enumerate() {
            for earlier in &specs[..i] {
                if earlier.id == spec.id {
                    return Err(Error::Config(format!("language {} registered twice", spec.id)));
                }
                if earlier.extension.eq_ignore_ascii_case(spec.extension) {
                    return Err(Error::DuplicateExtension {
                        extension: spec.extension.to_string(),
                        first: earlier.id.to_string(),
                        second: spec.id.to_string(),
                    });
                }
            }
        }
        Ok(Self { specs })
    }

    /// The built-in language set, fixed at process start
    pub fn builtin() -> &'static LanguageRegistry {
        static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| LanguageRegistry {
            specs: builtin_specs(),
        })
    }

    /// Look up a language by id. Exact match first, then ASCII case-insensitive.
    pub fn resolve(&self, id: &str) -> Result<&LanguageSpec> {
        self.specs
            .iter()
            .find(|spec| spec.id == id)
            .or_else(|| self.specs.iter().find(|spec| spec.id.eq_ignore_ascii_case(id)))
            .ok_or_else(|| Error::UnknownLanguage(id.to_string()))
    }

    pub fn strategy_for(&self, id: &str) -> Result<ExecutionStrategy> {
        self.resolve(id).map(|spec| spec.strategy)
    }

    /// Reverse lookup by extension, with or without the leading dot
    pub fn from_extension(&self, ext: &str) -> Option<&LanguageSpec> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        self.specs
            .iter()
            .find(|spec| spec.extension.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Detect a language from a file path, falling back to the default language
    pub fn from_path(&self, path: &Path) -> &LanguageSpec {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.from_extension(ext))
            .unwrap_or_else(|| self.default_language())
    }

    /// First registered language
    pub fn default_language(&self) -> &LanguageSpec {
        &self.specs[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

const TYPESCRIPT: CompileRecipe = CompileRecipe {
    compiler: "tsc",
    args: &[Arg::Source],
    artifact: ArtifactPath::SiblingWithExtension("js"),
    run: &[Arg::Lit("node"), Arg::Artifact],
    runtime_probe: Some("node"),
};

fn native(compiler: &'static str) -> ExecutionStrategy {
    ExecutionStrategy::CompileThenRun(CompileRecipe {
        compiler,
        args: &[Arg::Source, Arg::Lit("-o"), Arg::Artifact],
        artifact: ArtifactPath::SiblingWithExtension("out"),
        run: &[Arg::Artifact],
        runtime_probe: None,
    })
}

fn builtin_specs() -> Vec<LanguageSpec> {
    vec![
        LanguageSpec {
            id: "Python",
            extension: ".py",
            comment: CommentSyntax::Hash,
            strategy: ExecutionStrategy::direct(&[Arg::Lit("python3"), Arg::Source]),
            keywords: keywords::PYTHON,
            sample: samples::PYTHON,
        },
        LanguageSpec {
            id: "PTX",
            extension: ".ptx",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::Unsupported,
            keywords: keywords::PTX,
            sample: samples::PTX,
        },
        LanguageSpec {
            id: "Java",
            extension: ".java",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::CompileThenRun(CompileRecipe {
                compiler: "javac",
                args: &[Arg::Source],
                artifact: ArtifactPath::SiblingWithExtension("class"),
                run: &[Arg::Lit("java"), Arg::Stem],
                runtime_probe: None,
            }),
            keywords: keywords::JAVA,
            sample: samples::JAVA,
        },
        LanguageSpec {
            id: "C",
            extension: ".c",
            comment: CommentSyntax::CFamily,
            strategy: native("gcc"),
            keywords: keywords::C,
            sample: samples::C,
        },
        LanguageSpec {
            id: "C++",
            extension: ".cpp",
            comment: CommentSyntax::CFamily,
            strategy: native("g++"),
            keywords: keywords::CPP,
            sample: samples::CPP,
        },
        LanguageSpec {
            id: "JavaScript",
            extension: ".js",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::direct(&[Arg::Lit("node"), Arg::Source]),
            keywords: keywords::JAVASCRIPT,
            sample: samples::JAVASCRIPT,
        },
        LanguageSpec {
            id: "TypeScript",
            extension: ".ts",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::CompileThenRun(TYPESCRIPT),
            keywords: keywords::TYPESCRIPT,
            sample: samples::TYPESCRIPT,
        },
        LanguageSpec {
            id: "Rust",
            extension: ".rs",
            comment: CommentSyntax::CFamily,
            strategy: native("rustc"),
            keywords: keywords::RUST,
            sample: samples::RUST,
        },
        LanguageSpec {
            id: "Go",
            extension: ".go",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::direct(&[Arg::Lit("go"), Arg::Lit("run"), Arg::Source]),
            keywords: keywords::GO,
            sample: samples::GO,
        },
        LanguageSpec {
            id: "C#",
            extension: ".cs",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::Direct {
                argv: &[Arg::Lit("dotnet"), Arg::Lit("run")],
                named: None,
                requires: Some(Requirement {
                    tool: "dotnet",
                    label: ".NET SDK",
                }),
                scaffold: Some(Scaffold {
                    marker: "project.csproj",
                    argv: &[
                        Arg::Lit("dotnet"),
                        Arg::Lit("new"),
                        Arg::Lit("console"),
                        Arg::Lit("-o"),
                        Arg::Lit("."),
                    ],
                }),
            },
            keywords: &[],
            sample: samples::CSHARP,
        },
        LanguageSpec {
            id: "Ruby",
            extension: ".rb",
            comment: CommentSyntax::Hash,
            strategy: ExecutionStrategy::direct(&[Arg::Lit("ruby"), Arg::Source]),
            keywords: keywords::RUBY,
            sample: samples::RUBY,
        },
        LanguageSpec {
            id: "Kotlin",
            extension: ".kt",
            comment: CommentSyntax::CFamily,
            strategy: ExecutionStrategy::CompileThenRun(CompileRecipe {
                compiler: "kotlinc",
                args: &[
                    Arg::Source,
                    Arg::Lit("-include-runtime"),
                    Arg::Lit("-d"),
                    Arg::Artifact,
                ],
                artifact: ArtifactPath::InSourceDir("output.jar"),
                run: &[Arg::Lit("java"), Arg::Lit("-jar"), Arg::Artifact],
                runtime_probe: None,
            }),
            keywords: &[],
            sample: samples::KOTLIN,
        },
        LanguageSpec {
            id: "HTML",
            extension: ".html",
            comment: CommentSyntax::Markup,
            strategy: ExecutionStrategy::OpenExternal,
            keywords: keywords::HTML,
            sample: samples::HTML,
        },
        LanguageSpec {
            id: "CSS",
            extension: ".css",
            comment: CommentSyntax::Stylesheet,
            strategy: ExecutionStrategy::OpenExternal,
            keywords: keywords::CSS,
            sample: samples::CSS,
        },
        LanguageSpec {
            id: "Lua",
            extension: ".lua",
            comment: CommentSyntax::DoubleDash,
            strategy: ExecutionStrategy::direct(&[Arg::Lit("lua"), Arg::Source]),
            keywords: &[],
            sample: samples::LUA,
        },
        LanguageSpec {
            id: "Nix",
            extension: ".nix",
            comment: CommentSyntax::Hash,
            strategy: ExecutionStrategy::Direct {
                argv: &[Arg::Lit("nix-shell"), Arg::Source],
                named: Some(NamedArgv {
                    file_name: "flake.nix",
                    argv: &[Arg::Lit("nix"), Arg::Lit("develop"), Arg::Lit(".")],
                }),
                requires: Some(Requirement {
                    tool: "nix",
                    label: "Nix",
                }),
                scaffold: None,
            },
            keywords: &[],
            sample: samples::NIX,
        },
    ]
}
