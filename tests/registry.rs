//! Language registry tests

use std::collections::HashSet;
use std::path::Path;

use mocha::exec::ExecutionStrategy;
use mocha::language::{CommentSyntax, LanguageRegistry};
use mocha::Error;

#[test]
fn test_every_extension_round_trips() {
    let registry = LanguageRegistry::builtin();
    for spec in registry.iter() {
        let found = registry.from_extension(spec.extension).unwrap();
        assert_eq!(found.id, spec.id, "extension {}", spec.extension);

        let path = format!("dir/file{}", spec.extension);
        assert_eq!(registry.from_path(Path::new(&path)).id, spec.id);
    }
}

#[test]
fn test_extensions_are_unique_and_dotted() {
    let registry = LanguageRegistry::builtin();
    let mut seen = HashSet::new();
    for spec in registry.iter() {
        assert!(spec.extension.starts_with('.'), "{}", spec.id);
        assert!(seen.insert(spec.extension.to_ascii_lowercase()), "{}", spec.extension);
    }
}

#[test]
fn test_every_language_resolves_by_id() {
    let registry = LanguageRegistry::builtin();
    for spec in registry.iter() {
        assert_eq!(registry.resolve(spec.id).unwrap(), spec);
        assert_eq!(registry.strategy_for(spec.id).unwrap(), spec.strategy);
    }
}

#[test]
fn test_unknown_language() {
    let registry = LanguageRegistry::builtin();
    assert!(matches!(registry.resolve("Zig"), Err(Error::UnknownLanguage(id)) if id == "Zig"));
    assert!(registry.strategy_for("Zig").is_err());
}

#[test]
fn test_first_registered_is_default() {
    let registry = LanguageRegistry::builtin();
    assert_eq!(registry.default_language().id, "Python");
    assert_eq!(registry.iter().next().unwrap().id, "Python");
    assert_eq!(registry.from_path(Path::new("README")).id, "Python");
}

#[test]
fn test_strategy_kinds() {
    let registry = LanguageRegistry::builtin();
    let kind = |id: &str| registry.strategy_for(id).unwrap().kind();

    assert_eq!(kind("Python"), "direct");
    assert_eq!(kind("C"), "compile-then-run");
    assert_eq!(kind("TypeScript"), "compile-then-run");
    assert_eq!(kind("HTML"), "open-external");
    assert_eq!(kind("CSS"), "open-external");
    assert_eq!(kind("PTX"), "unsupported");
}

#[test]
fn test_typescript_probes_node() {
    let registry = LanguageRegistry::builtin();
    match registry.strategy_for("TypeScript").unwrap() {
        ExecutionStrategy::CompileThenRun(recipe) => {
            assert_eq!(recipe.compiler, "tsc");
            assert_eq!(recipe.runtime_probe, Some("node"));
        }
        other => panic!("Expected CompileThenRun, got {:?}", other),
    }
}

#[test]
fn test_comment_families() {
    let registry = LanguageRegistry::builtin();
    let comment = |id: &str| registry.resolve(id).unwrap().comment;

    assert_eq!(comment("Python"), CommentSyntax::Hash);
    assert_eq!(comment("Lua"), CommentSyntax::DoubleDash);
    assert_eq!(comment("Rust"), CommentSyntax::CFamily);
    assert_eq!(comment("HTML"), CommentSyntax::Markup);
    assert_eq!(comment("CSS"), CommentSyntax::Stylesheet);
}

#[test]
fn test_duplicate_extension_rejected() {
    let builtin = LanguageRegistry::builtin();
    let python = *builtin.resolve("Python").unwrap();
    let mut clash = *builtin.resolve("Ruby").unwrap();
    clash.extension = ".PY";

    let result = LanguageRegistry::new(vec![python, clash]);
    assert!(matches!(result, Err(Error::DuplicateExtension { .. })));
}

#[test]
fn test_samples_are_present() {
    for spec in LanguageRegistry::builtin().iter() {
        assert!(!spec.sample.trim().is_empty(), "{} has no sample", spec.id);
    }
}
