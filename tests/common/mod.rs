//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mocha::exec::strategy::{Arg, ArtifactPath, CompileRecipe};
use mocha::exec::{Dispatcher, ExternalViewer, NoopViewer};
use mocha::Session;

/// Write `content` to `dir/name`, returning the path
pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Dispatcher over the builtin registry that never opens a real viewer
pub fn headless_dispatcher(timeout: Duration) -> Dispatcher {
    Dispatcher::with_timeout(timeout, Arc::new(NoopViewer))
}

pub fn headless_session() -> Session {
    Session::new(headless_dispatcher(Duration::from_secs(20)))
}

/// Whether `tool --version` works on this machine
pub fn has_tool(tool: &str) -> bool {
    std::process::Command::new(tool)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Viewer that records every URI it is asked to open
#[derive(Debug, Default)]
pub struct RecordingViewer {
    pub opened: Mutex<Vec<String>>,
}

impl ExternalViewer for RecordingViewer {
    fn open(&self, uri: &str) -> Result<(), String> {
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}

fn leak_str(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

/// A shell script standing in for a native compiler.
///
/// Called as `sh fakecc SOURCE -o ARTIFACT`:
/// - source containing `SYNTAX_ERROR` → diagnostics on stderr, exit 1
/// - source containing `WARN` → a warning on stderr, exit 0
/// - otherwise writes ARTIFACT, a shell script printing `Hello from <stem>`
pub fn write_fake_compiler(dir: &Path) -> PathBuf {
    write_source(
        dir,
        "fakecc",
        r#"src="$1"
out="$3"
if grep -q SYNTAX_ERROR "$src"; then
  echo "$src:1:1: error: expected ';' before '}' token" >&2
  exit 1
fi
if grep -q WARN "$src"; then
  echo "$src:2:5: warning: unused variable 'x'" >&2
fi
stem=$(basename "$src" .fake)
printf 'echo "Hello from %s"\n' "$stem" > "$out"
"#,
    )
}

/// Compile recipe driving `write_fake_compiler` through `sh`. The artifact is
/// also run through `sh`, so nothing needs the executable bit.
pub fn fake_recipe(compiler_script: &Path, runtime_probe: Option<&'static str>) -> CompileRecipe {
    let script = leak_str(compiler_script.to_string_lossy().into_owned());
    let args: &'static [Arg] = Box::leak(
        vec![Arg::Lit(script), Arg::Source, Arg::Lit("-o"), Arg::Artifact].into_boxed_slice(),
    );
    CompileRecipe {
        compiler: "sh",
        args,
        artifact: ArtifactPath::SiblingWithExtension("out"),
        run: &[Arg::Lit("sh"), Arg::Artifact],
        runtime_probe,
    }
}
