//! Session tests: tabs, saving, background runs and output attribution

mod common;

use std::time::Duration;

use common::*;
use mocha::session::RunResult;
use mocha::{Error, Session};

const WAIT: Duration = Duration::from_secs(20);

#[test]
fn test_open_file_detects_language() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "main.GO", "package main\n");
    let mut session = headless_session();

    let id = session.open_file(&path).unwrap();
    let tab = session.tab(id).unwrap();

    assert_eq!(tab.language.id, "Go");
    assert_eq!(tab.title(), "main.GO");
}

#[test]
fn test_open_unknown_extension_defaults_to_first_language() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "notes.txt", "hello\n");
    let mut session = headless_session();

    let id = session.open_file(&path).unwrap();
    assert_eq!(session.tab(id).unwrap().language.id, "Python");
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = headless_session();
    let result = session.open_file(dir.path().join("absent.py"));
    assert!(matches!(result, Err(Error::Io { action: "read", .. })));
}

#[test]
fn test_save_untitled_forces_extension_and_logs() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = headless_session();
    let id = session.new_tab(Some("Rust")).unwrap();

    let written = session.save(id, Some(&dir.path().join("demo.txt"))).unwrap();

    assert_eq!(written, dir.path().join("demo.rs"));
    let tab = session.tab(id).unwrap();
    assert_eq!(std::fs::read_to_string(&written).unwrap(), tab.language.sample);
    assert_eq!(
        tab.console.text(),
        format!("Saved as: {}\n", written.display())
    );
    assert!(!tab.is_untitled());
}

#[test]
fn test_set_language_keeps_text_of_saved_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "script.py", "print(1)\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();

    session.set_language(id, "Ruby").unwrap();

    let tab = session.tab(id).unwrap();
    assert_eq!(tab.document.text(), "print(1)\n");
    assert_eq!(tab.highlighter.language(), "Ruby");
}

#[test]
fn test_run_markup_opens_viewer_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "index.html", "<p>hi</p>\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();

    session.run(id).unwrap();
    assert!(session.status().starts_with("Running index.html (HTML)"));
    assert!(session.wait_for_run(id, WAIT).unwrap());

    let tab = session.tab(id).unwrap();
    assert_eq!(
        tab.console.text(),
        "Running index.html (HTML)...\nOpened index.html in browser\n"
    );
    assert_eq!(tab.last_result(), Some(&RunResult::OpenedExternally));
    assert_eq!(session.status(), "Ready");
}

#[test]
fn test_run_unsupported_language_reports_without_process() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "kernel.ptx", ".version 7.0\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();

    session.run(id).unwrap();
    assert!(session.wait_for_run(id, WAIT).unwrap());

    let tab = session.tab(id).unwrap();
    assert!(tab
        .console
        .text()
        .ends_with("Cannot run PTX files (compiler/interpreter not found)\n"));
    assert_eq!(tab.last_result(), Some(&RunResult::NotRun));
}

#[test]
fn test_rerun_drops_output_of_previous_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "index.html", "<p>hi</p>\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();

    let first = session.run(id).unwrap();
    let second = session.run(id).unwrap();
    assert!(second > first);
    assert!(session.wait_for_run(id, WAIT).unwrap());
    // Let the superseded run deliver anything it still had
    std::thread::sleep(Duration::from_millis(200));
    session.process_messages();

    let console = session.tab(id).unwrap().console.text().to_string();
    assert_eq!(console.matches("Running index.html").count(), 2);
    assert_eq!(console.matches("Opened index.html in browser").count(), 1);
}

#[test]
fn test_closed_tab_output_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "index.html", "<p>hi</p>\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();

    session.run(id).unwrap();
    session.close_tab(id).unwrap();
    std::thread::sleep(Duration::from_millis(200));

    assert!(!session.process_messages());
    assert_eq!(session.status(), "Ready");
    assert!(matches!(session.wait_for_run(id, WAIT), Err(Error::UnknownTab(_))));
}

#[test]
fn test_run_unmodified_file_leaves_it_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "notes.txt", "print('notes')\n");
    let before = std::fs::metadata(&path).unwrap().modified().unwrap();
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();
    session.set_language(id, "PTX").unwrap();

    session.run(id).unwrap();
    assert!(session.wait_for_run(id, WAIT).unwrap());

    assert!(!dir.path().join("notes.ptx").exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('notes')\n");
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), before);
    assert_eq!(session.tab(id).unwrap().document.file_path, Some(path));
}

#[test]
fn test_run_saves_edited_buffer_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "page.html", "<p>hi</p>\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();
    session.insert(id, 0, "<h1>Title</h1>\n").unwrap();

    session.run(id).unwrap();
    assert!(session.wait_for_run(id, WAIT).unwrap());

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "<h1>Title</h1>\n<p>hi</p>\n"
    );
    assert!(!session.tab(id).unwrap().document.is_modified);
}

#[test]
fn test_python_run_streams_to_console() {
    if !has_tool("python3") {
        eprintln!("python3 not installed, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "hello.py", "print('Hello')\n");
    let mut session = headless_session();
    let id = session.open_file(&path).unwrap();

    session.run(id).unwrap();
    assert!(session.wait_for_run(id, WAIT).unwrap());

    let tab = session.tab(id).unwrap();
    assert_eq!(tab.console.text(), "Running hello.py (Python)...\nHello\n");
    assert!(tab.last_result().unwrap().is_success());
}

#[test]
fn test_from_config_honours_default_language() {
    let config = mocha::MochaConfig {
        default_language: "lua".to_string(),
        open_external: false,
        ..Default::default()
    };
    let mut session = Session::from_config(&config);
    let id = session.new_tab(None).unwrap();
    assert_eq!(session.tab(id).unwrap().language.id, "Lua");
}

#[test]
fn test_from_config_ignores_unknown_default_language() {
    let config = mocha::MochaConfig {
        default_language: "Klingon".to_string(),
        open_external: false,
        ..Default::default()
    };
    let session = Session::from_config(&config);
    assert_eq!(session.default_language().id, "Python");
}
