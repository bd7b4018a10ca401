//! End-to-end runs against shell scripts standing in for the three tools.
//!
//! Test "programs" are shell snippets: the reference interpreter runs them
//! with `REF=1`, the compiler copies stdin to stdout and exits with the code
//! named in a `# compile-exit: N` line, and the generated-code interpreter
//! runs the copied artifact.
#![cfg(unix)]

use conformance_runner::{Config, RunSummary, Tally, builder};
use std::path::Path;

const COMPILER: &str = r#"src=$(cat)
printf '%s\n' "$src"
code=$(printf '%s\n' "$src" | sed -n 's/^# compile-exit: //p' | head -n 1)
exit ${code:-0}
"#;

fn config(timeout: u64) -> Config {
    Config::from_toml_str(&format!(
        r#"
        timeout = {timeout}

        [tools]
        reference = "REF=1 sh {{{{SOURCE}}}}"
        compiler = "sh compile.sh"
        interpreter = "sh {{{{ARTIFACT}}}}"
        "#
    ))
    .unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "compile.sh", COMPILER);

    write(root, "example-code/basic/0_hello.tl", "printf 'Hi\\n'\n");
    write(
        root,
        "example-code/basic/0_div.tl",
        "read x\nif [ \"$x\" = 0 ]; then echo 'division by zero' >&2; exit 1; fi\necho $((10 / x))\n",
    );
    write(root, "example-code/basic/0_div.txt", "0\n");
    write(root, "example-code/basic/0_empty.tl", "");
    write(root, "example-code/basic/README.md", "not a test");

    write(
        root,
        "example-code/errors/1_syntax_err.tl",
        "# compile-exit: 1\nthis is never interpreted\n",
    );
    write(
        root,
        "example-code/errors/0_wrong_code.tl",
        "# compile-exit: 2\necho unreachable\n",
    );
    write(
        root,
        "example-code/errors/0_diff.tl",
        "if [ -n \"$REF\" ]; then echo expected; else echo actual; fi\n",
    );
    write(root, "example-code/errors/hello.tl", "echo no prefix\n");
    dir
}

fn run(dir: &Path, config: Config) -> (RunSummary, String) {
    let runner = builder()
        .with_config(config)
        .working_dir(dir)
        .build()
        .unwrap();
    let (summary, out) = runner.run_with_writer(Vec::new()).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_full_run_classifies_every_case() {
    let dir = workspace();
    let (summary, report) = run(dir.path(), config(3));

    assert_eq!(summary.suites.len(), 2);
    assert_eq!(summary.suites[0].name, "basic");
    assert_eq!(
        summary.suites[0].tally,
        Tally {
            passed: 1,
            failed: 1,
            skipped: 1
        }
    );
    assert_eq!(summary.suites[1].name, "errors");
    assert_eq!(
        summary.suites[1].tally,
        Tally {
            passed: 1,
            failed: 2,
            skipped: 1
        }
    );
    assert_eq!(summary.total.run(), 7);
    assert_eq!(summary.exit_code(), 1);

    assert!(report.contains("* Suite basic:\n"));
    assert!(report.contains("Fail - 0_div.tl: RUNTIME_ERROR\nInterpreter returned exit code 1\ndivision by zero\n"));
    assert!(report.contains("Fail - 0_wrong_code.tl: DIFF_EXIT_CODE\nExpected exit code 0, compiler returned 2\n"));
    assert!(report.contains("Fail - 0_diff.tl: DIFF_OUT\n"));
    assert!(report.contains("Expected output:\nexpected\n\n----------------------\n\nGot output:\nactual\n"));
    assert!(report.contains("Fail - hello.tl: INTERNAL\n"));
    assert!(report.ends_with("Total: 7 tests - 2 passed, 3 failed, 2 skipped\n"));
}

#[test]
fn test_artifacts_removed_on_success_and_kept_on_failure() {
    let dir = workspace();
    run(dir.path(), config(3));

    let root = dir.path();
    assert!(!root.join("out_0_hello.tl").exists());
    assert!(!root.join("out_1_syntax_err.tl").exists());
    assert!(root.join("out_0_div.tl").exists());
    assert!(root.join("out_0_wrong_code.tl").exists());
    assert!(root.join("out_0_diff.tl").exists());
    // never compiled
    assert!(!root.join("out_0_empty.tl").exists());
    assert!(!root.join("out_hello.tl").exists());
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = workspace();
    let (first, first_report) = run(dir.path(), config(3));
    let (second, second_report) = run(dir.path(), config(3));
    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}

#[test]
fn test_all_passing_corpus_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "compile.sh", COMPILER);
    write(dir.path(), "example-code/ok/0_hello.tl", "printf 'Hi\\n'\n");
    write(dir.path(), "example-code/ok/3_rejected.tl", "# compile-exit: 3\n");

    let (summary, report) = run(dir.path(), config(3));
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(report, "* Suite ok:\n..\n\n2 tests - 2 passed, 0 failed, 0 skipped\n\nTotal: 2 tests - 2 passed, 0 failed, 0 skipped\n");
}

#[test]
fn test_timeout_is_reported_and_later_steps_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "compile.sh", COMPILER);
    write(dir.path(), "example-code/slow/0_loop.tl", "sleep 30\n");

    let started = std::time::Instant::now();
    let (summary, report) = run(dir.path(), config(1));

    assert!(started.elapsed() < std::time::Duration::from_secs(15));
    assert_eq!(summary.total.failed, 1);
    assert!(report.contains("Fail - 0_loop.tl: TIMEOUT\n"));
    assert!(report.contains("timed out after 1 seconds"));
    // the reference run timed out, so the compiler never wrote an artifact
    assert!(!dir.path().join("out_0_loop.tl").exists());
}

#[test]
fn test_non_utf8_output_difference_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "compile.sh", COMPILER);
    write(
        dir.path(),
        "example-code/bytes/0_bytes.tl",
        "if [ -n \"$REF\" ]; then printf '\\377\\n'; else printf '\\376\\n'; fi\n",
    );

    let (summary, report) = run(dir.path(), config(3));
    assert_eq!(
        summary.total,
        Tally {
            passed: 0,
            failed: 1,
            skipped: 0
        }
    );
    assert_eq!(summary.exit_code(), 1);
    assert!(report.contains("Fail - 0_bytes.tl: DIFF_OUT\n"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_is_still_classified() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "compile.sh", COMPILER);
    let suite = dir.path().join("example-code/odd");
    std::fs::create_dir_all(&suite).unwrap();
    std::fs::write(
        suite.join(OsStr::from_bytes(b"0_\xffbad.tl")),
        "# compile-exit: 5\n",
    )
    .unwrap();

    let (summary, report) = run(dir.path(), config(3));
    assert_eq!(summary.total.run(), 1);
    assert_eq!(summary.total.failed, 1);
    assert_eq!(summary.exit_code(), 1);
    assert!(report.contains("Fail - 0_\u{FFFD}bad.tl: DIFF_EXIT_CODE\nExpected exit code 0, compiler returned 5\n"));
}

#[test]
fn test_artifact_write_failure_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "compile.sh", COMPILER);
    write(dir.path(), "example-code/ok/0_hello.tl", "printf 'Hi\\n'\n");
    std::fs::create_dir_all(dir.path().join("out_0_hello.tl")).unwrap();

    let (summary, report) = run(dir.path(), config(3));
    assert_eq!(summary.total.failed, 1);
    assert_eq!(summary.exit_code(), 1);
    assert!(report.contains("Fail - 0_hello.tl: INTERNAL\nfailed to write artifact "));
    assert!(!report.contains("/./"));
}
