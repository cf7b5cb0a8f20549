//! Disk-backed projects: glob discovery and write-back of changed files.

use micrograft::rewrite::Project;
use micrograft::transforms::{wrap_in_try, WrapInTryOptions};
use std::fs;

const UNGUARDED_JAVA: &str = "class T {\n    void m() {\n        client.get(\"https://x\")\n            .execute();\n    }\n}\n";
const BORING_JAVA: &str = "class U {\n    void n() {\n        log.info(\"hello\");\n    }\n}\n";
const NOTES_TXT: &str = "client.get(\"https://x\").execute(); (prose, not code)\n";

fn options() -> WrapInTryOptions {
    WrapInTryOptions {
        beginning_of_call: "client.get(".to_string(),
        end_of_call: "execute()".to_string(),
        return_type: "Response".to_string(),
        return_variable_name: "response".to_string(),
    }
}

#[test]
fn test_discover_honors_glob_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/main")).unwrap();
    fs::write(root.join("src/main/T.java"), UNGUARDED_JAVA).unwrap();
    fs::write(root.join("src/main/U.java"), BORING_JAVA).unwrap();
    fs::write(root.join("notes.txt"), NOTES_TXT).unwrap();

    let project = Project::discover(root, &["**/*.java".to_string()]).unwrap();
    let paths: Vec<&str> = project.paths().collect();
    assert_eq!(paths, vec!["src/main/T.java", "src/main/U.java"]);
}

#[test]
fn test_discover_without_globs_takes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.java"), BORING_JAVA).unwrap();
    fs::write(root.join("b.txt"), NOTES_TXT).unwrap();

    let project = Project::discover(root, &[]).unwrap();
    assert_eq!(project.len(), 2);
}

#[test]
fn test_invalid_glob_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = Project::discover(dir.path(), &["{broken".to_string()]);
    assert!(result.is_err());
}

#[test]
fn test_flush_writes_only_changed_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/T.java"), UNGUARDED_JAVA).unwrap();
    fs::write(root.join("src/U.java"), BORING_JAVA).unwrap();
    fs::write(root.join("notes.txt"), NOTES_TXT).unwrap();

    let mut project = Project::discover(root, &["**/*.java".to_string()]).unwrap();
    let report = wrap_in_try(&mut project, &options(), |v| format!("{v}.close();")).unwrap();
    assert!(report.edited);
    assert_eq!(report.edited_paths().collect::<Vec<_>>(), vec!["src/T.java"]);

    let written = project.flush(root).unwrap();
    assert_eq!(written, 1);

    let rewritten = fs::read_to_string(root.join("src/T.java")).unwrap();
    assert!(rewritten.contains("try {"));
    assert!(rewritten.contains("response.close();"));

    // Unmatched and unselected files are byte-identical on disk.
    assert_eq!(fs::read_to_string(root.join("src/U.java")).unwrap(), BORING_JAVA);
    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), NOTES_TXT);
}
