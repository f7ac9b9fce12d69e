use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tsz_pick_project::{find_tsconfig, resolve_project, resolve_tsconfig_path};

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn test_discovers_nearest_tsconfig_above_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.json", r#"{"compilerOptions": {"strict": true}}"#);
    write(root, "src/deep/file.ts", "export const x = 1;");

    let file = root.join("src/deep/file.ts");
    let project = resolve_project(&file, None).unwrap().expect("project");
    assert_eq!(
        project.config_path,
        fs::canonicalize(root.join("tsconfig.json")).unwrap()
    );
    assert_eq!(project.root_dir, fs::canonicalize(root).unwrap());
    assert_eq!(project.compiler_options().strict, Some(true));
}

#[test]
fn test_nested_tsconfig_wins() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.json", "{}");
    write(root, "packages/app/tsconfig.json", r#"{"compilerOptions": {"target": "es2022"}}"#);
    write(root, "packages/app/src/main.ts", "");

    let found = find_tsconfig(&root.join("packages/app/src")).unwrap();
    assert_eq!(
        found,
        fs::canonicalize(root.join("packages/app/tsconfig.json")).unwrap()
    );
}

#[test]
fn test_explicit_directory_resolves_to_tsconfig() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "config/tsconfig.json", "{}");

    let resolved = resolve_tsconfig_path(root, Path::new("config")).unwrap();
    assert_eq!(
        resolved,
        fs::canonicalize(root.join("config/tsconfig.json")).unwrap()
    );
}

#[test]
fn test_explicit_missing_project_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope/tsconfig.json");
    let file = temp.path().join("a.ts");
    fs::write(&file, "").unwrap();

    let err = resolve_project(&file, Some(&missing)).unwrap_err();
    assert!(format!("{err:#}").contains("tsconfig not found"));
}

#[test]
fn test_explicit_invalid_project_fails() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.json", "{ this is not json");
    write(root, "a.ts", "");

    let err = resolve_project(&root.join("a.ts"), Some(&root.join("tsconfig.json"))).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse tsconfig"));
}

#[test]
fn test_extends_chain_is_merged() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "base.json",
        r#"{"compilerOptions": {"strict": true, "target": "es2017"}}"#,
    );
    write(
        root,
        "tsconfig.json",
        r#"{"extends": "./base", "compilerOptions": {"target": "es2022"}}"#,
    );
    write(root, "a.ts", "");

    let project = resolve_project(&root.join("a.ts"), None).unwrap().unwrap();
    let opts = project.compiler_options();
    assert_eq!(opts.strict, Some(true));
    assert_eq!(opts.target.as_deref(), Some("es2022"));
}

#[test]
fn test_extends_cycle_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "a.json", r#"{"extends": "./b.json"}"#);
    write(root, "b.json", r#"{"extends": "./a.json"}"#);
    write(root, "main.ts", "");

    let err = resolve_project(&root.join("main.ts"), Some(&root.join("a.json"))).unwrap_err();
    assert!(format!("{err:#}").contains("cycle"));
}
