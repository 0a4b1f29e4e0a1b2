use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_resolve_missing_migrations_dir() {
    let dir = tempdir().unwrap();
    let result = MigrationLayout::resolve(dir.path(), &Config::default());
    assert!(matches!(
        result,
        Err(CoreError::MigrationsDirNotFound { .. })
    ));
}

#[test]
fn test_resolve_without_schema_file() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("supabase/migrations")).unwrap();

    let layout = MigrationLayout::resolve(dir.path(), &Config::default()).unwrap();
    assert_eq!(layout.migrations_dir, dir.path().join("supabase/migrations"));
    assert!(layout.schema().is_none());
}

#[test]
fn test_resolve_with_schema_file() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("supabase/migrations")).unwrap();
    fs::write(dir.path().join("supabase/schema.sql"), "CREATE TABLE t (id INT);").unwrap();

    let layout = MigrationLayout::resolve(dir.path(), &Config::default()).unwrap();
    let schema = layout.schema().unwrap();
    assert_eq!(schema.name, "schema.sql");
}

#[test]
fn test_resolve_custom_paths() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("db/changes")).unwrap();
    fs::write(dir.path().join("db/changes/001_init.sql"), "SELECT 1;").unwrap();

    let config = Config {
        schema_file: "db/base.sql".to_string(),
        migrations_dir: "db/changes".to_string(),
        ..Config::default()
    };
    let layout = MigrationLayout::resolve(dir.path(), &config).unwrap();
    assert_eq!(layout.schema_file, dir.path().join("db/base.sql"));
    assert_eq!(layout.migrations().unwrap().len(), 1);
}

#[test]
fn test_migrations_dir_must_be_directory() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("supabase")).unwrap();
    fs::write(dir.path().join("supabase/migrations"), "not a dir").unwrap();

    let result = MigrationLayout::resolve(dir.path(), &Config::default());
    assert!(result.is_err());
}
