//! 命令类别库加载测试

use planner_lib::config::{CommandLibrary, ConfigError, WorkspacePaths};
use tempfile::TempDir;

fn workspace() -> (TempDir, WorkspacePaths) {
    let temp_dir = TempDir::new().unwrap();
    let paths = WorkspacePaths::with_root(temp_dir.path());
    paths.ensure_directories_exist().unwrap();
    (temp_dir, paths)
}

fn write_category(paths: &WorkspacePaths, name: &str, content: &str) {
    std::fs::write(paths.category_file(name), content).unwrap();
}

const INTAKE_JSON: &str = r##"{
    "category": "Intake",
    "description": "Intake roller control",
    "commands": [
        { "id": "intake_in", "name": "Intake In", "code_template": "mech.intakeIn();", "color": "#00FF00", "description": "Run rollers inward" },
        { "id": "intake_out", "name": "Intake Out", "code_template": "mech.intakeOut();", "color": "#FF6600", "description": "" },
        { "id": "intake_stop", "name": "Intake Stop", "code_template": "mech.intakeStop();", "color": "#006600", "description": "" }
    ]
}"##;

#[tokio::test]
async fn test_load_category_yields_all_commands() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);

    let library = CommandLibrary::new(&paths);
    let file = library.load_category("intake").await.unwrap();

    assert_eq!(file.category, "Intake");
    assert_eq!(file.commands.len(), 3);
    let ids: Vec<&str> = file.commands.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["intake_in", "intake_out", "intake_stop"]);
}

#[tokio::test]
async fn test_loaded_commands_get_category_stamped() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);

    let library = CommandLibrary::new(&paths);
    let file = library.load_category("intake").await.unwrap();

    // 命令的 category 字段以文件声明的类别名为准
    for command in &file.commands {
        assert_eq!(command.category, "Intake");
    }
}

#[tokio::test]
async fn test_missing_category_fails() {
    let (_guard, paths) = workspace();
    let library = CommandLibrary::new(&paths);

    let result = library.load_category("ghost").await;
    match result {
        Err(ConfigError::CategoryNotFound { name, .. }) => assert_eq!(name, "ghost"),
        other => panic!("expected CategoryNotFound, got {:?}", other.map(|f| f.category)),
    }
}

#[tokio::test]
async fn test_malformed_json_fails_with_path() {
    let (_guard, paths) = workspace();
    write_category(&paths, "broken", "{ \"category\": ");

    let library = CommandLibrary::new(&paths);
    let result = library.load_category("broken").await;

    match result {
        Err(ConfigError::Parse { path, .. }) => {
            assert!(path.to_string_lossy().ends_with("broken.json"));
        }
        other => panic!("expected Parse error, got {:?}", other.map(|f| f.category)),
    }
}

#[tokio::test]
async fn test_duplicate_id_within_category_fails() {
    let (_guard, paths) = workspace();
    write_category(
        &paths,
        "intake",
        r#"{
            "category": "Intake",
            "commands": [
                { "id": "intake_in", "name": "Intake In", "code_template": "mech.intakeIn();" },
                { "id": "intake_in", "name": "Intake In Again", "code_template": "mech.intakeIn();" }
            ]
        }"#,
    );

    let library = CommandLibrary::new(&paths);
    let result = library.load_category("intake").await;

    match result {
        Err(ConfigError::DuplicateCommandId { id, category }) => {
            assert_eq!(id, "intake_in");
            assert_eq!(category, "Intake");
        }
        other => panic!("expected DuplicateCommandId, got {:?}", other.map(|f| f.category)),
    }
}

#[tokio::test]
async fn test_invalid_color_fails_validation() {
    let (_guard, paths) = workspace();
    write_category(
        &paths,
        "intake",
        r#"{
            "category": "Intake",
            "commands": [
                { "id": "intake_in", "name": "Intake In", "code_template": "mech.intakeIn();", "color": "green" }
            ]
        }"#,
    );

    let library = CommandLibrary::new(&paths);
    let result = library.load_category("intake").await;

    assert!(matches!(result, Err(ConfigError::InvalidCategory { .. })));
}

#[tokio::test]
async fn test_empty_category_is_valid() {
    let (_guard, paths) = workspace();
    write_category(&paths, "empty", r#"{ "category": "Empty", "commands": [] }"#);

    let library = CommandLibrary::new(&paths);
    let file = library.load_category("empty").await.unwrap();
    assert!(file.commands.is_empty());
}

#[tokio::test]
async fn test_available_categories_sorted() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_category(&paths, "conveyor", r#"{ "category": "Conveyor", "commands": [] }"#);
    std::fs::write(paths.command_library_dir().join("readme.txt"), "notes").unwrap();

    let library = CommandLibrary::new(&paths);
    let names = library.available_categories().await.unwrap();
    // 只统计 JSON 文件，按名称排序
    assert_eq!(names, vec!["conveyor".to_string(), "intake".to_string()]);
}
