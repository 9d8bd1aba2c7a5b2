//! 赛季配置解析测试
//!
//! 覆盖类别拼接、覆盖合并、自定义命令优先与各类失败场景。

use planner_lib::config::{ConfigError, SeasonResolver, WorkspacePaths};
use planner_lib::model::CommandDefinition;
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

fn write_season(paths: &WorkspacePaths, season: &str, content: &str) {
    std::fs::create_dir_all(paths.season_dir(season)).unwrap();
    std::fs::write(paths.season_config_file(season), content).unwrap();
}

const INTAKE_JSON: &str = r##"{
    "category": "Intake",
    "commands": [
        { "id": "intake_in", "name": "Intake In", "code_template": "mech.intakeIn();", "color": "#00FF00", "description": "Run rollers inward" },
        { "id": "intake_stop", "name": "Intake Stop", "code_template": "mech.intakeStop();", "color": "#006600" }
    ]
}"##;

const CONVEYOR_JSON: &str = r##"{
    "category": "Conveyor",
    "commands": [
        { "id": "conveyor_up", "name": "Conveyor Up", "code_template": "mech.conveyorUp();", "color": "#0088FF" }
    ]
}"##;

#[tokio::test]
async fn test_zero_overrides_keeps_commands_unchanged() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{ "include_commands_from": ["intake"] }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    assert_eq!(resolved.commands.len(), 2);
    let intake_in = resolved.command("intake_in").unwrap();
    assert_eq!(intake_in.name, "Intake In");
    assert_eq!(intake_in.code_template, "mech.intakeIn();");
    assert_eq!(intake_in.color, "#00FF00");
    assert_eq!(intake_in.description, "Run rollers inward");
}

#[tokio::test]
async fn test_override_changes_only_specified_fields() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{
            "include_commands_from": ["intake"],
            "command_overrides": {
                "intake_in": { "code_template": "mech.intakeIn(90);" }
            }
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    let intake_in = resolved.command("intake_in").unwrap();
    assert_eq!(intake_in.code_template, "mech.intakeIn(90);");
    // 未覆盖的字段保持不变
    assert_eq!(intake_in.name, "Intake In");
    assert_eq!(intake_in.color, "#00FF00");
    assert_eq!(intake_in.description, "Run rollers inward");

    // 同类别其他命令不受影响
    let intake_stop = resolved.command("intake_stop").unwrap();
    assert_eq!(intake_stop.code_template, "mech.intakeStop();");
}

#[tokio::test]
async fn test_categories_concatenated_in_include_order() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_category(&paths, "conveyor", CONVEYOR_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{ "include_commands_from": ["conveyor", "intake"] }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    let ids: Vec<&str> = resolved.commands.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["conveyor_up", "intake_in", "intake_stop"]);

    let groups = resolved.commands_by_category();
    assert_eq!(groups[0].0, "Conveyor");
    assert_eq!(groups[1].0, "Intake");
}

#[tokio::test]
async fn test_missing_category_fails_resolution() {
    let (_guard, paths) = workspace();
    write_season(
        &paths,
        "test_season",
        r#"{ "include_commands_from": ["ghost"] }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let result = resolver.resolve("test_season").await;

    assert!(matches!(
        result,
        Err(ConfigError::CategoryNotFound { name, .. }) if name == "ghost"
    ));
}

#[tokio::test]
async fn test_unknown_season_fails() {
    let (_guard, paths) = workspace();
    let resolver = SeasonResolver::new(&paths);

    let result = resolver.resolve("never_created").await;
    assert!(matches!(
        result,
        Err(ConfigError::SeasonNotFound { name, .. }) if name == "never_created"
    ));
}

#[tokio::test]
async fn test_cross_category_duplicate_without_resolution_fails() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_category(
        &paths,
        "intake2",
        r#"{
            "category": "Backup Intake",
            "commands": [
                { "id": "intake_in", "name": "Other Intake In", "code_template": "mech2.intakeIn();" }
            ]
        }"#,
    );
    write_season(
        &paths,
        "test_season",
        r#"{ "include_commands_from": ["intake", "intake2"] }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let result = resolver.resolve("test_season").await;

    match result {
        Err(ConfigError::ConflictingCommandId { id, first, second }) => {
            assert_eq!(id, "intake_in");
            assert_eq!(first, "Intake");
            assert_eq!(second, "Backup Intake");
        }
        other => panic!("expected ConflictingCommandId, got {:?}", other.map(|r| r.name)),
    }
}

#[tokio::test]
async fn test_cross_category_duplicate_resolved_by_override() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_category(
        &paths,
        "intake2",
        r#"{
            "category": "Backup Intake",
            "commands": [
                { "id": "intake_in", "name": "Other Intake In", "code_template": "mech2.intakeIn();" }
            ]
        }"#,
    );
    write_season(
        &paths,
        "test_season",
        r#"{
            "include_commands_from": ["intake", "intake2"],
            "command_overrides": {
                "intake_in": { "code_template": "mech.intakeIn(127);" }
            }
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    // 覆盖项接管冲突 ID：保留首个类别的定义并应用补丁
    let winners: Vec<&CommandDefinition> = resolved
        .commands
        .iter()
        .filter(|c| c.id == "intake_in")
        .collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].category, "Intake");
    assert_eq!(winners[0].name, "Intake In");
    assert_eq!(winners[0].code_template, "mech.intakeIn(127);");
}

#[tokio::test]
async fn test_cross_category_duplicate_resolved_by_custom_command() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_category(
        &paths,
        "intake2",
        r#"{
            "category": "Backup Intake",
            "commands": [
                { "id": "intake_in", "name": "Other Intake In", "code_template": "mech2.intakeIn();" }
            ]
        }"#,
    );
    write_season(
        &paths,
        "test_season",
        r##"{
            "include_commands_from": ["intake", "intake2"],
            "custom_commands": [
                { "id": "intake_in", "name": "Season Intake", "code_template": "mech.seasonIntake();", "color": "#112233" }
            ]
        }"##,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    // 赛季自定义命令接管冲突 ID，且每个 ID 只保留一份定义
    let winners: Vec<&str> = resolved
        .commands
        .iter()
        .filter(|c| c.id == "intake_in")
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(winners, vec!["Season Intake"]);
}

#[tokio::test]
async fn test_custom_command_replaces_base_in_place() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{
            "include_commands_from": ["intake"],
            "custom_commands": [
                { "id": "intake_in", "name": "Tuned Intake", "code_template": "mech.intakeIn(127);" },
                { "id": "season_special", "name": "Season Special", "code_template": "mech.special();" }
            ]
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    let ids: Vec<&str> = resolved.commands.iter().map(|c| c.id.as_str()).collect();
    // 同 ID 原位替换保持顺序，新 ID 附加到末尾
    assert_eq!(ids, vec!["intake_in", "intake_stop", "season_special"]);
    assert_eq!(resolved.command("intake_in").unwrap().name, "Tuned Intake");
}

#[tokio::test]
async fn test_unmatched_override_is_ignored() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{
            "include_commands_from": ["intake"],
            "command_overrides": {
                "typo_id": { "name": "Never Applied" }
            }
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    // 未匹配的覆盖项只产生警告
    assert_eq!(resolved.commands.len(), 2);
    assert!(resolved.command("typo_id").is_none());
}

#[tokio::test]
async fn test_customs_only_season_is_valid() {
    let (_guard, paths) = workspace();
    write_season(
        &paths,
        "minimal",
        r#"{
            "season": "Minimal Season",
            "custom_commands": [
                { "id": "only_one", "name": "Only One", "code_template": "mech.go();" }
            ]
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("minimal").await.unwrap();

    assert_eq!(resolved.display_name, "Minimal Season");
    assert_eq!(resolved.commands.len(), 1);
}

#[tokio::test]
async fn test_sequence_with_unknown_command_fails() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{
            "include_commands_from": ["intake"],
            "command_sequences": [
                { "id": "cycle", "name": "Cycle", "commands": ["intake_in", "missing_cmd"] }
            ]
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let result = resolver.resolve("test_season").await;

    assert!(matches!(
        result,
        Err(ConfigError::UnknownSequenceCommand { sequence, command })
            if sequence == "cycle" && command == "missing_cmd"
    ));
}

#[tokio::test]
async fn test_sequences_attached_to_resolution() {
    let (_guard, paths) = workspace();
    write_category(&paths, "intake", INTAKE_JSON);
    write_season(
        &paths,
        "test_season",
        r#"{
            "include_commands_from": ["intake"],
            "command_sequences": [
                { "id": "cycle", "name": "Cycle", "commands": ["intake_in", "intake_stop"] }
            ],
            "starting_positions": [
                { "label": "Left Start", "x": -48.0, "y": -60.0, "heading": 0.0, "side": "left" }
            ]
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();

    assert_eq!(resolved.sequences.len(), 1);
    assert_eq!(resolved.sequence("cycle").unwrap().command_ids.len(), 2);
    assert_eq!(resolved.starting_positions.len(), 1);
    assert_eq!(resolved.starting_positions[0].label, "Left Start");
}

#[tokio::test]
async fn test_malformed_season_config_fails() {
    let (_guard, paths) = workspace();
    write_season(&paths, "broken", "{ not json");

    let resolver = SeasonResolver::new(&paths);
    let result = resolver.resolve("broken").await;
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[tokio::test]
async fn test_duplicate_custom_command_ids_fail() {
    let (_guard, paths) = workspace();
    write_season(
        &paths,
        "test_season",
        r#"{
            "custom_commands": [
                { "id": "dup", "name": "First", "code_template": "a();" },
                { "id": "dup", "name": "Second", "code_template": "b();" }
            ]
        }"#,
    );

    let resolver = SeasonResolver::new(&paths);
    let result = resolver.resolve("test_season").await;
    assert!(matches!(result, Err(ConfigError::InvalidSeason { .. })));
}
