//! C++ 代码导出测试

use planner_lib::config::{SeasonResolver, WorkspacePaths};
use planner_lib::export::{export_function, export_path};
use planner_lib::model::{HeadingMode, MotionType, RoutePath};
use tempfile::TempDir;

/// 构造一个带内置风格命令库的临时工作区并解析赛季
async fn resolved_season() -> (TempDir, planner_lib::config::ResolvedSeason) {
    let temp_dir = TempDir::new().unwrap();
    let paths = WorkspacePaths::with_root(temp_dir.path());
    paths.ensure_directories_exist().unwrap();

    std::fs::write(
        paths.category_file("intake"),
        r##"{
            "category": "Intake",
            "commands": [
                { "id": "intake_in", "name": "Intake In", "code_template": "mech.intakeIn();", "color": "#00FF00" }
            ]
        }"##,
    )
    .unwrap();
    std::fs::write(
        paths.category_file("timing"),
        r##"{
            "category": "Timing",
            "commands": [
                { "id": "wait_500", "name": "Wait 500ms", "code_template": "pros::delay(500);", "color": "#888888" }
            ]
        }"##,
    )
    .unwrap();

    std::fs::create_dir_all(paths.season_dir("test_season")).unwrap();
    std::fs::write(
        paths.season_config_file("test_season"),
        r#"{ "include_commands_from": ["intake", "timing"] }"#,
    )
    .unwrap();

    let resolver = SeasonResolver::new(&paths);
    let resolved = resolver.resolve("test_season").await.unwrap();
    (temp_dir, resolved)
}

#[tokio::test]
async fn test_full_export_has_header_and_include() {
    let (_guard, resolved) = resolved_season().await;

    let mut path = RoutePath::new("Left AWP");
    path.add_waypoint(-48.0, -60.0);
    path.add_waypoint(-24.0, -24.0);

    let code = export_path(&path, &resolved).unwrap();

    assert!(code.starts_with("// Autonomous routine: Left AWP\n"));
    assert!(code.contains("// Alliance: red | Side: left"));
    assert!(code.contains("// Waypoints: 2"));
    assert!(code.contains("#include \"shulib/api.h\""));
    assert!(code.contains("void left_awp() {"));
}

#[tokio::test]
async fn test_function_only_export_omits_header() {
    let (_guard, resolved) = resolved_season().await;

    let mut path = RoutePath::new("Left AWP");
    path.add_waypoint(-48.0, -60.0);

    let code = export_function(&path, &resolved).unwrap();
    assert!(code.starts_with("void left_awp() {"));
    assert!(!code.contains("#include"));
}

#[tokio::test]
async fn test_waypoint_commands_are_emitted_after_motion() {
    let (_guard, resolved) = resolved_season().await;

    let mut path = RoutePath::new("Test");
    path.add_waypoint(0.0, 0.0);
    let i = path.add_waypoint(0.0, 24.0);
    path.waypoints[i].commands_after = vec!["intake_in".to_string(), "wait_500".to_string()];

    let code = export_function(&path, &resolved).unwrap();
    let move_pos = code.find("chassis.moveToPose(0.0, 24.0").unwrap();
    let intake_pos = code.find("mech.intakeIn();").unwrap();
    let wait_pos = code.find("pros::delay(500);").unwrap();

    // 命令在运动指令之后按声明顺序执行
    assert!(move_pos < intake_pos);
    assert!(intake_pos < wait_pos);
}

#[tokio::test]
async fn test_move_vertical_uses_signed_distance() {
    let (_guard, resolved) = resolved_season().await;

    let mut path = RoutePath::new("Test");
    path.add_waypoint(0.0, 0.0);
    let i = path.add_waypoint(0.0, 24.0);
    path.waypoints[i].motion_type = MotionType::MoveVertical;

    let code = export_function(&path, &resolved).unwrap();
    assert!(code.contains("chassis.moveVertical(24.0);"));

    // 倒车时距离取负
    path.waypoints[i].reverse = true;
    let code = export_function(&path, &resolved).unwrap();
    assert!(code.contains("chassis.moveVertical(-24.0);"));
}

#[tokio::test]
async fn test_rotate_to_uses_manual_heading() {
    let (_guard, resolved) = resolved_season().await;

    let mut path = RoutePath::new("Test");
    path.add_waypoint(0.0, 0.0);
    let i = path.add_waypoint(0.0, 0.0);
    path.waypoints[i].motion_type = MotionType::RotateTo;
    path.waypoints[i].heading_mode = HeadingMode::Manual;
    path.waypoints[i].heading = Some(135.0);

    let code = export_function(&path, &resolved).unwrap();
    assert!(code.contains("chassis.rotateTo(135.0);"));
}

#[tokio::test]
async fn test_mechanism_flags_wrap_motion() {
    let (_guard, resolved) = resolved_season().await;

    let mut path = RoutePath::new("Test");
    path.add_waypoint(0.0, 0.0);
    let i = path.add_waypoint(0.0, 24.0);
    path.waypoints[i].intaking = true;
    path.add_waypoint(24.0, 24.0);

    let code = export_function(&path, &resolved).unwrap();
    let lines: Vec<&str> = code.lines().map(str::trim).collect();

    let start_pos = lines.iter().position(|l| l.starts_with("mech.intakeIn();")).unwrap();
    let move_pos = lines
        .iter()
        .position(|l| l.starts_with("chassis.moveToPose(0.0, 24.0"))
        .unwrap();
    // 吸入在运动前开启；路线结束时自动停止
    assert!(start_pos < move_pos);
    assert!(lines.contains(&"mech.intakeStop();"));
}

#[tokio::test]
async fn test_empty_path_exports_empty_function() {
    let (_guard, resolved) = resolved_season().await;

    let path = RoutePath::new("Empty");
    let code = export_function(&path, &resolved).unwrap();
    assert_eq!(code, "void empty() {\n}");
}
