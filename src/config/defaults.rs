/*!
 * 内置命令库与工作区初始化
 *
 * 提供出厂命令库、起步赛季配置，以及工作区目录脚手架。
 * 初始化是幂等的：已存在的文件一律保留，不会被覆盖。
 */

use crate::config::paths::WorkspacePaths;
use crate::config::types::{CategoryFile, SeasonConfig, StartingPosition};
use crate::model::{Alliance, CommandDefinition, Side};
use crate::utils::error::AppResult;
use anyhow::Context;
use std::collections::HashMap;
use tracing::{debug, info};

/// 默认赛季标识
pub const DEFAULT_SEASON: &str = "pushback_2026";

fn command(
    id: &str,
    name: &str,
    code_template: &str,
    color: &str,
    category: &str,
) -> CommandDefinition {
    CommandDefinition {
        id: id.to_string(),
        name: name.to_string(),
        code_template: code_template.to_string(),
        color: color.to_string(),
        category: category.to_string(),
        description: String::new(),
        parameters: Vec::new(),
    }
}

/// 出厂命令库
///
/// 返回 (文件名, 类别内容) 列表，文件名即类别标识。
pub fn builtin_categories() -> Vec<(&'static str, CategoryFile)> {
    vec![
        ("intake", create_intake_category()),
        ("conveyor", create_conveyor_category()),
        ("scorer", create_scorer_category()),
        ("pneumatics", create_pneumatics_category()),
        ("timing", create_timing_category()),
    ]
}

fn create_intake_category() -> CategoryFile {
    CategoryFile {
        category: "Intake".to_string(),
        description: "Intake roller control".to_string(),
        commands: vec![
            command("intake_in", "Intake In", "mech.intakeIn();", "#00FF00", "Intake"),
            command("intake_out", "Intake Out", "mech.intakeOut();", "#FF6600", "Intake"),
            command("intake_stop", "Intake Stop", "mech.intakeStop();", "#006600", "Intake"),
        ],
    }
}

fn create_conveyor_category() -> CategoryFile {
    CategoryFile {
        category: "Conveyor".to_string(),
        description: "Conveyor belt control".to_string(),
        commands: vec![
            command("conveyor_up", "Conveyor Up", "mech.conveyorUp();", "#0088FF", "Conveyor"),
            command("conveyor_down", "Conveyor Down", "mech.conveyorDown();", "#0044AA", "Conveyor"),
            command("conveyor_stop", "Conveyor Stop", "mech.conveyorStop();", "#002266", "Conveyor"),
        ],
    }
}

fn create_scorer_category() -> CategoryFile {
    CategoryFile {
        category: "Scorer".to_string(),
        description: "Scoring releaser control".to_string(),
        commands: vec![
            command("scorer_forward", "Releaser →", "mech.releaserForward();", "#FF0000", "Scorer"),
            command("scorer_backward", "Releaser ←", "mech.releaserBackward();", "#AA0000", "Scorer"),
            command("scorer_stop", "Releaser Stop", "mech.releaserStop();", "#660000", "Scorer"),
        ],
    }
}

fn create_pneumatics_category() -> CategoryFile {
    CategoryFile {
        category: "Pneumatics".to_string(),
        description: "Pneumatic actuators".to_string(),
        commands: vec![
            command("arm_toggle", "Toggle Arm", "mech.toggleArm();", "#FF00FF", "Pneumatics"),
            command("lever_toggle", "Toggle Lever", "mech.toggleLever();", "#AA00AA", "Pneumatics"),
        ],
    }
}

fn create_timing_category() -> CategoryFile {
    CategoryFile {
        category: "Timing".to_string(),
        description: "Fixed delays".to_string(),
        commands: vec![
            command("wait_100", "Wait 100ms", "pros::delay(100);", "#888888", "Timing"),
            command("wait_250", "Wait 250ms", "pros::delay(250);", "#888888", "Timing"),
            command("wait_500", "Wait 500ms", "pros::delay(500);", "#888888", "Timing"),
            command("wait_1000", "Wait 1s", "pros::delay(1000);", "#888888", "Timing"),
        ],
    }
}

/// 创建起步赛季配置
///
/// 引用全部出厂类别，并附带左右两个起始位置。
pub fn create_starter_season_config(display_name: &str) -> SeasonConfig {
    SeasonConfig {
        season: Some(display_name.to_string()),
        include_commands_from: builtin_categories()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect(),
        command_overrides: HashMap::new(),
        custom_commands: Vec::new(),
        command_sequences: Vec::new(),
        starting_positions: vec![
            StartingPosition {
                label: "Left Start".to_string(),
                x: -48.0,
                y: -60.0,
                heading: 0.0,
                side: Some(Side::Left),
                alliance: Some(Alliance::Red),
            },
            StartingPosition {
                label: "Right Start".to_string(),
                x: 48.0,
                y: -60.0,
                heading: 0.0,
                side: Some(Side::Right),
                alliance: Some(Alliance::Red),
            },
        ],
    }
}

/// 从赛季标识推导显示名称，如 "pushback_2026" → "Pushback 2026"
pub fn season_display_name(season: &str) -> String {
    season
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 初始化工作区
///
/// 创建目录结构、出厂类别文件和起步赛季配置。
/// 已存在的文件全部保留，重复执行不会产生任何改动。
pub async fn init_workspace(paths: &WorkspacePaths, season: &str) -> AppResult<()> {
    paths.ensure_directories_exist()?;

    for (file_name, category) in builtin_categories() {
        let path = paths.category_file(file_name);
        if path.exists() {
            debug!("类别文件已存在，跳过: {}", path.display());
            continue;
        }

        let content = serde_json::to_string_pretty(&category)
            .with_context(|| format!("无法序列化类别 {}", file_name))?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("无法写入类别文件: {}", path.display()))?;
        info!("创建类别文件: {}", path.display());
    }

    let season_dir = paths.season_dir(season);
    if !season_dir.exists() {
        tokio::fs::create_dir_all(&season_dir)
            .await
            .with_context(|| format!("无法创建赛季目录: {}", season_dir.display()))?;
        info!("创建赛季目录: {}", season_dir.display());
    }

    let config_path = paths.season_config_file(season);
    if config_path.exists() {
        debug!("赛季配置已存在，跳过: {}", config_path.display());
    } else {
        let config = create_starter_season_config(&season_display_name(season));
        let content =
            serde_json::to_string_pretty(&config).with_context(|| "无法序列化赛季配置")?;
        tokio::fs::write(&config_path, content)
            .await
            .with_context(|| format!("无法写入赛季配置: {}", config_path.display()))?;
        info!("创建赛季配置: {}", config_path.display());
    }

    Ok(())
}
