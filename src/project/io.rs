/*!
 * 项目文件 (.shupaths) 的读写
 *
 * 项目文件是带 .shupaths 扩展名的 JSON。写入采用临时文件加
 * 原子重命名，避免中断时留下半截文件。
 */

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::types::StartingPosition;
use crate::model::{HeadingMode, Project};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// 当前项目文件格式版本
pub const PROJECT_VERSION: &str = "1.0.0";

/// 项目文件的顶层结构
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectFile {
    /// 文件格式版本
    #[serde(default = "default_file_version")]
    version: String,

    #[serde(flatten)]
    project: Project,
}

fn default_file_version() -> String {
    "0.0.0".to_string()
}

/// 保存项目
///
/// 写入前刷新 `modified` 时间戳；首次保存时补上 `created`。
pub async fn save_project(project: &mut Project, path: &Path) -> ConfigResult<()> {
    let now = Utc::now();
    project.modified = Some(now);
    if project.created.is_none() {
        project.created = Some(now);
    }

    let file = ProjectFile {
        version: PROJECT_VERSION.to_string(),
        project: project.clone(),
    };
    let content = serde_json::to_string_pretty(&file)
        .map_err(|e| ConfigError::internal(format!("serializing project: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ConfigError::io(
                    format!("creating project directory {}", parent.display()),
                    e,
                )
            })?;
        }
    }

    // 先写临时文件再重命名，重命名在同一文件系统内是原子的
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, content).await.map_err(|e| {
        ConfigError::io(
            format!("writing temp project file {}", temp_path.display()),
            e,
        )
    })?;
    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        ConfigError::io(
            format!("renaming {} -> {}", temp_path.display(), path.display()),
            e,
        )
    })?;

    debug!("项目已保存到: {}", path.display());
    Ok(())
}

/// 加载项目
///
/// 文件缺失、JSON 无效或主版本号高于当前版本都会返回错误；
/// 次版本号不同只记录警告。
pub async fn load_project(path: &Path) -> ConfigResult<Project> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ProjectNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ConfigError::io(
                format!("reading project file {}", path.display()),
                e,
            ));
        }
    };

    let file: ProjectFile =
        serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;

    check_version_compat(&file.version, path)?;

    debug!(
        "已加载项目: {} ({} 条路线)",
        path.display(),
        file.project.paths.len()
    );
    Ok(file.project)
}

/// 主版本号不高于当前版本即视为兼容
fn check_version_compat(file_version: &str, path: &Path) -> ConfigResult<()> {
    let current_major = major_of(PROJECT_VERSION).unwrap_or(0);

    match major_of(file_version) {
        Some(file_major) if file_major <= current_major => {
            if file_version != PROJECT_VERSION {
                warn!(
                    "项目文件 {} 的格式版本为 {} (当前 {})",
                    path.display(),
                    file_version,
                    PROJECT_VERSION
                );
            }
            Ok(())
        }
        _ => Err(ConfigError::IncompatibleVersion {
            found: file_version.to_string(),
            current: PROJECT_VERSION.to_string(),
        }),
    }
}

fn major_of(version: &str) -> Option<u32> {
    version.split('.').next()?.parse().ok()
}

/// 创建一个新项目，内含一条名为 "New Path" 的空路线
///
/// 给定起始位置时，路线会带上一个手动朝向的起始路径点，
/// 并继承该位置声明的半区与联盟。
pub fn create_new_project(season: &str, start: Option<&StartingPosition>) -> Project {
    let mut project = Project::new(season);
    let index = project.add_path("New Path");

    if let Some(position) = start {
        let path = &mut project.paths[index];
        let wp_index = path.add_waypoint(position.x, position.y);
        let wp = &mut path.waypoints[wp_index];
        wp.heading = Some(position.heading);
        wp.heading_mode = HeadingMode::Manual;

        if let Some(side) = position.side {
            path.side = side;
        }
        if let Some(alliance) = position.alliance {
            path.alliance = alliance;
        }
    }

    project
}

/// 项目文件摘要
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    /// 赛季标识
    pub season: String,

    /// 路线数量
    pub path_count: usize,

    /// 最后修改时间
    pub modified: String,

    /// 文件格式版本
    pub version: String,
}

/// 读取项目文件摘要，不做完整反序列化
///
/// 字段缺失时填 "unknown"，只有文件缺失或 JSON 无效才报错。
pub async fn project_info(path: &Path) -> ConfigResult<ProjectInfo> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ProjectNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ConfigError::io(
                format!("reading project file {}", path.display()),
                e,
            ));
        }
    };

    let data: Value = serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;

    let as_str = |key: &str| -> String {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };

    Ok(ProjectInfo {
        season: as_str("season"),
        path_count: data
            .get("paths")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        modified: as_str("modified"),
        version: as_str("version"),
    })
}
