/*!
 * 工作区路径管理模块
 *
 * 规划器工作区是一个普通目录，包含命令库、赛季配置和项目文件：
 *
 * ```text
 * <workspace>/
 *   command_library/<category>.json
 *   seasons/<season>/config.json
 *   projects/<name>.shupaths
 * ```
 *
 * 本模块负责工作区的发现、目录布局和文件路径解析。
 */

use crate::utils::error::AppResult;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 指定工作区位置的环境变量
pub const WORKSPACE_ENV_VAR: &str = "SHUPATH_WORKSPACE";

/// 工作区路径管理器
///
/// 负责管理工作区内所有数据文件和目录的路径解析。
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    /// 工作区根目录
    root: PathBuf,

    /// 命令库目录
    command_library_dir: PathBuf,

    /// 赛季配置目录
    seasons_dir: PathBuf,

    /// 项目文件目录
    projects_dir: PathBuf,
}

impl WorkspacePaths {
    /// 使用指定的根目录创建工作区路径管理器
    ///
    /// 只做路径推导，不访问文件系统。
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();

        let command_library_dir = root.join(crate::config::LIBRARY_DIR_NAME);
        let seasons_dir = root.join(crate::config::SEASONS_DIR_NAME);
        let projects_dir = root.join(crate::config::PROJECTS_DIR_NAME);

        Self {
            root,
            command_library_dir,
            seasons_dir,
            projects_dir,
        }
    }

    /// 发现工作区位置
    ///
    /// 按以下顺序确定根目录：
    /// 1. 显式传入的路径（命令行参数）
    /// 2. SHUPATH_WORKSPACE 环境变量
    /// 3. 当前目录（如果其中存在 seasons/ 子目录）
    /// 4. 兜底使用当前目录
    pub fn discover(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Ok(Self::with_root(path));
        }

        if let Ok(env_root) = std::env::var(WORKSPACE_ENV_VAR) {
            debug!("使用环境变量指定的工作区: {}", env_root);
            return Ok(Self::with_root(env_root));
        }

        let cwd = std::env::current_dir().with_context(|| "无法获取当前工作目录")?;

        if !cwd.join(crate::config::SEASONS_DIR_NAME).is_dir() {
            debug!("当前目录中未找到 seasons/，兜底使用: {}", cwd.display());
        }

        Ok(Self::with_root(cwd))
    }

    /// 确保所有数据目录存在
    pub fn ensure_directories_exist(&self) -> AppResult<()> {
        let directories = [
            &self.root,
            &self.command_library_dir,
            &self.seasons_dir,
            &self.projects_dir,
        ];

        for dir in &directories {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("无法创建目录: {}", dir.display()))?;
            }
        }

        Ok(())
    }

    // ========================================================================
    // 路径获取方法
    // ========================================================================

    /// 获取工作区根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 获取命令库目录
    pub fn command_library_dir(&self) -> &Path {
        &self.command_library_dir
    }

    /// 获取赛季配置目录
    pub fn seasons_dir(&self) -> &Path {
        &self.seasons_dir
    }

    /// 获取项目文件目录
    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// 获取指定命令类别文件的路径
    pub fn category_file<S: AsRef<str>>(&self, category: S) -> PathBuf {
        self.command_library_dir
            .join(format!("{}.json", category.as_ref()))
    }

    /// 获取指定赛季的目录路径
    pub fn season_dir<S: AsRef<str>>(&self, season: S) -> PathBuf {
        self.seasons_dir.join(season.as_ref())
    }

    /// 获取指定赛季的配置文件路径
    pub fn season_config_file<S: AsRef<str>>(&self, season: S) -> PathBuf {
        self.season_dir(season)
            .join(crate::config::SEASON_CONFIG_FILE_NAME)
    }

    /// 获取项目目录下指定名称的项目文件路径
    ///
    /// 名称缺少 .shupaths 扩展名时自动补全。
    pub fn project_file<S: AsRef<str>>(&self, name: S) -> PathBuf {
        let name = name.as_ref();
        let file_name = if name.ends_with(crate::config::PROJECT_FILE_SUFFIX) {
            name.to_string()
        } else {
            format!("{}{}", name, crate::config::PROJECT_FILE_SUFFIX)
        };
        self.projects_dir.join(file_name)
    }

    /// 将命令行传入的项目参数解析为文件路径
    ///
    /// 带路径分隔符或指向已存在文件的参数按字面路径使用，
    /// 其余视为 projects/ 目录下的项目名。
    pub fn resolve_project_arg(&self, arg: &str) -> PathBuf {
        let literal = Path::new(arg);
        if arg.contains(std::path::MAIN_SEPARATOR) || literal.exists() {
            return literal.to_path_buf();
        }
        self.project_file(arg)
    }

    // ========================================================================
    // 目录扫描方法
    // ========================================================================

    /// 列出命令库目录中的所有类别文件（按文件名排序）
    pub fn list_category_files(&self) -> AppResult<Vec<PathBuf>> {
        let mut category_files = Vec::new();

        if self.command_library_dir.exists() {
            let entries = std::fs::read_dir(&self.command_library_dir).with_context(|| {
                format!("无法读取命令库目录: {}", self.command_library_dir.display())
            })?;

            for entry in entries {
                let entry = entry.with_context(|| "无法读取命令库目录项")?;

                let path = entry.path();
                if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                    category_files.push(path);
                }
            }
        }

        category_files.sort();
        Ok(category_files)
    }

    /// 列出项目目录中的所有项目文件（按文件名排序）
    pub fn list_project_files(&self) -> AppResult<Vec<PathBuf>> {
        let mut project_files = Vec::new();

        if self.projects_dir.exists() {
            let entries = std::fs::read_dir(&self.projects_dir)
                .with_context(|| format!("无法读取项目目录: {}", self.projects_dir.display()))?;

            for entry in entries {
                let entry = entry.with_context(|| "无法读取项目目录项")?;

                let path = entry.path();
                if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("shupaths") {
                    project_files.push(path);
                }
            }
        }

        project_files.sort();
        Ok(project_files)
    }

    /// 列出所有可用赛季（含 config.json 的子目录，按名称排序）
    pub fn list_seasons(&self) -> AppResult<Vec<String>> {
        let mut seasons = Vec::new();

        if self.seasons_dir.exists() {
            let entries = std::fs::read_dir(&self.seasons_dir)
                .with_context(|| format!("无法读取赛季目录: {}", self.seasons_dir.display()))?;

            for entry in entries {
                let entry = entry.with_context(|| "无法读取赛季目录项")?;

                let path = entry.path();
                if path.is_dir() && path.join(crate::config::SEASON_CONFIG_FILE_NAME).is_file() {
                    if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                        seasons.push(name.to_string());
                    }
                }
            }
        }

        seasons.sort();
        Ok(seasons)
    }
}
