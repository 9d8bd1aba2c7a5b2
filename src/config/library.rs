/*!
 * 命令类别库模块
 *
 * 管理 command_library/ 目录下按类别划分的命令定义文件。
 * 每个 JSON 文件描述一个类别，文件名（不含扩展名）即类别标识。
 */

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::paths::WorkspacePaths;
use crate::config::types::CategoryFile;
use crate::config::validator::CommandValidator;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 命令类别库
///
/// 负责从工作区的命令库目录加载类别文件并做结构校验。
/// 加载采用快速失败策略：文件缺失、JSON 无效或字段校验出错都会
/// 立即返回错误，而不是静默跳过。
pub struct CommandLibrary {
    /// 命令库目录
    library_dir: PathBuf,
}

impl CommandLibrary {
    /// 创建命令库实例
    pub fn new(paths: &WorkspacePaths) -> Self {
        Self {
            library_dir: paths.command_library_dir().to_path_buf(),
        }
    }

    /// 命令库目录
    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    /// 类别文件路径
    pub fn category_path(&self, name: &str) -> PathBuf {
        self.library_dir.join(format!("{}.json", name))
    }

    /// 加载单个命令类别
    ///
    /// 读取、解析、类别内查重、字段校验，任一步失败即返回错误。
    /// 校验警告不阻止加载，只记录日志。
    pub async fn load_category(&self, name: &str) -> ConfigResult<CategoryFile> {
        let path = self.category_path(name);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::category_not_found(name, path));
            }
            Err(e) => {
                return Err(ConfigError::io(
                    format!("reading category file {}", path.display()),
                    e,
                ));
            }
        };

        let mut file: CategoryFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::parse(&path, e))?;

        // 命令的 category 字段以文件声明的类别名为准
        for command in &mut file.commands {
            command.category = file.category.clone();
        }

        // 同一类别内命令 ID 不允许重复
        let mut seen = HashSet::new();
        for command in &file.commands {
            if !seen.insert(command.id.as_str()) {
                return Err(ConfigError::DuplicateCommandId {
                    id: command.id.clone(),
                    category: file.category.clone(),
                });
            }
        }

        let report = CommandValidator::validate_category(&file);
        if !report.is_valid {
            return Err(ConfigError::InvalidCategory {
                name: name.to_string(),
                errors: report.errors,
            });
        }
        for warning in &report.warnings {
            warn!("类别 {} 存在警告: {}", name, warning);
        }

        debug!("已加载命令类别 {} ({} 条命令)", name, file.commands.len());
        Ok(file)
    }

    /// 扫描命令库目录，返回所有可用的类别名称（按文件名排序）
    pub async fn available_categories(&self) -> ConfigResult<Vec<String>> {
        let mut names = Vec::new();

        if !self.library_dir.exists() {
            return Ok(names);
        }

        let mut entries = tokio::fs::read_dir(&self.library_dir).await.map_err(|e| {
            ConfigError::io(
                format!("reading library directory {}", self.library_dir.display()),
                e,
            )
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            ConfigError::io(
                format!("reading library directory {}", self.library_dir.display()),
                e,
            )
        })? {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
