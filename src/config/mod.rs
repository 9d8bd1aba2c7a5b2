/*!
 * 命令配置系统模块
 *
 * 提供基于 JSON 文件的赛季命令配置管理，包括共享命令库加载、
 * 赛季配置解析、覆盖合并和字段校验等核心功能。
 */

pub mod defaults;
pub mod error;
pub mod library;
pub mod paths;
pub mod resolver;
pub mod types;
pub mod validator;

// 重新导出核心类型和函数
pub use defaults::{
    builtin_categories, create_starter_season_config, init_workspace, season_display_name,
    DEFAULT_SEASON,
};
pub use error::{ConfigError, ConfigResult};
pub use library::CommandLibrary;
pub use paths::{WorkspacePaths, WORKSPACE_ENV_VAR};
pub use resolver::{ResolvedSeason, SeasonResolver};
pub use types::{CategoryFile, CommandOverride, SeasonConfig, StartingPosition};
pub use validator::{CommandValidator, ValidationReport};

/// 命令库目录名
pub const LIBRARY_DIR_NAME: &str = "command_library";

/// 赛季目录名
pub const SEASONS_DIR_NAME: &str = "seasons";

/// 项目目录名
pub const PROJECTS_DIR_NAME: &str = "projects";

/// 赛季配置文件名
pub const SEASON_CONFIG_FILE_NAME: &str = "config.json";

/// 项目文件扩展名
pub const PROJECT_FILE_SUFFIX: &str = ".shupaths";
