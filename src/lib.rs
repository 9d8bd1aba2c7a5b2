//! shupath 规划器后端
//!
//! VEX 自动赛路径与命令规划工具的核心库。
//! 主要功能包括：
//! - 赛季命令配置的加载与合并（命令库 + 赛季覆盖）
//! - 路径与项目数据模型及 .shupaths 文件读写
//! - 场地几何计算（贝塞尔曲线、朝向）
//! - shulib C++ 自动赛代码导出

// 模块声明
pub mod cli; // 命令行接口模块
pub mod config; // 赛季命令配置系统模块
pub mod export; // C++ 代码导出模块
pub mod geometry; // 场地几何计算模块
pub mod model; // 核心数据模型模块
pub mod project; // 项目文件持久化模块
pub mod undo; // 撤销/重做模块
pub mod utils; // 工具和错误处理模块

pub use utils::error::{AppError, AppResult};
