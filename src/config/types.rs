/*!
 * 配置系统数据类型定义
 *
 * 定义命令类别文件与赛季配置文件对应的数据结构。
 * 结构与 JSON 配置文件格式保持完全一致。
 */

use crate::model::{Alliance, CommandDefinition, CommandSequence, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 命令类别文件结构
///
/// 对应 command_library/<category>.json，每个机构一个文件。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryFile {
    /// 类别显示名称（例如 "Intake"）
    pub category: String,

    /// 类别说明
    #[serde(default)]
    pub description: String,

    /// 本类别的命令定义，按文件顺序排列
    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
}

/// 赛季对单条命令的覆盖
///
/// 浅合并补丁：只有出现的字段会被替换，其余字段保持基础定义。
/// 命令的 `id` 与参数列表不可覆盖，需要改动时应使用 custom_commands。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommandOverride {
    /// 覆盖显示名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 覆盖代码模板
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_template: Option<String>,

    /// 覆盖界面颜色
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// 覆盖命令说明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandOverride {
    /// 将覆盖应用到基础命令定义上（浅合并）
    pub fn apply(&self, command: &mut CommandDefinition) {
        if let Some(name) = &self.name {
            command.name = name.clone();
        }
        if let Some(code_template) = &self.code_template {
            command.code_template = code_template.clone();
        }
        if let Some(color) = &self.color {
            command.color = color.clone();
        }
        if let Some(description) = &self.description {
            command.description = description.clone();
        }
    }
}

/// 机器人默认起始位置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartingPosition {
    /// 位置标签（例如 "Left AWP"）
    pub label: String,

    /// X 坐标（英寸）
    pub x: f64,

    /// Y 坐标（英寸）
    pub y: f64,

    /// 初始朝向（度）
    pub heading: f64,

    /// 适用半区
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,

    /// 适用联盟
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance: Option<Alliance>,
}

/// 赛季配置文件结构
///
/// 对应 seasons/<season>/config.json。所有字段均可省略。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeasonConfig {
    /// 赛季显示名称，缺省时使用目录名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// 要引入的命令类别名列表，按引入顺序排列
    #[serde(default)]
    pub include_commands_from: Vec<String>,

    /// 按命令 ID 索引的覆盖表
    #[serde(default)]
    pub command_overrides: HashMap<String, CommandOverride>,

    /// 赛季专属命令，追加在类别命令之后
    #[serde(default)]
    pub custom_commands: Vec<CommandDefinition>,

    /// 赛季命令序列
    #[serde(default)]
    pub command_sequences: Vec<CommandSequence>,

    /// 默认起始位置列表
    #[serde(default)]
    pub starting_positions: Vec<StartingPosition>,
}

impl SeasonConfig {
    /// 获取赛季显示名称，未设置时回退到给定的目录名
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.season.as_deref().unwrap_or(fallback)
    }
}
