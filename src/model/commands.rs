/*!
 * 机构命令数据模型
 *
 * 定义可挂载到路径点上的机构命令（Command）、命令参数和命令序列。
 * 命令从 command_library/ 与赛季配置中的 JSON 文件加载，
 * 结构与 JSON 文件格式保持完全一致。
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 代码模板中的参数占位符，形如 `{velocity}`
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// 命令参数类型
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// 整数参数
    #[default]
    Int,

    /// 浮点参数
    Float,

    /// 布尔参数
    Bool,

    /// 字符串参数
    String,
}

/// 命令参数定义（例如速度、时长）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandParameter {
    /// 参数名称，对应模板中的占位符
    pub name: String,

    /// 参数类型
    #[serde(rename = "type", default)]
    pub kind: ParameterKind,

    /// 默认值
    #[serde(default = "default_parameter_value")]
    pub default: Value,

    /// 最小值（仅数值参数）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// 最大值（仅数值参数）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// 参数说明
    #[serde(default)]
    pub description: String,
}

/// 单条机构命令定义
///
/// `id` 在所属类别内唯一，是覆盖与引用的标识键。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandDefinition {
    /// 唯一标识（例如 "intake_in"）
    pub id: String,

    /// 显示名称（例如 "Intake In"）
    pub name: String,

    /// C++ 代码模板（例如 "mech.intakeIn();"）
    pub code_template: String,

    /// 界面颜色（十六进制）
    #[serde(default = "default_color")]
    pub color: String,

    /// 所属类别，加载时由类别文件回填
    #[serde(default = "default_category")]
    pub category: String,

    /// 命令说明
    #[serde(default)]
    pub description: String,

    /// 参数列表
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<CommandParameter>,
}

impl CommandDefinition {
    /// 生成填充参数后的 C++ 代码
    ///
    /// 模板中形如 `{name}` 的占位符会被 `param_values` 中的同名值替换；
    /// 未提供值的占位符保持原样，多余的值被忽略。
    pub fn generate_code(&self, param_values: Option<&HashMap<String, Value>>) -> String {
        let mut code = self.code_template.clone();

        if let Some(values) = param_values {
            for (name, value) in values {
                let placeholder = format!("{{{}}}", name);
                code = code.replace(&placeholder, &render_value(value));
            }
        }

        code
    }

    /// 列出代码模板中引用的全部占位符名称
    pub fn placeholders(&self) -> Vec<String> {
        PLACEHOLDER_RE
            .captures_iter(&self.code_template)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// 命令序列：按顺序执行的一组命令引用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandSequence {
    /// 唯一标识
    pub id: String,

    /// 显示名称
    pub name: String,

    /// 按执行顺序排列的命令 ID 列表
    #[serde(rename = "commands", default)]
    pub command_ids: Vec<String>,

    /// 界面颜色（十六进制）
    #[serde(default = "default_color")]
    pub color: String,

    /// 所属类别
    #[serde(default = "default_sequence_category")]
    pub category: String,

    /// 序列说明
    #[serde(default)]
    pub description: String,
}

/// 将参数值渲染为可嵌入 C++ 代码的文本
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn default_parameter_value() -> Value {
    Value::from(0)
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_category() -> String {
    "Misc".to_string()
}

fn default_sequence_category() -> String {
    "Sequences".to_string()
}
