/*!
 * 命令配置验证模块
 *
 * 提供命令类别、命令序列和起始位置的字段级验证。
 * 验证结果分为错误（阻止加载）和警告（仅记录日志）两级。
 */

use crate::config::types::{CategoryFile, StartingPosition};
use crate::geometry::is_on_field;
use crate::model::{CommandDefinition, CommandSequence, ParameterKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 验证结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// 验证是否通过
    pub is_valid: bool,

    /// 错误信息列表
    pub errors: Vec<String>,

    /// 警告信息列表
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// 合并另一份验证结果
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// 命令配置验证器
pub struct CommandValidator;

impl CommandValidator {
    /// 验证一个命令类别文件
    pub fn validate_category(file: &CategoryFile) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if file.category.trim().is_empty() {
            errors.push("类别名称不能为空".to_string());
        }

        for command in &file.commands {
            Self::validate_command(command, &mut errors, &mut warnings);
        }

        ValidationReport::from_parts(errors, warnings)
    }

    /// 验证单条命令定义
    pub fn validate_command(
        command: &CommandDefinition,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        if command.id.trim().is_empty() {
            errors.push("命令 ID 不能为空".to_string());
        }

        if command.name.trim().is_empty() {
            errors.push(format!("命令 {} 的显示名称不能为空", command.id));
        }

        if command.code_template.trim().is_empty() {
            warnings.push(format!("命令 {} 的代码模板为空", command.id));
        }

        if !Self::is_valid_color(&command.color) {
            errors.push(format!(
                "命令 {} 的颜色值无效: {}",
                command.id, command.color
            ));
        }

        Self::validate_parameters(command, errors, warnings);
    }

    /// 验证命令参数与模板占位符的一致性
    fn validate_parameters(
        command: &CommandDefinition,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let mut seen = HashSet::new();

        for param in &command.parameters {
            if param.name.trim().is_empty() {
                errors.push(format!("命令 {} 存在未命名参数", command.id));
                continue;
            }

            if !seen.insert(param.name.as_str()) {
                errors.push(format!(
                    "命令 {} 的参数 {} 重复定义",
                    command.id, param.name
                ));
            }

            if let (Some(min), Some(max)) = (param.min, param.max) {
                if min > max {
                    errors.push(format!(
                        "命令 {} 的参数 {} 范围无效: min {} > max {}",
                        command.id, param.name, min, max
                    ));
                }
            }

            if matches!(param.kind, ParameterKind::Bool | ParameterKind::String)
                && (param.min.is_some() || param.max.is_some())
            {
                warnings.push(format!(
                    "命令 {} 的参数 {} 是非数值类型，min/max 将被忽略",
                    command.id, param.name
                ));
            }
        }

        // 模板占位符与声明的参数互相对照
        let placeholders: HashSet<String> = command.placeholders().into_iter().collect();
        for placeholder in &placeholders {
            if !seen.contains(placeholder.as_str()) {
                warnings.push(format!(
                    "命令 {} 的模板引用了未声明的参数 {{{}}}",
                    command.id, placeholder
                ));
            }
        }
        for param in &command.parameters {
            if !placeholders.contains(&param.name) {
                warnings.push(format!(
                    "命令 {} 声明的参数 {} 未在模板中使用",
                    command.id, param.name
                ));
            }
        }
    }

    /// 验证命令序列的字段
    pub fn validate_sequence(sequence: &CommandSequence) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if sequence.id.trim().is_empty() {
            errors.push("序列 ID 不能为空".to_string());
        }

        if sequence.name.trim().is_empty() {
            errors.push(format!("序列 {} 的显示名称不能为空", sequence.id));
        }

        if !Self::is_valid_color(&sequence.color) {
            errors.push(format!(
                "序列 {} 的颜色值无效: {}",
                sequence.id, sequence.color
            ));
        }

        if sequence.command_ids.is_empty() {
            warnings.push(format!("序列 {} 不包含任何命令", sequence.id));
        }

        ValidationReport::from_parts(errors, warnings)
    }

    /// 验证起始位置
    pub fn validate_starting_position(position: &StartingPosition) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if position.label.trim().is_empty() {
            errors.push("起始位置标签不能为空".to_string());
        }

        if !is_on_field(position.x, position.y) {
            warnings.push(format!(
                "起始位置 {} 在场地范围外: ({}, {})",
                position.label, position.x, position.y
            ));
        }

        ValidationReport::from_parts(errors, warnings)
    }

    /// 验证颜色值格式
    ///
    /// 支持十六进制颜色 (#RGB, #RRGGBB, #RRGGBBAA)。
    pub fn is_valid_color(color: &str) -> bool {
        if color.is_empty() {
            return false;
        }

        if let Some(hex_part) = color.strip_prefix('#') {
            if hex_part.len() == 3 || hex_part.len() == 6 || hex_part.len() == 8 {
                return hex_part.chars().all(|c| c.is_ascii_hexdigit());
            }
        }

        false
    }
}
