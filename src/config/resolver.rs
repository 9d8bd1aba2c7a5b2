/*!
 * 赛季配置解析模块
 *
 * 把共享命令库与赛季配置合并成赛季最终可用的命令集。
 * 合并规则：按 include 顺序拼接类别命令，再应用赛季覆盖项，
 * 最后并入赛季自定义命令；同 ID 冲突时赛季侧定义优先。
 */

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::library::CommandLibrary;
use crate::config::paths::WorkspacePaths;
use crate::config::types::{SeasonConfig, StartingPosition};
use crate::config::validator::CommandValidator;
use crate::model::{CommandDefinition, CommandSequence};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// 赛季解析结果
///
/// 包含该赛季全部可用命令、命令序列和起始位置。
/// `commands` 的顺序是确定的：类别按 include 顺序、类别内按文件
/// 顺序、新增的自定义命令按配置顺序附加在末尾。
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSeason {
    /// 赛季标识（目录名）
    pub name: String,

    /// 赛季显示名称
    pub display_name: String,

    /// 合并后的命令列表
    pub commands: Vec<CommandDefinition>,

    /// 命令序列列表
    pub sequences: Vec<CommandSequence>,

    /// 起始位置列表
    pub starting_positions: Vec<StartingPosition>,
}

impl ResolvedSeason {
    /// 按 ID 查找命令
    pub fn command(&self, id: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// 按 ID 查找命令序列
    pub fn sequence(&self, id: &str) -> Option<&CommandSequence> {
        self.sequences.iter().find(|s| s.id == id)
    }

    /// 按类别分组返回命令，分组顺序与命令出现顺序一致
    pub fn commands_by_category(&self) -> Vec<(String, Vec<&CommandDefinition>)> {
        let mut groups: Vec<(String, Vec<&CommandDefinition>)> = Vec::new();
        for command in &self.commands {
            match groups.iter_mut().find(|(name, _)| *name == command.category) {
                Some((_, list)) => list.push(command),
                None => groups.push((command.category.clone(), vec![command])),
            }
        }
        groups
    }
}

/// 赛季配置解析器
pub struct SeasonResolver {
    paths: WorkspacePaths,
    library: CommandLibrary,
}

impl SeasonResolver {
    /// 创建解析器
    pub fn new(paths: &WorkspacePaths) -> Self {
        Self {
            paths: paths.clone(),
            library: CommandLibrary::new(paths),
        }
    }

    /// 共享命令库
    pub fn library(&self) -> &CommandLibrary {
        &self.library
    }

    /// 加载赛季配置文件
    pub async fn load_season_config(&self, season: &str) -> ConfigResult<SeasonConfig> {
        let path = self.paths.season_config_file(season);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::season_not_found(season, path));
            }
            Err(e) => {
                return Err(ConfigError::io(
                    format!("reading season config {}", path.display()),
                    e,
                ));
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::parse(&path, e))
    }

    /// 解析一个赛季的完整命令集
    ///
    /// 任何一个被引用的类别缺失或非法都会使解析整体失败，
    /// 不会退回部分结果。
    pub async fn resolve(&self, season: &str) -> ConfigResult<ResolvedSeason> {
        let config = self.load_season_config(season).await?;

        self.validate_season_entries(season, &config)?;

        // 按 include 顺序拼接类别命令。跨类别的同 ID 定义只有在赛季
        // 配置自行接管该 ID（覆盖项或同名自定义命令）时才被允许，
        // 此时保留首个定义，后续定义丢弃。
        let mut commands: Vec<CommandDefinition> = Vec::new();
        let mut sources: HashMap<String, String> = HashMap::new();
        for name in &config.include_commands_from {
            let file = self.library.load_category(name).await?;
            for command in file.commands {
                if let Some(first) = sources.get(&command.id) {
                    let season_resolves = config.command_overrides.contains_key(&command.id)
                        || config.custom_commands.iter().any(|c| c.id == command.id);
                    if !season_resolves {
                        return Err(ConfigError::ConflictingCommandId {
                            id: command.id.clone(),
                            first: first.clone(),
                            second: file.category.clone(),
                        });
                    }
                    debug!(
                        "命令 {} 在类别 {} 与 {} 中重复定义，由赛季配置接管",
                        command.id, first, file.category
                    );
                    continue;
                }
                sources.insert(command.id.clone(), file.category.clone());
                commands.push(command);
            }
        }

        // 应用覆盖项：只改写覆盖项里出现的字段
        for command in &mut commands {
            if let Some(patch) = config.command_overrides.get(&command.id) {
                patch.apply(command);
            }
        }
        let mut unmatched: Vec<&str> = config
            .command_overrides
            .keys()
            .filter(|id| {
                !commands.iter().any(|c| &c.id == *id)
                    && !config.custom_commands.iter().any(|c| &c.id == *id)
            })
            .map(String::as_str)
            .collect();
        unmatched.sort_unstable();
        for id in unmatched {
            warn!("赛季 {} 的覆盖项 {} 未匹配任何命令，已忽略", season, id);
        }

        // 并入自定义命令：同 ID 原位替换，新 ID 附加到末尾
        for custom in &config.custom_commands {
            match commands.iter_mut().find(|c| c.id == custom.id) {
                Some(existing) => *existing = custom.clone(),
                None => commands.push(custom.clone()),
            }
        }

        // 序列只能引用最终命令集里存在的 ID
        for sequence in &config.command_sequences {
            for command_id in &sequence.command_ids {
                if !commands.iter().any(|c| &c.id == command_id) {
                    return Err(ConfigError::UnknownSequenceCommand {
                        sequence: sequence.id.clone(),
                        command: command_id.clone(),
                    });
                }
            }
        }

        // 合并完成后命令 ID 必须唯一
        let mut ids = HashSet::new();
        for command in &commands {
            if !ids.insert(command.id.as_str()) {
                return Err(ConfigError::internal(format!(
                    "duplicate command id '{}' survived season resolution",
                    command.id
                )));
            }
        }

        let resolved = ResolvedSeason {
            name: season.to_string(),
            display_name: config.display_name(season).to_string(),
            commands,
            sequences: config.command_sequences.clone(),
            starting_positions: config.starting_positions.clone(),
        };

        info!(
            "赛季 {} 解析完成: {} 条命令, {} 个序列, {} 个起始位置",
            season,
            resolved.commands.len(),
            resolved.sequences.len(),
            resolved.starting_positions.len()
        );
        Ok(resolved)
    }

    /// 校验赛季配置自带的条目（自定义命令、序列、起始位置）
    fn validate_season_entries(&self, season: &str, config: &SeasonConfig) -> ConfigResult<()> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let mut custom_ids = HashSet::new();
        for custom in &config.custom_commands {
            CommandValidator::validate_command(custom, &mut errors, &mut warnings);
            if !custom_ids.insert(custom.id.as_str()) {
                errors.push(format!("自定义命令 ID {} 重复定义", custom.id));
            }
        }

        let mut sequence_ids = HashSet::new();
        for sequence in &config.command_sequences {
            let report = CommandValidator::validate_sequence(sequence);
            errors.extend(report.errors);
            warnings.extend(report.warnings);
            if !sequence_ids.insert(sequence.id.as_str()) {
                errors.push(format!("序列 ID {} 重复定义", sequence.id));
            }
        }

        for position in &config.starting_positions {
            let report = CommandValidator::validate_starting_position(position);
            errors.extend(report.errors);
            warnings.extend(report.warnings);
        }

        if !errors.is_empty() {
            return Err(ConfigError::InvalidSeason {
                name: season.to_string(),
                errors,
            });
        }
        for warning in &warnings {
            warn!("赛季 {} 存在警告: {}", season, warning);
        }
        Ok(())
    }
}
