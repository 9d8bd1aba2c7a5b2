/*!
 * 命令行接口
 *
 * 所有子命令共享工作区发现逻辑：--workspace 优先，
 * 其次 SHUPATH_WORKSPACE 环境变量，最后是当前目录。
 */

use crate::config::{init_workspace, SeasonResolver, WorkspacePaths, DEFAULT_SEASON};
use crate::export;
use crate::geometry::{estimate_curve_length, Point};
use crate::model::Project;
use crate::model::RoutePath;
use crate::project;
use crate::utils::error::AppResult;
use anyhow::{anyhow, bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "shupath", version, about = "Autonomous path and command planner for VEX robots")]
pub struct Cli {
    /// Workspace root (default: $SHUPATH_WORKSPACE or the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scaffold a workspace with the builtin command library
    Init {
        /// Season to create (directory name under seasons/)
        #[arg(long, default_value = DEFAULT_SEASON)]
        season: String,
    },

    /// List the seasons available in the workspace
    Seasons,

    /// Show the resolved command set of a season
    Commands {
        /// Season directory name
        season: String,

        /// Only show commands from one category
        #[arg(long)]
        category: Option<String>,

        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Resolve a season and report configuration problems
    Validate {
        /// Season directory name
        season: String,
    },

    /// Create a new project file
    New {
        /// Project name (stored under projects/) or explicit file path
        project: String,

        /// Season the project belongs to
        #[arg(long, default_value = DEFAULT_SEASON)]
        season: String,

        /// Seed the first path from a named starting position
        #[arg(long)]
        position: Option<String>,
    },

    /// Show a summary of a project file
    Info {
        /// Project name or file path
        project: String,
    },

    /// Export a project path as shulib C++ code
    Export {
        /// Project name or file path
        project: String,

        /// Path to export, by name or index (default: the first path)
        #[arg(long)]
        path: Option<String>,

        /// Emit only the routine function, without the file header
        #[arg(long)]
        function_only: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// 执行解析出的子命令
    pub async fn run(self) -> AppResult<()> {
        let paths = WorkspacePaths::discover(self.workspace.as_deref())?;

        match self.command {
            Command::Init { season } => run_init(&paths, &season).await,
            Command::Seasons => run_seasons(&paths).await,
            Command::Commands {
                season,
                category,
                json,
            } => run_commands(&paths, &season, category.as_deref(), json).await,
            Command::Validate { season } => run_validate(&paths, &season).await,
            Command::New {
                project,
                season,
                position,
            } => run_new(&paths, &project, &season, position.as_deref()).await,
            Command::Info { project } => run_info(&paths, &project).await,
            Command::Export {
                project,
                path,
                function_only,
                output,
            } => run_export(&paths, &project, path.as_deref(), function_only, output.as_deref()).await,
        }
    }
}

async fn run_init(paths: &WorkspacePaths, season: &str) -> AppResult<()> {
    init_workspace(paths, season).await?;

    println!("Workspace ready at {}", paths.root().display());
    println!("  {} category files", paths.list_category_files()?.len());
    println!("  seasons/{}/config.json", season);
    println!("  projects/");
    Ok(())
}

async fn run_seasons(paths: &WorkspacePaths) -> AppResult<()> {
    let seasons = paths.list_seasons()?;

    if seasons.is_empty() {
        println!("No seasons found in {}", paths.seasons_dir().display());
        println!("Run `shupath init` to scaffold the builtin library.");
        return Ok(());
    }

    let resolver = SeasonResolver::new(paths);
    for season in seasons {
        match resolver.load_season_config(&season).await {
            Ok(config) => {
                let display = config.display_name(&season);
                if display == season {
                    println!("{}", season);
                } else {
                    println!("{}  ({})", season, display);
                }
            }
            Err(e) => println!("{}  [invalid: {}]", season, e),
        }
    }
    Ok(())
}

async fn run_commands(
    paths: &WorkspacePaths,
    season: &str,
    category: Option<&str>,
    json: bool,
) -> AppResult<()> {
    let resolver = SeasonResolver::new(paths);
    let resolved = resolver.resolve(season).await?;

    let groups = resolved.commands_by_category();
    let groups: Vec<_> = match category {
        Some(wanted) => {
            let filtered: Vec<_> = groups
                .into_iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case(wanted))
                .collect();
            if filtered.is_empty() {
                let available: Vec<String> = resolved
                    .commands_by_category()
                    .into_iter()
                    .map(|(name, _)| name)
                    .collect();
                bail!(
                    "no category '{}' in season {} (available: {})",
                    wanted,
                    season,
                    available.join(", ")
                );
            }
            filtered
        }
        None => groups,
    };

    if json {
        let commands: Vec<_> = groups.iter().flat_map(|(_, list)| list.iter()).collect();
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    println!("Season: {} ({})", resolved.display_name, resolved.name);
    for (name, commands) in &groups {
        println!();
        println!("{}", name);
        for command in commands {
            println!("  {:<18} {:<18} {}", command.id, command.name, command.code_template);
        }
    }

    if category.is_none() && !resolved.sequences.is_empty() {
        println!();
        println!("Sequences");
        for sequence in &resolved.sequences {
            println!(
                "  {:<18} {:<18} {} commands",
                sequence.id,
                sequence.name,
                sequence.command_ids.len()
            );
        }
    }
    Ok(())
}

async fn run_validate(paths: &WorkspacePaths, season: &str) -> AppResult<()> {
    let resolver = SeasonResolver::new(paths);
    let resolved = resolver.resolve(season).await?;

    println!(
        "{}: OK ({} commands, {} sequences, {} starting positions)",
        season,
        resolved.commands.len(),
        resolved.sequences.len(),
        resolved.starting_positions.len()
    );
    for (name, commands) in resolved.commands_by_category() {
        println!("  {:<14} {} commands", name, commands.len());
    }
    Ok(())
}

async fn run_new(
    paths: &WorkspacePaths,
    name: &str,
    season: &str,
    position_label: Option<&str>,
) -> AppResult<()> {
    // 创建前完整解析一次，保证赛季配置可用
    let resolver = SeasonResolver::new(paths);
    let resolved = resolver.resolve(season).await?;

    let position = match position_label {
        Some(label) => {
            let found = resolved
                .starting_positions
                .iter()
                .find(|p| p.label.eq_ignore_ascii_case(label));
            match found {
                Some(position) => Some(position),
                None => {
                    let available: Vec<&str> = resolved
                        .starting_positions
                        .iter()
                        .map(|p| p.label.as_str())
                        .collect();
                    return Err(anyhow!(
                        "no starting position '{}' in season {} (available: {})",
                        label,
                        season,
                        available.join(", ")
                    ));
                }
            }
        }
        None => None,
    };

    let file_path = paths.resolve_project_arg(name);
    if file_path.exists() {
        bail!("project file already exists: {}", file_path.display());
    }

    let mut project = project::create_new_project(season, position);
    project::save_project(&mut project, &file_path).await?;

    println!("Created project {}", file_path.display());
    Ok(())
}

async fn run_info(paths: &WorkspacePaths, project_arg: &str) -> AppResult<()> {
    let file_path = paths.resolve_project_arg(project_arg);
    let info = project::project_info(&file_path).await?;

    println!("Project: {}", file_path.display());
    println!("  Season:   {}", info.season);
    println!("  Version:  {}", info.version);
    println!("  Paths:    {}", info.path_count);
    println!("  Modified: {}", info.modified);

    // 摘要之外尽力列出每条路线，读取失败不影响退出码
    match project::load_project(&file_path).await {
        Ok(project) => {
            for (i, route) in project.paths.iter().enumerate() {
                let points: Vec<Point> = route
                    .waypoints
                    .iter()
                    .map(|wp| Point::new(wp.x, wp.y))
                    .collect();
                println!(
                    "  [{}] {}  {}/{}  {} waypoints, ~{:.1} in",
                    i,
                    route.name,
                    route.alliance.as_str(),
                    route.side.as_str(),
                    route.waypoints.len(),
                    estimate_curve_length(&points)
                );
            }
        }
        Err(e) => warn!("无法完整读取项目: {}", e),
    }
    Ok(())
}

async fn run_export(
    paths: &WorkspacePaths,
    project_arg: &str,
    path_selector: Option<&str>,
    function_only: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let file_path = paths.resolve_project_arg(project_arg);
    let project = project::load_project(&file_path).await?;
    let route = select_route(&project, path_selector)?;

    let resolver = SeasonResolver::new(paths);
    let resolved = resolver.resolve(&project.season).await?;

    let mut code = if function_only {
        export::export_function(route, &resolved)?
    } else {
        export::export_path(route, &resolved)?
    };
    if !code.ends_with('\n') {
        code.push('\n');
    }

    match output {
        Some(out_path) => {
            tokio::fs::write(out_path, &code)
                .await
                .with_context(|| format!("无法写入导出文件: {}", out_path.display()))?;
            eprintln!("Exported '{}' to {}", route.name, out_path.display());
        }
        None => print!("{}", code),
    }
    Ok(())
}

/// 按名称或索引挑选要导出的路线，缺省取第一条
fn select_route<'a>(project: &'a Project, selector: Option<&str>) -> AppResult<&'a RoutePath> {
    if project.paths.is_empty() {
        bail!("project has no paths to export");
    }

    match selector {
        None => Ok(&project.paths[0]),
        Some(sel) => {
            if let Ok(index) = sel.parse::<usize>() {
                return project.paths.get(index).ok_or_else(|| {
                    anyhow!(
                        "path index {} out of range (project has {} paths)",
                        index,
                        project.paths.len()
                    )
                });
            }
            project.paths.iter().find(|p| p.name == sel).ok_or_else(|| {
                let available: Vec<&str> = project.paths.iter().map(|p| p.name.as_str()).collect();
                anyhow!("no path named '{}' (available: {})", sel, available.join(", "))
            })
        }
    }
}
