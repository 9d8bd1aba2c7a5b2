/*!
 * shulib C++ 代码生成
 *
 * 把一条路线翻译成可直接粘贴进机器人工程的自动赛函数。
 * 生成依赖赛季解析结果：路径点挂载的命令 ID 必须能在
 * 解析后的命令集中找到，否则导出失败。
 */

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::resolver::ResolvedSeason;
use crate::geometry::{calculate_distance, calculate_heading, estimate_curve_length, normalize_angle, Point};
use crate::model::{HeadingMode, MotionType, RoutePath, Waypoint};
use tracing::debug;

/// 函数体缩进
const INDENT: &str = "    ";

/// 导出完整的 C++ 文件
///
/// 包含路线摘要注释、`#include` 和自动赛函数。
pub fn export_path(path: &RoutePath, resolved: &ResolvedSeason) -> ConfigResult<String> {
    let function = export_function(path, resolved)?;

    let points: Vec<Point> = path
        .waypoints
        .iter()
        .map(|wp| Point::new(wp.x, wp.y))
        .collect();
    let length = estimate_curve_length(&points);

    let mut out = String::new();
    out.push_str(&format!("// Autonomous routine: {}\n", path.name));
    out.push_str(&format!(
        "// Alliance: {} | Side: {}\n",
        path.alliance.as_str(),
        path.side.as_str()
    ));
    out.push_str(&format!(
        "// Waypoints: {}, estimated length: {} in\n",
        path.waypoints.len(),
        format_number(length)
    ));
    out.push('\n');
    out.push_str("#include \"shulib/api.h\"\n");
    out.push('\n');
    out.push_str(&function);
    out.push('\n');

    debug!("已导出路线 {} ({} 个路径点)", path.name, path.waypoints.len());
    Ok(out)
}

/// 只导出自动赛函数本体
pub fn export_function(path: &RoutePath, resolved: &ResolvedSeason) -> ConfigResult<String> {
    let headings = resolve_headings(&path.waypoints);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("void {}() {{", sanitize_function_name(&path.name)));

    let mut intake_running = false;
    let mut conveyor_running = false;

    for (i, wp) in path.waypoints.iter().enumerate() {
        // 机构开关状态在运动指令之前切换
        if wp.intaking != intake_running {
            let call = if wp.intaking {
                "mech.intakeIn();"
            } else {
                "mech.intakeStop();"
            };
            lines.push(format!("{}{}", INDENT, call));
            intake_running = wp.intaking;
        }
        if wp.conveyor != conveyor_running {
            let call = if wp.conveyor {
                "mech.conveyorUp();"
            } else {
                "mech.conveyorStop();"
            };
            lines.push(format!("{}{}", INDENT, call));
            conveyor_running = wp.conveyor;
        }

        match wp.motion_type {
            MotionType::Start => {
                lines.push(format!(
                    "{}chassis.setPose({}, {}, {});",
                    INDENT,
                    format_number(wp.x),
                    format_number(wp.y),
                    format_number(headings[i])
                ));
            }
            MotionType::MoveToPose => {
                if wp.reverse {
                    lines.push(format!(
                        "{}chassis.moveToPose({}, {}, {}, {{.forwards = false}});",
                        INDENT,
                        format_number(wp.x),
                        format_number(wp.y),
                        format_number(headings[i])
                    ));
                } else {
                    lines.push(format!(
                        "{}chassis.moveToPose({}, {}, {});",
                        INDENT,
                        format_number(wp.x),
                        format_number(wp.y),
                        format_number(headings[i])
                    ));
                }
            }
            MotionType::MoveVertical => {
                // 距离取自上一个路径点，倒车为负值
                let distance = if i > 0 {
                    let prev = &path.waypoints[i - 1];
                    calculate_distance(Point::new(prev.x, prev.y), Point::new(wp.x, wp.y))
                } else {
                    0.0
                };
                let signed = if wp.reverse { -distance } else { distance };
                lines.push(format!(
                    "{}chassis.moveVertical({});",
                    INDENT,
                    format_number(signed)
                ));
            }
            MotionType::RotateTo => {
                lines.push(format!(
                    "{}chassis.rotateTo({});",
                    INDENT,
                    format_number(headings[i])
                ));
            }
        }

        for command_id in &wp.commands_after {
            let command = resolved.command(command_id).ok_or_else(|| {
                ConfigError::UnknownCommand {
                    id: command_id.clone(),
                }
            })?;
            lines.push(format!("{}{}", INDENT, command.generate_code(None)));
        }
    }

    // 路线结束时停掉仍在运行的机构
    if intake_running {
        lines.push(format!("{}mech.intakeStop();", INDENT));
    }
    if conveyor_running {
        lines.push(format!("{}mech.conveyorStop();", INDENT));
    }

    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

/// 计算每个路径点导出时实际使用的朝向
///
/// 自动模式取指向下一个路径点的方向；最后一个点沿用到达方向；
/// 手动模式取用户角度并归一化到 0-360。
fn resolve_headings(waypoints: &[Waypoint]) -> Vec<f64> {
    let n = waypoints.len();
    let mut headings = vec![0.0; n];

    for i in 0..n {
        let wp = &waypoints[i];
        headings[i] = if wp.heading_mode == HeadingMode::Manual {
            normalize_angle(wp.heading.unwrap_or(0.0))
        } else if i + 1 < n {
            let next = &waypoints[i + 1];
            calculate_heading(Point::new(wp.x, wp.y), Point::new(next.x, next.y))
        } else if i > 0 {
            let prev = &waypoints[i - 1];
            calculate_heading(Point::new(prev.x, prev.y), Point::new(wp.x, wp.y))
        } else {
            0.0
        };
    }

    headings
}

/// 把路线名转成合法的 C++ 函数名
///
/// 小写化，非字母数字的连续片段折叠成单个下划线；
/// 以数字开头或为空时加 "path_" 前缀。
fn sanitize_function_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());

    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
        } else if !result.ends_with('_') {
            result.push('_');
        }
    }
    let result = result.trim_matches('_').to_string();

    if result.is_empty() {
        "path_unnamed".to_string()
    } else if result.starts_with(|c: char| c.is_ascii_digit()) {
        format!("path_{}", result)
    } else {
        result
    }
}

/// 坐标和角度统一保留一位小数
fn format_number(value: f64) -> String {
    format!("{:.1}", value)
}
