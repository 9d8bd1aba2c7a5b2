/*!
 * 路径核心数据模型
 *
 * - Waypoint: 带位置、朝向和命令的单个路径点
 * - RoutePath: 由路径点序列构成的一条自动赛路线
 * - Project: 包含多条路线的项目
 *
 * 枚举序列化值与 .shupaths 文件格式保持一致。
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 机器人到达路径点的运动方式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MotionType {
    /// 第一个路径点，仅设置初始位姿
    Start,

    /// 导航到 (x, y) 并转到指定朝向
    #[default]
    MoveToPose,

    /// 沿当前朝向直线前进/后退
    MoveVertical,

    /// 原地旋转到指定朝向
    RotateTo,
}

impl MotionType {
    /// 序列化格式中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionType::Start => "start",
            MotionType::MoveToPose => "moveToPose",
            MotionType::MoveVertical => "moveVertical",
            MotionType::RotateTo => "rotateTo",
        }
    }
}

/// 路径点朝向的确定方式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeadingMode {
    /// 由指向下一个路径点的方向自动计算
    #[default]
    Auto,

    /// 用户手动指定角度
    Manual,
}

/// 自动赛使用的场地半区
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// 左半场 (x <= 0)
    #[default]
    Left,

    /// 右半场 (x >= 0)
    Right,

    /// 全场（技能赛）
    Full,
}

impl Side {
    /// 序列化格式中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Full => "full",
        }
    }
}

/// 联盟颜色
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    #[default]
    Red,
    Blue,
}

impl Alliance {
    /// 序列化格式中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Alliance::Red => "red",
            Alliance::Blue => "blue",
        }
    }
}

/// 自动赛路径中的单个路径点
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    /// X 坐标（英寸）
    pub x: f64,

    /// Y 坐标（英寸）
    pub y: f64,

    /// 朝向角度（度），None 表示自动计算
    #[serde(default)]
    pub heading: Option<f64>,

    /// 朝向确定方式
    #[serde(default)]
    pub heading_mode: HeadingMode,

    /// 运动方式
    #[serde(default)]
    pub motion_type: MotionType,

    /// 倒车行驶
    #[serde(default)]
    pub reverse: bool,

    /// 移动时运行吸入机构
    #[serde(default)]
    pub intaking: bool,

    /// 移动时运行传送带
    #[serde(default)]
    pub conveyor: bool,

    /// 到达后执行的命令 ID 列表
    #[serde(default)]
    pub commands_after: Vec<String>,
}

impl Waypoint {
    /// 创建一个使用默认运动方式的路径点
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            heading: None,
            heading_mode: HeadingMode::default(),
            motion_type: MotionType::default(),
            reverse: false,
            intaking: false,
            conveyor: false,
            commands_after: Vec::new(),
        }
    }
}

/// 一条完整的自动赛路线
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePath {
    /// 路线名称
    pub name: String,

    /// 联盟颜色
    #[serde(default)]
    pub alliance: Alliance,

    /// 场地半区
    #[serde(default)]
    pub side: Side,

    /// 路径点序列
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl RoutePath {
    /// 创建一条空路线
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alliance: Alliance::default(),
            side: Side::default(),
            waypoints: Vec::new(),
        }
    }

    /// 追加一个路径点并返回其索引
    ///
    /// 第一个路径点的运动方式为 Start，其余为 MoveToPose。
    pub fn add_waypoint(&mut self, x: f64, y: f64) -> usize {
        let mut wp = Waypoint::new(x, y);
        wp.motion_type = if self.waypoints.is_empty() {
            MotionType::Start
        } else {
            MotionType::MoveToPose
        };
        self.waypoints.push(wp);
        self.waypoints.len() - 1
    }

    /// 删除指定索引的路径点，越界时不做任何事
    ///
    /// 删除第一个路径点后，新的首个路径点被重置为 Start。
    pub fn remove_waypoint(&mut self, index: usize) {
        if index >= self.waypoints.len() {
            return;
        }

        self.waypoints.remove(index);
        if index == 0 {
            if let Some(first) = self.waypoints.first_mut() {
                first.motion_type = MotionType::Start;
            }
        }
    }

    /// 检查坐标是否落在本路线允许的半区内
    pub fn is_valid_position(&self, x: f64, _y: f64) -> bool {
        match self.side {
            Side::Full => true,
            Side::Left => x <= 0.0,
            Side::Right => x >= 0.0,
        }
    }
}

/// 包含多条路线的项目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// 赛季标识（seasons/ 下的目录名）
    #[serde(default = "default_season")]
    pub season: String,

    /// 创建时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// 最后修改时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    /// 路线列表
    #[serde(default)]
    pub paths: Vec<RoutePath>,
}

impl Project {
    /// 创建一个不含路线的项目
    pub fn new(season: impl Into<String>) -> Self {
        Self {
            season: season.into(),
            created: None,
            modified: None,
            paths: Vec::new(),
        }
    }

    /// 添加一条空路线并返回其索引
    pub fn add_path(&mut self, name: impl Into<String>) -> usize {
        self.paths.push(RoutePath::new(name));
        self.paths.len() - 1
    }

    /// 删除指定索引的路线，越界时不做任何事
    pub fn remove_path(&mut self, index: usize) {
        if index < self.paths.len() {
            self.paths.remove(index);
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(default_season())
    }
}

fn default_season() -> String {
    "pushback_2026".to_string()
}
