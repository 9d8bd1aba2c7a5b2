// 核心数据模型模块

pub mod commands;
pub mod route;

pub use commands::{CommandDefinition, CommandParameter, CommandSequence, ParameterKind};
pub use route::{Alliance, HeadingMode, MotionType, Project, RoutePath, Side, Waypoint};
