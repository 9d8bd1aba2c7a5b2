/*!
 * 场地常量与坐标约定
 *
 * 场地坐标系（shulib 约定）：
 * - 原点在场地中心 (0, 0)
 * - X: -72 到 +72 英寸，正方向为右
 * - Y: -72 到 +72 英寸，正方向为前
 * - 朝向: 0° 指向 +Y，顺时针为正
 */

/// 场地边长（12 英尺）
pub const FIELD_SIZE_INCHES: f64 = 144.0;

/// 场地中心到边缘的距离
pub const FIELD_HALF_SIZE: f64 = 72.0;

/// 单块地垫边长（2 英尺）
pub const TILE_SIZE_INCHES: f64 = 24.0;

/// 每边地垫数量
pub const TILES_PER_SIDE: u32 = 6;

/// 检查坐标是否在场地范围内
pub fn is_on_field(x: f64, y: f64) -> bool {
    x.abs() <= FIELD_HALF_SIZE && y.abs() <= FIELD_HALF_SIZE
}
