/*!
 * 朝向角度计算
 *
 * 使用 shulib 角度约定：0° 指向 +Y（前方），90° 指向 +X（右方），
 * 顺时针为正。
 */

use super::point::Point;

/// 计算从一点指向另一点的朝向角度
///
/// 返回 0 到 360 度范围内的角度。
pub fn calculate_heading(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut angle = dx.atan2(dy).to_degrees();

    if angle < 0.0 {
        angle += 360.0;
    }

    angle
}

/// 计算两点间的距离（英寸）
pub fn calculate_distance(from: Point, to: Point) -> f64 {
    from.distance_to(to)
}

/// 将角度归一化到 0-360 范围
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle < 0.0 {
        angle += 360.0;
    }
    while angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

/// 计算两个角度间的最短角差
///
/// 返回 -180 到 180 范围内的值。
pub fn angle_difference(from_angle: f64, to_angle: f64) -> f64 {
    let mut diff = normalize_angle(to_angle) - normalize_angle(from_angle);
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    diff
}
