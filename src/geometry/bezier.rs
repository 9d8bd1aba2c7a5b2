/*!
 * 贝塞尔曲线计算与路径分解
 *
 * 为路径预览和长度估算提供曲线求值、分段与距离工具。
 */

use super::point::Point;

/// 自适应分解的目标段长（英寸）
pub const DEFAULT_MAX_SEGMENT_LENGTH: f64 = 6.0;

/// 自适应分解的最小段数
pub const MIN_SEGMENTS: usize = 3;

/// 自适应分解的最大段数
pub const MAX_SEGMENTS: usize = 20;

/// 两个数值间的线性插值
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// 两点间的线性插值
pub fn lerp_point(p1: Point, p2: Point, t: f64) -> Point {
    Point::new(lerp(p1.x, p2.x, t), lerp(p1.y, p2.y, t))
}

/// 二阶贝塞尔曲线上参数 t 处的点
///
/// B(t) = (1-t)²P0 + 2(1-t)tP1 + t²P2
pub fn quadratic_bezier(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let one_minus_t = 1.0 - t;
    p0 * (one_minus_t * one_minus_t) + p1 * (2.0 * one_minus_t * t) + p2 * (t * t)
}

/// 三阶贝塞尔曲线上参数 t 处的点
///
/// B(t) = (1-t)³P0 + 3(1-t)²tP1 + 3(1-t)t²P2 + t³P3
pub fn cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let one_minus_t = 1.0 - t;
    p0 * one_minus_t.powi(3)
        + p1 * (3.0 * one_minus_t.powi(2) * t)
        + p2 * (3.0 * one_minus_t * t.powi(2))
        + p3 * t.powi(3)
}

/// 将二阶贝塞尔曲线分解为折线段
///
/// 返回包含首尾点在内的 num_segments + 1 个点。
pub fn decompose_quadratic_bezier(
    p0: Point,
    p1: Point,
    p2: Point,
    num_segments: usize,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(num_segments + 1);
    for i in 0..=num_segments {
        let t = i as f64 / num_segments as f64;
        points.push(quadratic_bezier(p0, p1, p2, t));
    }
    points
}

/// 将三阶贝塞尔曲线分解为折线段
pub fn decompose_cubic_bezier(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    num_segments: usize,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(num_segments + 1);
    for i in 0..=num_segments {
        let t = i as f64 / num_segments as f64;
        points.push(cubic_bezier(p0, p1, p2, p3, t));
    }
    points
}

/// 按控制多边形长度自适应选择段数的二阶贝塞尔分解
///
/// 曲线越长分段越多，段数被限制在 [MIN_SEGMENTS, MAX_SEGMENTS] 内。
pub fn adaptive_decompose_quadratic(
    p0: Point,
    p1: Point,
    p2: Point,
    max_segment_length: f64,
) -> Vec<Point> {
    let rough_length = p0.distance_to(p1) + p1.distance_to(p2);

    let num_segments = (rough_length / max_segment_length) as usize;
    let num_segments = num_segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);

    decompose_quadratic_bezier(p0, p1, p2, num_segments)
}

/// 估算经过一串点的折线长度
pub fn estimate_curve_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .sum()
}

/// 点到线段的垂直距离
///
/// 投影点被限制在线段内，退化为单点的线段返回到端点的距离。
pub fn point_to_line_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len_sq = line_vec.x.powi(2) + line_vec.y.powi(2);

    if line_len_sq == 0.0 {
        return point.distance_to(line_start);
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len_sq).clamp(0.0, 1.0);

    let projection = Point::new(line_start.x + t * line_vec.x, line_start.y + t * line_vec.y);
    point.distance_to(projection)
}
