// 场地几何计算模块

pub mod bezier;
pub mod field;
pub mod heading;
pub mod point;

pub use bezier::{
    adaptive_decompose_quadratic, cubic_bezier, decompose_cubic_bezier,
    decompose_quadratic_bezier, estimate_curve_length, lerp, lerp_point, point_to_line_distance,
    quadratic_bezier, DEFAULT_MAX_SEGMENT_LENGTH, MAX_SEGMENTS, MIN_SEGMENTS,
};
pub use field::{
    is_on_field, FIELD_HALF_SIZE, FIELD_SIZE_INCHES, TILES_PER_SIDE, TILE_SIZE_INCHES,
};
pub use heading::{angle_difference, calculate_distance, calculate_heading, normalize_angle};
pub use point::Point;
