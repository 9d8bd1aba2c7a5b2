/*!
 * 代码导出模块
 */

pub mod cpp;

pub use cpp::{export_function, export_path};
