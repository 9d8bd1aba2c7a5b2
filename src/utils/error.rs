/*!
 * 错误处理模块
 *
 * 基于 anyhow 的统一错误处理系统，遵循 Rust 应用程序最佳实践。
 * 提供简洁、一致的错误处理接口，通过 context 提供丰富的错误信息。
 */

use anyhow::Result as AnyhowResult;

/// 统一的应用程序结果类型
pub type AppResult<T> = AnyhowResult<T>;

/// 统一的应用程序错误类型
pub type AppError = anyhow::Error;
