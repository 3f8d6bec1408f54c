//! 核心功能模块
//!
//! 本模块提供了 UI 框架的基础功能：日志系统、配置管理和错误处理。
//! 这些模块独立于面板系统本身，可以在框架的任何部分使用。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载框架设置和面板注册表
//! - `error`：错误处理，定义统一的错误类型

pub mod config;
pub mod error;
pub mod log;

// 重新导出常用类型，方便使用
pub use config::{Config, LogLevel, LoggingConfig, UiConfig};
pub use error::{Result, UiFrameError};
