//! 错误处理模块
//!
//! 定义了 UI 框架中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! 面板生命周期内的失败（加载失败、重复打开等）按照约定只记录日志，
//! 不会作为错误向调用方传播；本模块的错误类型用于配置加载和注册表
//! 构建等启动阶段的失败。

use std::fmt;

use crate::ui::define::PanelType;

/// 框架统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, UiFrameError>;

/// UI 框架的错误类型
#[derive(Debug)]
pub enum UiFrameError {
    /// 配置错误
    Config(ConfigError),

    /// 面板注册表错误
    Registry(RegistryError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 面板注册表相关的错误
#[derive(Debug)]
pub enum RegistryError {
    /// 试图注册 None 哨兵类型
    ReservedType,

    /// 同一面板类型注册了多行
    DuplicateEntry(PanelType),

    /// 引用了未注册的面板类型
    UnknownType(PanelType),
}

impl fmt::Display for UiFrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiFrameError::Config(e) => write!(f, "Configuration error: {}", e),
            UiFrameError::Registry(e) => write!(f, "Panel registry error: {}", e),
            UiFrameError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::ReservedType => {
                write!(f, "PanelType::None is a sentinel and cannot be registered")
            }
            RegistryError::DuplicateEntry(panel_type) => {
                write!(f, "Duplicate registry entry for panel: {}", panel_type.name())
            }
            RegistryError::UnknownType(panel_type) => {
                write!(f, "Panel type is not registered: {}", panel_type.name())
            }
        }
    }
}

impl std::error::Error for UiFrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiFrameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for RegistryError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for UiFrameError {
    fn from(err: std::io::Error) -> Self {
        UiFrameError::Io(err)
    }
}

impl From<ConfigError> for UiFrameError {
    fn from(err: ConfigError) -> Self {
        UiFrameError::Config(err)
    }
}

impl From<RegistryError> for UiFrameError {
    fn from(err: RegistryError) -> Self {
        UiFrameError::Registry(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UiFrameError::Registry(RegistryError::DuplicateEntry(PanelType::Dialog));
        assert_eq!(
            err.to_string(),
            "Panel registry error: Duplicate registry entry for panel: Dialog"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: UiFrameError = ConfigError::FileNotFound("config.toml".to_string()).into();
        assert!(matches!(err, UiFrameError::Config(_)));
    }
}
