//! 配置管理模块
//!
//! 提供框架配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! log_file = "ui_frame.log"
//!
//! [ui]
//! initial_panel = "main_menu"
//! open_initial = true
//! load_latency_frames = 1
//!
//! [[panels]]
//! panel_type = "dialog"
//! path = "ui/panels/dialog"
//! layer = "system"
//! destroy_on_close = true
//! ```
//!
//! `[[panels]]` 行就是面板注册表的输入；不配置时使用内置注册表。
//! 注册表在进程启动时构建一次，不支持热更新。

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::ui::define::{PanelInfo, PanelRegistry, PanelType};

/// 框架配置
///
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// UI 启动配置
    #[serde(default)]
    pub ui: UiConfig,

    /// 面板注册表行（为空时使用内置注册表）
    #[serde(default)]
    pub panels: Vec<PanelInfo>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// UI 启动配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// 启动时自动打开的面板
    #[serde(default = "default_initial_panel")]
    pub initial_panel: PanelType,

    /// 是否自动打开初始面板
    #[serde(default = "default_open_initial")]
    pub open_initial: bool,

    /// 资源提供者的模拟加载延迟（帧）
    #[serde(default = "default_load_latency")]
    pub load_latency_frames: u32,
}

// 默认值函数
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "ui_frame.log".to_string() }
fn default_initial_panel() -> PanelType { PanelType::MainMenu }
fn default_open_initial() -> bool { true }
fn default_load_latency() -> u32 { 1 }

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
            panels: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            initial_panel: default_initial_panel(),
            open_initial: default_open_initial(),
            load_latency_frames: default_load_latency(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--verbose`: 日志级别调到 debug
    /// - `--log-file <path>`: 开启文件输出并指定路径
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--verbose") {
            self.logging.level = LogLevel::Debug;
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-file") {
            if let Some(path) = args.get(idx + 1) {
                self.logging.file_output = true;
                self.logging.log_file = path.clone();
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.ui.open_initial && self.ui.initial_panel == PanelType::None {
            return Err(ConfigError::InvalidValue {
                field: "ui.initial_panel".to_string(),
                reason: "Initial panel cannot be None when open_initial is set".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// 构建面板注册表
    ///
    /// `[[panels]]` 行非空时按配置构建，否则使用内置注册表。
    /// 配置中的 None 行或重复行在这里报错。
    pub fn registry(&self) -> Result<PanelRegistry> {
        if self.panels.is_empty() {
            return Ok(PanelRegistry::builtin());
        }
        PanelRegistry::from_entries(self.panels.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::define::Layer;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(!config.logging.file_output);
        assert_eq!(config.ui.initial_panel, PanelType::MainMenu);
        assert!(config.ui.open_initial);
        assert!(config.panels.is_empty());
    }

    #[test]
    fn test_default_registry_is_builtin() {
        let registry = Config::default().registry().unwrap();
        assert_eq!(registry.len(), 6);
        assert!(registry.contains(PanelType::Dialog));
    }

    #[test]
    fn test_parse_config_with_panels() {
        let toml = r#"
            [logging]
            level = "debug"

            [ui]
            initial_panel = "loading"
            load_latency_frames = 3

            [[panels]]
            panel_type = "loading"
            path = "ui/panels/loading"
            layer = "system"

            [[panels]]
            panel_type = "dialog"
            path = "ui/panels/dialog"
            layer = "system"
            destroy_on_close = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.ui.initial_panel, PanelType::Loading);
        assert_eq!(config.ui.load_latency_frames, 3);

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 2);
        let dialog = registry.get(PanelType::Dialog).unwrap();
        assert_eq!(dialog.layer, Layer::System);
        assert!(dialog.destroy_on_close);
        assert!(!registry.contains(PanelType::MainMenu));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.ui.initial_panel = PanelType::None;
        assert!(config.validate().is_err());

        config.ui.open_initial = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["--verbose", "--log-file", "logs/ui.log"]);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.file_output);
        assert_eq!(config.logging.log_file, "logs/ui.log");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_from_file_or_default_missing_file() {
        let config = Config::from_file_or_default("definitely/not/here.toml");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_save_and_reload() {
        let mut config = Config::default();
        config.logging.level = LogLevel::Debug;
        config.ui.open_initial = false;
        config.panels.push(PanelInfo::new(
            PanelType::Dialog,
            "ui/panels/dialog",
            Layer::System,
            true,
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        config.save_to_file(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.logging.level, LogLevel::Debug);
        assert!(!reloaded.ui.open_initial);
        assert_eq!(reloaded.panels.len(), 1);
        assert!(reloaded.panels[0].destroy_on_close);
    }
}
