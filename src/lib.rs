//! UIFrame - 分层 UI 面板生命周期框架
//!
//! UIFrame 按需打开、缓存、分层和关闭铺满屏幕的 UI 面板：面板内容
//! 异步加载，同一类型最多只有一个活动实例。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `ui`: 面板系统（管理器、面板契约、层级、资源加载、面板叶子）
//!
//! # 使用示例
//!
//! ```no_run
//! use ui_frame::ui::{PanelCommands, PanelManager, PanelRegistry, PanelType, PrefabLibrary};
//!
//! let commands = PanelCommands::new();
//! let provider = PrefabLibrary::new();
//! let mut manager = PanelManager::new(PanelRegistry::builtin(), Box::new(provider), commands);
//!
//! // 发起打开请求后由 update 驱动异步加载
//! manager.open_panel(PanelType::MainMenu, None, None);
//! manager.update();
//! ```

pub mod core;
pub mod ui;
