//! UI 面板系统模块
//!
//! 分层的面板生命周期框架：按需打开、缓存、分层和关闭铺满屏幕的
//! UI 面板，面板内容异步加载，同一类型最多只有一个活动实例。
//!
//! - `define`: 面板类型、层级与静态注册表
//! - `panel`: 面板基础契约（状态机 + 行为钩子）
//! - `layer`: 层级容器与排序计数器
//! - `loader`: 资源提供者接口与内置工厂表实现
//! - `manager`: 面板管理器（生命周期的唯一权威）
//! - `panels`: 具体面板的视图绑定叶子

pub mod define;
pub mod layer;
pub mod loader;
pub mod manager;
pub mod panel;
pub mod panels;

pub use define::{Layer, PanelInfo, PanelRegistry, PanelType};
pub use layer::{LayerNode, LayerSet};
pub use loader::{LoadHandle, LoadStatus, PanelResource, PrefabLibrary, ResourceProvider};
pub use manager::{OpenCallback, PanelCommand, PanelCommands, PanelManager};
pub use panel::{Panel, PanelBehavior, PanelData, PanelEvent, PanelHandle};
