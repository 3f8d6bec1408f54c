//! UI 面板定义模块
//!
//! 定义面板类型、渲染层级和面板注册表。
//! 注册表是进程启动时构建的静态配置，构建完成后不再变更。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::error::{RegistryError, Result};

/// UI 面板类型枚举
///
/// `None` 是"无面板"哨兵，永远不允许被打开或注册。
/// 新增面板时在这里加一个变体，并在注册表中加一行对应配置。
///
/// # 派生特性
///
/// - `Hash`: 支持作为注册表和打开集合的键
/// - `Serialize, Deserialize`: 支持从配置文件中的 `[[panels]]` 行反序列化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelType {
    /// 哨兵值，表示"无面板"
    None,
    /// 主菜单
    MainMenu,
    /// 游戏内 HUD
    GameHud,
    /// 背包
    Inventory,
    /// 设置
    Settings,
    /// 对话框
    Dialog,
    /// 加载中
    Loading,
}

impl PanelType {
    /// 获取面板类型的名称
    ///
    /// 返回静态字符串切片，主要用于日志记录和调试。
    pub fn name(&self) -> &'static str {
        match self {
            PanelType::None => "None",
            PanelType::MainMenu => "MainMenu",
            PanelType::GameHud => "GameHud",
            PanelType::Inventory => "Inventory",
            PanelType::Settings => "Settings",
            PanelType::Dialog => "Dialog",
            PanelType::Loading => "Loading",
        }
    }
}

/// UI 面板层级
///
/// 层级同时决定面板挂接到哪个容器节点，以及该层排序序号的数值下限。
/// 每层预留 100 个排序号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// 背景层 (0-99)
    Background,
    /// 普通层 (100-199)
    Normal,
    /// 顶层 (200-299)
    Top,
    /// 系统层 (300-399)
    System,
}

impl Layer {
    /// 层级的数值基准
    ///
    /// 该层排序计数器的种子值；同层内第一个面板拿到 base + 1。
    pub fn base(&self) -> i32 {
        match self {
            Layer::Background => 0,
            Layer::Normal => 100,
            Layer::Top => 200,
            Layer::System => 300,
        }
    }

    /// 获取层级名称
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Background => "Background",
            Layer::Normal => "Normal",
            Layer::Top => "Top",
            Layer::System => "System",
        }
    }

    /// 从数值基准反查层级
    ///
    /// 无法识别的数值回退到 `Normal` 层。
    pub fn from_base(base: i32) -> Layer {
        match base {
            0 => Layer::Background,
            100 => Layer::Normal,
            200 => Layer::Top,
            300 => Layer::System,
            _ => Layer::Normal,
        }
    }
}

/// 面板注册信息
///
/// 注册表中的一行：面板类型、资源路径、目标层级和关闭时是否销毁。
/// 注册完成后不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelInfo {
    /// 面板类型
    pub panel_type: PanelType,

    /// 资源路径（交给资源提供者加载）
    pub path: String,

    /// 目标层级
    pub layer: Layer,

    /// 关闭时是否销毁实例（销毁类型的面板不会进入实例缓存）
    #[serde(default)]
    pub destroy_on_close: bool,
}

impl PanelInfo {
    /// 创建注册信息
    pub fn new(
        panel_type: PanelType,
        path: impl Into<String>,
        layer: Layer,
        destroy_on_close: bool,
    ) -> Self {
        Self {
            panel_type,
            path: path.into(),
            layer,
            destroy_on_close,
        }
    }
}

/// 面板注册表
///
/// `PanelType` 到 `PanelInfo` 的静态映射，进程启动时构建一次。
/// 不支持热更新。
#[derive(Debug)]
pub struct PanelRegistry {
    entries: HashMap<PanelType, PanelInfo>,
}

impl PanelRegistry {
    /// 从注册信息列表构建注册表
    ///
    /// # 返回值
    ///
    /// - `None` 类型的行返回 `RegistryError::ReservedType`
    /// - 同一类型出现多行返回 `RegistryError::DuplicateEntry`
    pub fn from_entries(rows: impl IntoIterator<Item = PanelInfo>) -> Result<Self> {
        let mut entries = HashMap::new();
        for info in rows {
            if info.panel_type == PanelType::None {
                return Err(RegistryError::ReservedType.into());
            }
            let key = info.panel_type;
            if entries.contains_key(&key) {
                return Err(RegistryError::DuplicateEntry(key).into());
            }
            entries.insert(key, info);
        }
        Ok(Self { entries })
    }

    /// 内置注册表
    ///
    /// 与配置文件无关的默认面板配置。
    pub fn builtin() -> Self {
        let rows = [
            PanelInfo::new(PanelType::MainMenu, "ui/panels/main_menu", Layer::Normal, false),
            PanelInfo::new(PanelType::GameHud, "ui/panels/game_hud", Layer::Normal, false),
            PanelInfo::new(PanelType::Inventory, "ui/panels/inventory", Layer::Top, false),
            PanelInfo::new(PanelType::Settings, "ui/panels/settings", Layer::Top, false),
            PanelInfo::new(PanelType::Dialog, "ui/panels/dialog", Layer::System, true),
            PanelInfo::new(PanelType::Loading, "ui/panels/loading", Layer::System, false),
        ];
        Self::from_entries(rows).expect("builtin registry rows are valid")
    }

    /// 查询注册信息
    pub fn get(&self, panel_type: PanelType) -> Option<&PanelInfo> {
        self.entries.get(&panel_type)
    }

    /// 类型是否已注册
    pub fn contains(&self, panel_type: PanelType) -> bool {
        self.entries.contains_key(&panel_type)
    }

    /// 注册的面板数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_bases() {
        assert_eq!(Layer::Background.base(), 0);
        assert_eq!(Layer::Normal.base(), 100);
        assert_eq!(Layer::Top.base(), 200);
        assert_eq!(Layer::System.base(), 300);
    }

    #[test]
    fn test_layer_from_base_fallback() {
        assert_eq!(Layer::from_base(300), Layer::System);
        assert_eq!(Layer::from_base(42), Layer::Normal);
        assert_eq!(Layer::from_base(-1), Layer::Normal);
    }

    #[test]
    fn test_builtin_registry() {
        let registry = PanelRegistry::builtin();
        assert_eq!(registry.len(), 6);

        let dialog = registry.get(PanelType::Dialog).unwrap();
        assert_eq!(dialog.layer, Layer::System);
        assert!(dialog.destroy_on_close);

        let menu = registry.get(PanelType::MainMenu).unwrap();
        assert_eq!(menu.layer, Layer::Normal);
        assert!(!menu.destroy_on_close);

        assert!(!registry.contains(PanelType::None));
    }

    #[test]
    fn test_registry_rejects_none() {
        let rows = [PanelInfo::new(PanelType::None, "ui/panels/none", Layer::Normal, false)];
        assert!(PanelRegistry::from_entries(rows).is_err());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let rows = [
            PanelInfo::new(PanelType::Dialog, "ui/panels/dialog", Layer::System, true),
            PanelInfo::new(PanelType::Dialog, "ui/panels/dialog_v2", Layer::Top, false),
        ];
        let err = PanelRegistry::from_entries(rows).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_panel_type_serde_names() {
        let toml = "panel_type = \"main_menu\"\npath = \"ui/panels/main_menu\"\nlayer = \"normal\"\n";
        let info: PanelInfo = toml::from_str(toml).unwrap();
        assert_eq!(info.panel_type, PanelType::MainMenu);
        assert_eq!(info.layer, Layer::Normal);
        assert!(!info.destroy_on_close);
    }
}
