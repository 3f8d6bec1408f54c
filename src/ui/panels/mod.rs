//! 面板叶子模块
//!
//! 具体面板的行为实现，全部是简单的视图绑定：校验各自的数据载荷、
//! 维护展示字段，并把打开/关闭意图推进请求队列。

mod dialog;
mod game_hud;
mod loading;
mod main_menu;
mod settings;

pub use dialog::{DialogBehavior, DialogCallback, DialogData};
pub use game_hud::{GameHudBehavior, GameHudData};
pub use loading::{LoadingBehavior, LoadingData};
pub use main_menu::MainMenuBehavior;
pub use settings::{SettingsBehavior, SettingsData};
