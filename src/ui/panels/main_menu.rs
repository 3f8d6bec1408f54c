//! 主菜单面板

use std::any::Any;

use tracing::debug;

use crate::ui::define::PanelType;
use crate::ui::manager::PanelCommands;
use crate::ui::panel::PanelBehavior;

/// 主菜单面板行为
pub struct MainMenuBehavior {
    commands: PanelCommands,
    exit_requested: bool,
}

impl MainMenuBehavior {
    /// 创建主菜单行为
    pub fn new(commands: PanelCommands) -> Self {
        Self {
            commands,
            exit_requested: false,
        }
    }

    /// 开始游戏：关闭主菜单，打开游戏 HUD
    pub fn start_game(&self) {
        self.commands.close(PanelType::MainMenu);
        self.commands.open(PanelType::GameHud);
    }

    /// 打开设置面板
    pub fn open_settings(&self) {
        self.commands.open(PanelType::Settings);
    }

    /// 请求退出
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// 是否已请求退出
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

impl PanelBehavior for MainMenuBehavior {
    fn name(&self) -> &str {
        "MainMenu"
    }

    fn on_open(&mut self, _data: Option<&mut dyn Any>) {
        debug!("Main menu panel opened");
    }

    fn on_close(&mut self) {
        debug!("Main menu panel closed");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
