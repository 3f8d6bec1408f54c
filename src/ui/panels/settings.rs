//! 设置面板

use std::any::Any;

use tracing::debug;

use crate::ui::define::PanelType;
use crate::ui::manager::PanelCommands;
use crate::ui::panel::PanelBehavior;

/// 设置数据
#[derive(Debug, Clone, Copy)]
pub struct SettingsData {
    pub volume: f32,
    pub fullscreen: bool,
}

/// 设置面板行为
///
/// 音量和全屏开关的视图绑定；设置的持久化由面板自己负责，
/// 不经过管理器。
pub struct SettingsBehavior {
    commands: PanelCommands,

    volume: f32,
    fullscreen: bool,
}

impl SettingsBehavior {
    /// 创建设置行为
    pub fn new(commands: PanelCommands) -> Self {
        Self {
            commands,
            volume: 1.0,
            fullscreen: false,
        }
    }

    /// 当前音量 (0-1)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// 是否全屏
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// 调整音量，超出范围的值收拢到 0-1
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// 切换全屏
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// 重置为默认值
    pub fn reset(&mut self) {
        self.volume = 1.0;
        self.fullscreen = false;
    }

    /// 关闭设置面板
    pub fn request_close(&self) {
        self.commands.close(PanelType::Settings);
    }
}

impl PanelBehavior for SettingsBehavior {
    fn name(&self) -> &str {
        "Settings"
    }

    fn on_open(&mut self, data: Option<&mut dyn Any>) {
        if let Some(settings) = data.and_then(|d| d.downcast_ref::<SettingsData>()) {
            self.volume = settings.volume.clamp(0.0, 1.0);
            self.fullscreen = settings.fullscreen;
        }
    }

    fn on_close(&mut self) {
        // 关闭时落盘由面板自理
        debug!(volume = self.volume, fullscreen = self.fullscreen, "Settings saved");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
