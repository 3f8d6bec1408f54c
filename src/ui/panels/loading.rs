//! 加载面板

use std::any::Any;

use crate::ui::panel::PanelBehavior;

/// 加载数据
#[derive(Debug, Clone)]
pub struct LoadingData {
    pub message: String,
}

impl LoadingData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 加载面板行为
///
/// 进度条与提示文本的视图绑定。
pub struct LoadingBehavior {
    message: String,
    progress: f32,
    progress_text: String,
}

impl LoadingBehavior {
    /// 创建加载行为
    pub fn new() -> Self {
        Self {
            message: String::new(),
            progress: 0.0,
            progress_text: "0%".to_string(),
        }
    }

    /// 当前进度 (0-1)
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// 进度百分比文本
    pub fn progress_text(&self) -> &str {
        &self.progress_text
    }

    /// 提示文本
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 更新加载进度
    ///
    /// # 参数
    ///
    /// * `progress` - 进度 (0-1)，超出范围会被收拢
    /// * `message` - 进度消息，空字符串表示保持原文本
    pub fn update_progress(&mut self, progress: f32, message: &str) {
        self.progress = progress.clamp(0.0, 1.0);
        self.progress_text = format!("{}%", (self.progress * 100.0).round() as i32);
        if !message.is_empty() {
            self.message = message.to_string();
        }
    }
}

impl Default for LoadingBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelBehavior for LoadingBehavior {
    fn name(&self) -> &str {
        "Loading"
    }

    fn on_open(&mut self, data: Option<&mut dyn Any>) {
        self.message = match data.and_then(|d| d.downcast_ref::<LoadingData>()) {
            Some(loading) => loading.message.clone(),
            None => "Loading...".to_string(),
        };
    }

    fn on_close(&mut self) {
        self.progress = 0.0;
        self.progress_text = "0%".to_string();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
