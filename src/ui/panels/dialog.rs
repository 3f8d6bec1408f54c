//! 对话框面板

use std::any::Any;

use tracing::debug;

use crate::ui::define::PanelType;
use crate::ui::manager::PanelCommands;
use crate::ui::panel::PanelBehavior;

/// 对话框按钮回调（一次性）
pub type DialogCallback = Box<dyn FnOnce()>;

/// 对话框数据
///
/// 回调是一次性的，对话框在 `on_open` 中把它们取走。
pub struct DialogData {
    pub title: String,
    pub message: String,
    pub show_confirm_button: bool,
    pub show_cancel_button: bool,
    pub show_close_button: bool,
    pub confirm_button_text: String,
    pub cancel_button_text: String,
    pub on_confirm: Option<DialogCallback>,
    pub on_cancel: Option<DialogCallback>,
}

impl Default for DialogData {
    fn default() -> Self {
        Self {
            title: "提示".to_string(),
            message: String::new(),
            show_confirm_button: true,
            show_cancel_button: false,
            show_close_button: true,
            confirm_button_text: "确定".to_string(),
            cancel_button_text: "取消".to_string(),
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl DialogData {
    /// 简单消息对话框：只有确认按钮
    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            show_close_button: false,
            ..Self::default()
        }
    }

    /// 确认对话框：确认加取消
    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            show_cancel_button: true,
            show_close_button: false,
            ..Self::default()
        }
    }

    /// 设置确认回调
    pub fn with_on_confirm(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_confirm = Some(Box::new(callback));
        self
    }

    /// 设置取消回调
    pub fn with_on_cancel(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }
}

/// 对话框面板行为
pub struct DialogBehavior {
    commands: PanelCommands,

    title: String,
    message: String,
    show_confirm_button: bool,
    show_cancel_button: bool,
    show_close_button: bool,
    confirm_button_text: String,
    cancel_button_text: String,

    on_confirm: Option<DialogCallback>,
    on_cancel: Option<DialogCallback>,
}

impl DialogBehavior {
    /// 创建对话框行为
    pub fn new(commands: PanelCommands) -> Self {
        Self {
            commands,
            title: String::new(),
            message: String::new(),
            show_confirm_button: true,
            show_cancel_button: false,
            show_close_button: true,
            confirm_button_text: String::new(),
            cancel_button_text: String::new(),
            on_confirm: None,
            on_cancel: None,
        }
    }

    /// 对话框标题
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 对话框内容
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 确认按钮是否可见
    pub fn confirm_visible(&self) -> bool {
        self.show_confirm_button
    }

    /// 取消按钮是否可见
    pub fn cancel_visible(&self) -> bool {
        self.show_cancel_button
    }

    /// 关闭按钮是否可见
    pub fn close_visible(&self) -> bool {
        self.show_close_button
    }

    /// 确认按钮文本
    pub fn confirm_text(&self) -> &str {
        &self.confirm_button_text
    }

    /// 取消按钮文本
    pub fn cancel_text(&self) -> &str {
        &self.cancel_button_text
    }

    /// 确认：触发回调并自关闭
    pub fn confirm(&mut self) {
        if let Some(callback) = self.on_confirm.take() {
            callback();
        }
        self.commands.close(PanelType::Dialog);
    }

    /// 取消：触发回调并自关闭
    pub fn cancel(&mut self) {
        if let Some(callback) = self.on_cancel.take() {
            callback();
        }
        self.commands.close(PanelType::Dialog);
    }

    /// 关闭按钮：直接自关闭
    pub fn request_close(&self) {
        self.commands.close(PanelType::Dialog);
    }

    fn bind(&mut self, data: &mut DialogData) {
        self.title = data.title.clone();
        self.message = data.message.clone();
        self.show_confirm_button = data.show_confirm_button;
        self.show_cancel_button = data.show_cancel_button;
        self.show_close_button = data.show_close_button;
        self.confirm_button_text = data.confirm_button_text.clone();
        self.cancel_button_text = data.cancel_button_text.clone();
        self.on_confirm = data.on_confirm.take();
        self.on_cancel = data.on_cancel.take();
    }
}

impl PanelBehavior for DialogBehavior {
    fn name(&self) -> &str {
        "Dialog"
    }

    fn on_open(&mut self, data: Option<&mut dyn Any>) {
        match data.and_then(|d| d.downcast_mut::<DialogData>()) {
            Some(dialog_data) => self.bind(dialog_data),
            None => debug!("Dialog opened without dialog data"),
        }
    }

    fn on_close(&mut self) {
        // 丢弃未消费的回调
        self.on_confirm = None;
        self.on_cancel = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::define::{Layer, PanelInfo, PanelRegistry};
    use crate::ui::loader::PrefabLibrary;
    use crate::ui::manager::PanelManager;
    use crate::ui::panel::Panel;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_dialog_binds_data() {
        let mut behavior = DialogBehavior::new(PanelCommands::new());

        let mut data: Box<dyn Any> = Box::new(DialogData::confirm("退出", "确定要退出吗？"));
        behavior.on_open(Some(data.as_mut()));

        assert_eq!(behavior.title(), "退出");
        assert_eq!(behavior.message(), "确定要退出吗？");
        assert!(behavior.confirm_visible());
        assert!(behavior.cancel_visible());
        assert!(!behavior.close_visible());
        assert_eq!(behavior.confirm_text(), "确定");
        assert_eq!(behavior.cancel_text(), "取消");
    }

    #[test]
    fn test_confirm_fires_callback_once() {
        let mut behavior = DialogBehavior::new(PanelCommands::new());

        let confirmed = Rc::new(Cell::new(0));
        let counter = confirmed.clone();
        let mut data: Box<dyn Any> = Box::new(
            DialogData::message("提示", "保存完成").with_on_confirm(move || {
                counter.set(counter.get() + 1);
            }),
        );
        behavior.on_open(Some(data.as_mut()));

        behavior.confirm();
        behavior.confirm();
        assert_eq!(confirmed.get(), 1);
    }

    #[test]
    fn test_dialog_self_closes_through_commands() {
        let registry = PanelRegistry::from_entries([PanelInfo::new(
            PanelType::Dialog,
            "ui/panels/dialog",
            Layer::System,
            true,
        )])
        .unwrap();

        let commands = PanelCommands::new();
        let mut library = PrefabLibrary::new();
        let factory_commands = commands.clone();
        library.register("ui/panels/dialog", move || {
            Box::new(Panel::new(Box::new(DialogBehavior::new(
                factory_commands.clone(),
            ))))
        });
        let mut manager = PanelManager::new(registry, Box::new(library), commands);

        manager.open_panel(PanelType::Dialog, None, None);
        for _ in 0..4 {
            manager.update();
        }
        assert!(manager.is_panel_opened(PanelType::Dialog));

        let dialog = manager.get_opened_panel(PanelType::Dialog).unwrap();
        dialog
            .borrow_mut()
            .behavior_mut::<DialogBehavior>()
            .unwrap()
            .confirm();
        manager.update();

        // 自关闭与程序化关闭走同一条清理路径；销毁类型的对话框被销毁
        assert!(!manager.is_panel_opened(PanelType::Dialog));
        assert!(dialog.borrow().is_destroyed());
    }

    #[test]
    fn test_close_drops_unconsumed_callbacks() {
        let mut behavior = DialogBehavior::new(PanelCommands::new());

        let confirmed = Rc::new(Cell::new(false));
        let flag = confirmed.clone();
        let mut data: Box<dyn Any> =
            Box::new(DialogData::message("提示", "内容").with_on_confirm(move || flag.set(true)));
        behavior.on_open(Some(data.as_mut()));

        behavior.on_close();
        behavior.confirm();
        assert!(!confirmed.get());
    }
}
