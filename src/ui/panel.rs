//! 面板基础契约
//!
//! `Panel` 是所有面板共享的状态机：`initialized` 单向置位一次，
//! `showing` 随打开/关闭往返多次。具体面板通过 `PanelBehavior`
//! 挂接自己的视图绑定逻辑，不使用继承。
//!
//! 打开/关闭通知通过管理器持有的通道投递，面板销毁时断开发送端，
//! 不会留下悬空的监听者。

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use tracing::{trace, warn};

use super::define::{Layer, PanelType};

/// 传递给面板的不透明数据
///
/// 数据的具体形状由各面板约定并在 `on_open` 中自行校验（downcast），
/// 管理器不关心其内容。
pub type PanelData = Box<dyn Any>;

/// 面板生命周期通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// 面板已打开
    Opened(PanelType),
    /// 面板已关闭
    Closed(PanelType),
}

/// 面板行为接口
///
/// 具体面板实现此 trait 挂接生命周期钩子。所有钩子都必须同步完成，
/// 并且不向外抛出 panic；缺失的视图引用应静默降级而不是中断流程。
///
/// `as_any` / `as_any_mut` 供调用方取回具体行为类型（按类型向下转换）。
pub trait PanelBehavior: Any {
    /// 行为名称，用于日志
    fn name(&self) -> &str;

    /// 初始化钩子，整个生命周期只会被调用一次
    fn on_init(&mut self) {}

    /// 打开钩子，`data` 为调用方传入的面板专属数据
    fn on_open(&mut self, _data: Option<&mut dyn Any>) {}

    /// 关闭钩子
    fn on_close(&mut self) {}

    /// 销毁钩子
    fn on_destroy(&mut self) {}

    /// 向下转换支持
    fn as_any(&self) -> &dyn Any;

    /// 向下转换支持（可变）
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// 共享面板句柄
///
/// 打开集合、实例缓存和调用方共享同一个实例；整个框架运行在单一
/// 逻辑线程上，因此使用 `Rc<RefCell<_>>` 而不是锁。
pub type PanelHandle = Rc<RefCell<Panel>>;

/// UI 面板
///
/// 持有身份（类型与层级）、状态机标志、排序序号和行为对象。
pub struct Panel {
    /// 面板类型，由管理器在绑定阶段写入
    pub panel_type: PanelType,

    /// 所属层级，由管理器在绑定阶段写入
    pub layer: Layer,

    initialized: bool,
    showing: bool,
    visible: bool,
    destroyed: bool,
    sorting_order: i32,

    behavior: Box<dyn PanelBehavior>,
    events: Option<Sender<PanelEvent>>,
}

impl Panel {
    /// 创建面板
    ///
    /// 新面板尚未绑定类型与层级（`None` / `Normal`），由管理器在
    /// 加载完成后写入。
    pub fn new(behavior: Box<dyn PanelBehavior>) -> Self {
        Self {
            panel_type: PanelType::None,
            layer: Layer::Normal,
            initialized: false,
            showing: false,
            visible: false,
            destroyed: false,
            sorting_order: 0,
            behavior,
            events: None,
        }
    }

    /// 包装为共享句柄
    pub fn into_handle(self) -> PanelHandle {
        Rc::new(RefCell::new(self))
    }

    /// 初始化面板（只会执行一次）
    ///
    /// 幂等：重复调用是空操作。
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.behavior.on_init();
        trace!(panel = self.behavior.name(), "Panel initialized");
    }

    /// 打开面板
    ///
    /// 已经在显示时是空操作。顺序：初始化（如有必要）→ 置位 showing →
    /// 可见 → `on_open` 钩子 → 投递 `Opened` 通知。
    pub fn open(&mut self, mut data: Option<PanelData>) {
        if self.showing {
            return;
        }
        if self.destroyed {
            warn!(panel = self.behavior.name(), "Cannot open a destroyed panel");
            return;
        }

        self.init();
        self.showing = true;
        self.visible = true;

        self.behavior.on_open(data.as_deref_mut());
        self.emit(PanelEvent::Opened(self.panel_type));
    }

    /// 关闭面板
    ///
    /// 未在显示时是空操作。`Closed` 通知必须在面板隐藏之前投递，
    /// 监听者（管理器）在清理阶段仍然可以查询面板信息。
    pub fn close(&mut self) {
        if !self.showing {
            return;
        }
        self.showing = false;

        self.behavior.on_close();
        self.emit(PanelEvent::Closed(self.panel_type));

        self.visible = false;
    }

    /// 销毁面板
    ///
    /// 终结状态：断开通知发送端，此后 open/close 均为空操作。
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.behavior.on_destroy();
        self.events = None;
        self.visible = false;
        self.showing = false;
        self.destroyed = true;
        trace!(panel = self.behavior.name(), "Panel destroyed");
    }

    /// 设置排序序号
    ///
    /// 幂等，可以用不同的值反复调用。
    pub fn set_sorting_order(&mut self, order: i32) {
        self.sorting_order = order;
    }

    /// 当前排序序号
    pub fn sorting_order(&self) -> i32 {
        self.sorting_order
    }

    /// 是否已初始化
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 是否正在显示
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// 视觉表现是否可见
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// 是否已销毁
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// 接入通知通道
    ///
    /// 由管理器在绑定阶段调用，发送端在 `destroy` 时断开。
    pub fn connect_events(&mut self, sender: Sender<PanelEvent>) {
        self.events = Some(sender);
    }

    /// 行为名称
    pub fn behavior_name(&self) -> &str {
        self.behavior.name()
    }

    /// 取回具体行为类型
    pub fn behavior<T: PanelBehavior>(&self) -> Option<&T> {
        self.behavior.as_any().downcast_ref::<T>()
    }

    /// 取回具体行为类型（可变）
    pub fn behavior_mut<T: PanelBehavior>(&mut self) -> Option<&mut T> {
        self.behavior.as_any_mut().downcast_mut::<T>()
    }

    fn emit(&self, event: PanelEvent) {
        if let Some(sender) = &self.events {
            // 接收端关闭时丢弃通知即可
            let _ = sender.send(event);
        }
    }
}
