//! 面板管理器
//!
//! 管理器是面板生命周期的唯一权威：哪个类型当前打开、实例缓存、
//! 层级挂接与排序序号都只由它写入。调用方通过公开操作发起请求，
//! 面板和外部只读取派生状态。
//!
//! 管理器由调用方显式构造并按引用传递（每个进程约定只建一个），
//! 资源提供者通过构造参数注入。面板叶子不持有管理器，它们把
//! 打开/关闭意图推进 `PanelCommands` 队列，由 `update` 统一消化。
//!
//! # 协作式异步
//!
//! `open_panel` 立即返回；加载中的请求挂在在途表里，`update` 轮询
//! 资源提供者并在完成时执行绑定与展示。同一类型在加载完成前的第二次
//! 打开请求会挂到已有的在途加载上，不会发起第二次加载。

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, error, warn};

use super::define::{PanelRegistry, PanelType};
use super::layer::LayerSet;
use super::loader::{LoadHandle, LoadStatus, PanelResource, ResourceProvider};
use super::panel::{Panel, PanelData, PanelEvent, PanelHandle};

/// 打开完成回调
pub type OpenCallback = Box<dyn FnOnce(PanelHandle)>;

/// 面板叶子发出的请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// 打开指定面板
    Open(PanelType),
    /// 关闭指定面板
    Close(PanelType),
    /// 关闭全部面板
    CloseAll,
}

/// 面板请求队列
///
/// 叶子持有队列的克隆，管理器在 `update` 中消化。队列本身不改动
/// 管理器状态，所有变更仍然只发生在管理器内部。
#[derive(Clone)]
pub struct PanelCommands {
    queue: Rc<RefCell<VecDeque<PanelCommand>>>,
}

impl PanelCommands {
    /// 创建空的请求队列
    ///
    /// 队列先于管理器创建，这样面板工厂在管理器构造之前就能拿到
    /// 它的克隆。
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// 请求打开面板
    pub fn open(&self, panel_type: PanelType) {
        self.queue.borrow_mut().push_back(PanelCommand::Open(panel_type));
    }

    /// 请求关闭面板
    pub fn close(&self, panel_type: PanelType) {
        self.queue.borrow_mut().push_back(PanelCommand::Close(panel_type));
    }

    /// 请求关闭全部面板
    pub fn close_all(&self) {
        self.queue.borrow_mut().push_back(PanelCommand::CloseAll);
    }

    fn take_all(&self) -> Vec<PanelCommand> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl Default for PanelCommands {
    fn default() -> Self {
        Self::new()
    }
}

/// 在途的异步打开请求
struct PendingOpen {
    handle: LoadHandle,
    data: Option<PanelData>,
    callbacks: Vec<OpenCallback>,
}

/// UI 面板管理器
pub struct PanelManager {
    registry: PanelRegistry,
    provider: Box<dyn ResourceProvider>,
    layers: LayerSet,

    /// 已打开的面板
    opened: HashMap<PanelType, PanelHandle>,

    /// 面板实例缓存（只缓存非销毁类型）
    cache: HashMap<PanelType, PanelHandle>,

    /// 在途加载表
    pending: HashMap<PanelType, PendingOpen>,

    events_tx: Sender<PanelEvent>,
    events_rx: Receiver<PanelEvent>,
    commands: PanelCommands,
}

impl PanelManager {
    /// 创建面板管理器
    ///
    /// 管理器由调用方显式构造，每个进程约定只建一个。
    ///
    /// # 参数
    ///
    /// * `registry` - 静态面板注册表
    /// * `provider` - 注入的资源提供者
    /// * `commands` - 请求队列（面板工厂通常已持有它的克隆）
    pub fn new(
        registry: PanelRegistry,
        provider: Box<dyn ResourceProvider>,
        commands: PanelCommands,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            registry,
            provider,
            layers: LayerSet::new(),
            opened: HashMap::new(),
            cache: HashMap::new(),
            pending: HashMap::new(),
            events_tx,
            events_rx,
            commands,
        }
    }

    /// 获取请求队列句柄
    ///
    /// 交给面板叶子或其他不直接持有管理器的调用方。
    pub fn commands(&self) -> PanelCommands {
        self.commands.clone()
    }

    /// 层级集合（只读）
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// 打开 UI 面板
    ///
    /// 立即返回；加载完成后在 `update` 中执行展示并调用 `on_complete`。
    /// 失败（None 类型、未注册、加载失败）只记录日志，`on_complete`
    /// 不会被调用。重复打开不算错误：已打开时直接用现有实例回调。
    ///
    /// # 参数
    ///
    /// * `panel_type` - 面板类型
    /// * `data` - 传递给面板的数据
    /// * `on_complete` - 打开完成回调
    pub fn open_panel(
        &mut self,
        panel_type: PanelType,
        data: Option<PanelData>,
        on_complete: Option<OpenCallback>,
    ) {
        if panel_type == PanelType::None {
            warn!("Cannot open panel of type None");
            return;
        }

        // 已经打开：用现有实例完成回调
        if let Some(existing) = self.opened.get(&panel_type) {
            warn!(panel = panel_type.name(), "Panel is already opened");
            if let Some(callback) = on_complete {
                callback(existing.clone());
            }
            return;
        }

        // 获取面板配置信息
        let Some(info) = self.registry.get(panel_type) else {
            error!(panel = panel_type.name(), "Panel info not found in registry");
            return;
        };
        let path = info.path.clone();

        // 同类型已有在途加载：挂到现有请求上，不再发起第二次加载
        if let Some(pending) = self.pending.get_mut(&panel_type) {
            debug!(panel = panel_type.name(), "Load already in flight, attaching");
            if data.is_some() {
                debug!(panel = panel_type.name(), "Dropping payload of a joined open request");
            }
            if let Some(callback) = on_complete {
                pending.callbacks.push(callback);
            }
            return;
        }

        // 缓存命中：跳过加载直接展示
        if let Some(cached) = self.cache.get(&panel_type) {
            let handle = cached.clone();
            self.show_panel(handle, data, on_complete.into_iter().collect());
            return;
        }

        // 发起异步加载
        let handle = self.provider.load_async(&path);
        self.pending.insert(
            panel_type,
            PendingOpen {
                handle,
                data,
                callbacks: on_complete.into_iter().collect(),
            },
        );
    }

    /// 关闭 UI 面板
    ///
    /// 对调用方来说是发后即忘：真正的移除发生在 Closed 通知的处理里，
    /// 保证自关闭、程序化关闭和关闭全部走同一条清理路径。
    /// 未打开时记录警告并忽略。
    pub fn close_panel(&mut self, panel_type: PanelType) {
        let Some(handle) = self.opened.get(&panel_type).cloned() else {
            warn!(panel = panel_type.name(), "Panel is not opened");
            return;
        };
        handle.borrow_mut().close();
        self.drain_events();
    }

    /// 关闭所有面板
    ///
    /// 先对打开集合的键做快照再逐个关闭，迭代期间的变更不会漏掉
    /// 或重复处理任何面板。
    pub fn close_all_panels(&mut self) {
        let snapshot: Vec<PanelType> = self.opened.keys().copied().collect();
        for panel_type in snapshot {
            self.close_panel(panel_type);
        }
    }

    /// 获取已打开的面板
    pub fn get_opened_panel(&self, panel_type: PanelType) -> Option<PanelHandle> {
        self.opened.get(&panel_type).cloned()
    }

    /// 面板是否已打开
    pub fn is_panel_opened(&self, panel_type: PanelType) -> bool {
        self.opened.contains_key(&panel_type)
    }

    /// 面板是否正在加载
    pub fn is_panel_loading(&self, panel_type: PanelType) -> bool {
        self.pending.contains_key(&panel_type)
    }

    /// 清理实例缓存
    ///
    /// 销毁并清空缓存中的实例，然后请求资源提供者释放未使用的底层
    /// 资源。当前仍处于打开状态的面板会被跳过并记录警告，不会在
    /// 显示中途被销毁；关闭与清缓存彼此独立。
    pub fn clear_cache(&mut self) {
        let snapshot: Vec<PanelType> = self.cache.keys().copied().collect();
        for panel_type in snapshot {
            if self.opened.contains_key(&panel_type) {
                warn!(
                    panel = panel_type.name(),
                    "Skipping cache clear for a panel that is still open"
                );
                continue;
            }
            if let Some(handle) = self.cache.remove(&panel_type) {
                let layer = handle.borrow().layer;
                self.layers.detach(layer, panel_type);
                handle.borrow_mut().destroy();
            }
        }
        self.provider.unload_unused();
    }

    /// 驱动一次协作式调度
    ///
    /// 轮询在途加载、消化叶子请求、处理面板通知。每个状态转换在
    /// 让出之前完整执行，期间不会与其他管理器操作交错。
    pub fn update(&mut self) {
        self.poll_pending_loads();

        for command in self.commands.take_all() {
            match command {
                PanelCommand::Open(panel_type) => self.open_panel(panel_type, None, None),
                PanelCommand::Close(panel_type) => self.close_panel(panel_type),
                PanelCommand::CloseAll => self.close_all_panels(),
            }
        }

        self.drain_events();
    }

    /// 轮询在途加载并完成绑定
    fn poll_pending_loads(&mut self) {
        let in_flight: Vec<PanelType> = self.pending.keys().copied().collect();
        for panel_type in in_flight {
            let handle = self.pending[&panel_type].handle;
            match self.provider.poll(handle) {
                LoadStatus::Pending => {}
                LoadStatus::Failed => {
                    error!(panel = panel_type.name(), "Failed to load panel prefab");
                    // 失败时不触碰缓存和打开集合，回调不会被调用
                    self.pending.remove(&panel_type);
                }
                LoadStatus::Ready(resource) => {
                    let pending = self
                        .pending
                        .remove(&panel_type)
                        .expect("in-flight entry exists");
                    self.bind_loaded_panel(panel_type, resource, pending.data, pending.callbacks);
                }
            }
        }
    }

    /// 绑定新加载的面板实例并进入展示
    fn bind_loaded_panel(
        &mut self,
        panel_type: PanelType,
        resource: PanelResource,
        data: Option<PanelData>,
        callbacks: Vec<OpenCallback>,
    ) {
        let Some(info) = self.registry.get(panel_type) else {
            // 在途表只收注册过的类型，这里只是兜底
            error!(panel = panel_type.name(), "Panel info disappeared during load");
            self.provider.unload(resource);
            return;
        };
        let layer = info.layer;
        let destroy_on_close = info.destroy_on_close;

        let mut panel = match resource.downcast::<Panel>() {
            Ok(panel) => *panel,
            Err(resource) => {
                error!(
                    panel = panel_type.name(),
                    "Loaded resource does not carry the panel contract"
                );
                self.provider.unload(resource);
                return;
            }
        };

        // 绑定身份与层级
        panel.panel_type = panel_type;
        panel.layer = layer;
        self.layers.attach(layer, panel_type);

        let order = self.layers.next_sorting_order(layer);
        panel.set_sorting_order(order);

        panel.connect_events(self.events_tx.clone());

        let handle = panel.into_handle();

        // 缓存面板（如果不是销毁类型）
        if !destroy_on_close {
            self.cache.insert(panel_type, handle.clone());
        }

        debug!(
            panel = panel_type.name(),
            layer = layer.name(),
            order,
            "Panel bound"
        );

        self.show_panel(handle, data, callbacks);
    }

    /// 展示面板（缓存命中与新加载共用）
    fn show_panel(
        &mut self,
        handle: PanelHandle,
        data: Option<PanelData>,
        callbacks: Vec<OpenCallback>,
    ) {
        let panel_type = handle.borrow().panel_type;
        self.opened.insert(panel_type, handle.clone());
        handle.borrow_mut().open(data);
        for callback in callbacks {
            callback(handle.clone());
        }
    }

    /// 处理面板通知
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                PanelEvent::Opened(panel_type) => {
                    debug!(panel = panel_type.name(), "Panel opened");
                }
                PanelEvent::Closed(panel_type) => self.handle_panel_closed(panel_type),
            }
        }
    }

    /// Closed 通知的处理：唯一的移除与销毁路径
    fn handle_panel_closed(&mut self, panel_type: PanelType) {
        let Some(handle) = self.opened.remove(&panel_type) else {
            return;
        };
        debug!(panel = panel_type.name(), "Panel closed");

        let destroy_on_close = self
            .registry
            .get(panel_type)
            .map(|info| info.destroy_on_close)
            .unwrap_or(false);

        if destroy_on_close {
            self.cache.remove(&panel_type);
            let layer = handle.borrow().layer;
            self.layers.detach(layer, panel_type);
            handle.borrow_mut().destroy();
        }
    }
}
