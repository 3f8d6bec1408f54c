//! 面板资源加载模块
//!
//! 资源提供者对管理器是一个不透明的异步预制体来源：按逻辑路径产出一个
//! 新实例，或者给出失败信号。异步形式是"发起请求 + 协作式轮询"：
//! 请求发出与完成回调之间的间隙就是挂起点，由管理器在 `update` 中驱动，
//! 全程停留在同一个逻辑线程上。
//!
//! `PrefabLibrary` 是内置实现：路径到工厂闭包的表，带可配置的模拟
//! 延迟（以帧为单位）。未注册的路径加载失败。

use std::any::Any;
use std::collections::HashMap;

use tracing::{debug, error};

/// 加载出的资源实例
///
/// 类型擦除的容器；管理器负责校验其中是否真的是一个面板。
pub type PanelResource = Box<dyn Any>;

/// 面板工厂闭包
pub type PanelFactory = Box<dyn Fn() -> PanelResource>;

/// 一次异步加载请求的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadHandle(u64);

/// 异步加载的轮询结果
pub enum LoadStatus {
    /// 仍在加载中
    Pending,
    /// 加载完成，交出实例
    Ready(PanelResource),
    /// 加载失败
    Failed,
}

/// 资源提供者接口
///
/// 管理器在打开流程中只使用异步形式。
pub trait ResourceProvider {
    /// 同步加载：立即产出实例或失败
    fn load_sync(&mut self, path: &str) -> Option<PanelResource>;

    /// 发起异步加载，返回请求句柄
    fn load_async(&mut self, path: &str) -> LoadHandle;

    /// 轮询异步请求
    ///
    /// 返回 `Ready` 或 `Failed` 后句柄即失效。
    fn poll(&mut self, handle: LoadHandle) -> LoadStatus;

    /// 释放一个实例
    fn unload(&mut self, resource: PanelResource);

    /// 释放所有不再使用的底层资源
    fn unload_unused(&mut self);
}

struct PendingLoad {
    path: String,
    frames_left: u32,
}

/// 内置的工厂表资源库
///
/// 模拟延迟默认 1 帧：请求发出后至少经过一次 `poll` 才会完成，
/// 保证挂起点始终存在。
pub struct PrefabLibrary {
    factories: HashMap<String, PanelFactory>,
    pending: HashMap<LoadHandle, PendingLoad>,
    latency_frames: u32,
    next_handle: u64,
    instantiated: usize,
    released: usize,
}

impl PrefabLibrary {
    /// 创建资源库（默认 1 帧延迟）
    pub fn new() -> Self {
        Self::with_latency(1)
    }

    /// 创建资源库并指定模拟延迟帧数
    pub fn with_latency(latency_frames: u32) -> Self {
        Self {
            factories: HashMap::new(),
            pending: HashMap::new(),
            latency_frames,
            next_handle: 0,
            instantiated: 0,
            released: 0,
        }
    }

    /// 注册一个路径对应的工厂
    pub fn register(
        &mut self,
        path: impl Into<String>,
        factory: impl Fn() -> PanelResource + 'static,
    ) {
        self.factories.insert(path.into(), Box::new(factory));
    }

    /// 当前仍存活的实例数（产出数减去释放数）
    pub fn live_instances(&self) -> usize {
        self.instantiated - self.released
    }

    /// 累计产出的实例数
    pub fn instantiated(&self) -> usize {
        self.instantiated
    }

    fn instantiate(&mut self, path: &str) -> Option<PanelResource> {
        match self.factories.get(path) {
            Some(factory) => {
                self.instantiated += 1;
                Some(factory())
            }
            None => None,
        }
    }
}

impl Default for PrefabLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProvider for PrefabLibrary {
    fn load_sync(&mut self, path: &str) -> Option<PanelResource> {
        let resource = self.instantiate(path);
        if resource.is_none() {
            error!(path, "Failed to load panel prefab");
        }
        resource
    }

    fn load_async(&mut self, path: &str) -> LoadHandle {
        let handle = LoadHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert(
            handle,
            PendingLoad {
                path: path.to_string(),
                frames_left: self.latency_frames,
            },
        );
        debug!(path, ?handle, "Async prefab load started");
        handle
    }

    fn poll(&mut self, handle: LoadHandle) -> LoadStatus {
        let Some(load) = self.pending.get_mut(&handle) else {
            error!(?handle, "Polled an unknown load handle");
            return LoadStatus::Failed;
        };

        if load.frames_left > 0 {
            load.frames_left -= 1;
            return LoadStatus::Pending;
        }

        let load = self.pending.remove(&handle).expect("pending entry exists");
        match self.instantiate(&load.path) {
            Some(resource) => LoadStatus::Ready(resource),
            None => {
                error!(path = %load.path, "Failed to load panel prefab");
                LoadStatus::Failed
            }
        }
    }

    fn unload(&mut self, resource: PanelResource) {
        drop(resource);
        self.released += 1;
    }

    fn unload_unused(&mut self) {
        debug!(live = self.live_instances(), "Unloading unused prefab assets");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_with_marker() -> PrefabLibrary {
        let mut library = PrefabLibrary::with_latency(2);
        library.register("ui/panels/marker", || Box::new(42u32) as PanelResource);
        library
    }

    #[test]
    fn test_sync_load() {
        let mut library = library_with_marker();
        let resource = library.load_sync("ui/panels/marker").unwrap();
        assert_eq!(*resource.downcast::<u32>().unwrap(), 42);
        assert!(library.load_sync("ui/panels/missing").is_none());
    }

    #[test]
    fn test_async_load_latency() {
        let mut library = library_with_marker();
        let handle = library.load_async("ui/panels/marker");

        assert!(matches!(library.poll(handle), LoadStatus::Pending));
        assert!(matches!(library.poll(handle), LoadStatus::Pending));

        match library.poll(handle) {
            LoadStatus::Ready(resource) => {
                assert_eq!(*resource.downcast::<u32>().unwrap(), 42);
            }
            _ => panic!("load should complete after latency elapses"),
        }

        // 完成后句柄失效
        assert!(matches!(library.poll(handle), LoadStatus::Failed));
    }

    #[test]
    fn test_async_load_unknown_path_fails() {
        let mut library = PrefabLibrary::with_latency(0);
        let handle = library.load_async("ui/panels/missing");
        assert!(matches!(library.poll(handle), LoadStatus::Failed));
    }

    #[test]
    fn test_unload_bookkeeping() {
        let mut library = library_with_marker();
        let resource = library.load_sync("ui/panels/marker").unwrap();
        assert_eq!(library.live_instances(), 1);

        library.unload(resource);
        assert_eq!(library.live_instances(), 0);
        assert_eq!(library.instantiated(), 1);
    }
}
