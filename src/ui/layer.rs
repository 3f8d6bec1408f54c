//! 渲染层级模块
//!
//! 四个固定层级（背景、普通、顶层、系统），每层一个挂接容器和一个
//! 单调递增的排序计数器。计数器以层级数值基准作为种子，序号只增不减、
//! 用过即废，保证同层内先后打开的面板 z 序严格递增。

use super::define::{Layer, PanelType};

/// 单个层级节点
///
/// 挂接在该层下的面板列表即"层容器"；`next_order` 是该层的排序计数器。
#[derive(Debug)]
pub struct LayerNode {
    layer: Layer,
    children: Vec<PanelType>,
    next_order: i32,
}

impl LayerNode {
    fn new(layer: Layer) -> Self {
        Self {
            layer,
            children: Vec::new(),
            next_order: layer.base(),
        }
    }

    /// 节点所属层级
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// 当前挂接的面板
    pub fn children(&self) -> &[PanelType] {
        &self.children
    }

    /// 是否挂接了指定面板
    pub fn contains(&self, panel_type: PanelType) -> bool {
        self.children.contains(&panel_type)
    }
}

/// 层级集合
///
/// 持有全部四个层级节点，是排序计数器的唯一写入方。
#[derive(Debug)]
pub struct LayerSet {
    background: LayerNode,
    normal: LayerNode,
    top: LayerNode,
    system: LayerNode,
}

impl LayerSet {
    /// 创建层级集合，计数器各自落在层级基准上
    pub fn new() -> Self {
        Self {
            background: LayerNode::new(Layer::Background),
            normal: LayerNode::new(Layer::Normal),
            top: LayerNode::new(Layer::Top),
            system: LayerNode::new(Layer::System),
        }
    }

    /// 获取层级节点
    pub fn node(&self, layer: Layer) -> &LayerNode {
        match layer {
            Layer::Background => &self.background,
            Layer::Normal => &self.normal,
            Layer::Top => &self.top,
            Layer::System => &self.system,
        }
    }

    fn node_mut(&mut self, layer: Layer) -> &mut LayerNode {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Normal => &mut self.normal,
            Layer::Top => &mut self.top,
            Layer::System => &mut self.system,
        }
    }

    /// 把面板挂接到层容器
    pub fn attach(&mut self, layer: Layer, panel_type: PanelType) {
        let node = self.node_mut(layer);
        if !node.children.contains(&panel_type) {
            node.children.push(panel_type);
        }
    }

    /// 把面板从层容器摘除
    pub fn detach(&mut self, layer: Layer, panel_type: PanelType) {
        self.node_mut(layer).children.retain(|t| *t != panel_type);
    }

    /// 取下一个排序序号
    ///
    /// 每个新展示的面板恰好调用一次；序号不回收。
    pub fn next_sorting_order(&mut self, layer: Layer) -> i32 {
        let node = self.node_mut(layer);
        node.next_order += 1;
        node.next_order
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_seeded_at_layer_base() {
        let mut layers = LayerSet::new();
        assert_eq!(layers.next_sorting_order(Layer::Background), 1);
        assert_eq!(layers.next_sorting_order(Layer::Normal), 101);
        assert_eq!(layers.next_sorting_order(Layer::Top), 201);
        assert_eq!(layers.next_sorting_order(Layer::System), 301);
    }

    #[test]
    fn test_orders_are_strictly_increasing() {
        let mut layers = LayerSet::new();
        let first = layers.next_sorting_order(Layer::Normal);
        let second = layers.next_sorting_order(Layer::Normal);
        let third = layers.next_sorting_order(Layer::Normal);
        assert!(first < second && second < third);

        // 其他层不受影响
        assert_eq!(layers.next_sorting_order(Layer::Top), 201);
    }

    #[test]
    fn test_attach_detach() {
        let mut layers = LayerSet::new();
        layers.attach(Layer::System, PanelType::Dialog);
        layers.attach(Layer::System, PanelType::Loading);
        // 重复挂接不产生重复项
        layers.attach(Layer::System, PanelType::Dialog);

        let node = layers.node(Layer::System);
        assert_eq!(node.children(), &[PanelType::Dialog, PanelType::Loading]);

        layers.detach(Layer::System, PanelType::Dialog);
        assert!(!layers.node(Layer::System).contains(PanelType::Dialog));
        assert!(layers.node(Layer::System).contains(PanelType::Loading));
    }

    #[test]
    fn test_detach_does_not_recycle_orders() {
        let mut layers = LayerSet::new();
        layers.attach(Layer::Top, PanelType::Settings);
        let first = layers.next_sorting_order(Layer::Top);
        layers.detach(Layer::Top, PanelType::Settings);

        layers.attach(Layer::Top, PanelType::Inventory);
        let second = layers.next_sorting_order(Layer::Top);
        assert!(second > first);
    }
}
