//! UIFrame - 分层 UI 面板生命周期框架
//!
//! 演示程序：加载配置、构建注册表与资源库，然后驱动一轮典型的
//! 打开/关闭流程（主菜单 → 游戏 HUD → 确认对话框 → 收尾）。
//!
//! # 使用方法
//!
//! ```bash
//! cargo run
//!
//! # 调到 debug 级别日志
//! cargo run -- --verbose
//!
//! # 输出日志到文件
//! cargo run -- --log-file logs/ui.log
//! ```
//!
//! # 架构概览
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  应用程序入口
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Core     │  核心功能模块
//! │ (日志/配置)  │
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ PanelManager│  面板生命周期权威
//! └──────┬──────┘
//!        │
//!   ┌────┴────┐
//!   │         │
//! ┌─▼───┐  ┌──▼───┐
//! │Layer│  │Loader│  层级容器与资源提供者
//! └─────┘  └──────┘
//! ```

use anyhow::Context;
use tracing::info;

use ui_frame::core::{log, Config};
use ui_frame::ui::panels::{
    DialogBehavior, DialogData, GameHudBehavior, GameHudData, LoadingBehavior, MainMenuBehavior,
    SettingsBehavior,
};
use ui_frame::ui::{Panel, PanelCommands, PanelManager, PanelType, PrefabLibrary};
use ui_frame::ui_info;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 验证配置
/// 4. 初始化日志系统
/// 5. 构建注册表、资源库和管理器
/// 6. 驱动演示循环
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 4. 初始化日志系统（使用配置中的设置）
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!("UIFrame starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Application initialized");

    // 5. 构建注册表、资源库和管理器
    let registry = config.registry().context("invalid panel registry")?;
    info!(panels = registry.len(), "Panel registry ready");

    let commands = PanelCommands::new();
    let provider = build_prefab_library(&config, &commands);
    let mut manager = PanelManager::new(registry, Box::new(provider), commands.clone());

    // 6. 打开初始面板
    if config.ui.open_initial {
        manager.open_panel(config.ui.initial_panel, None, None);
    }
    pump(&mut manager, config.ui.load_latency_frames + 1);

    // 7. 演示：进入游戏，带上 HUD 状态
    manager.open_panel(
        PanelType::GameHud,
        Some(Box::new(GameHudData::new(80, 100, 1200))),
        Some(Box::new(|panel| {
            ui_info!(
                order = panel.borrow().sorting_order(),
                "Game HUD ready"
            );
        })),
    );
    pump(&mut manager, config.ui.load_latency_frames + 1);

    // 8. 弹出确认对话框，确认后自关闭并销毁
    let dialog_data = DialogData::confirm("退出", "确定要退出游戏吗？")
        .with_on_confirm(|| ui_info!("Quit confirmed"));
    manager.open_panel(PanelType::Dialog, Some(Box::new(dialog_data)), None);
    pump(&mut manager, config.ui.load_latency_frames + 1);

    if let Some(dialog) = manager.get_opened_panel(PanelType::Dialog) {
        if let Some(behavior) = dialog.borrow_mut().behavior_mut::<DialogBehavior>() {
            behavior.confirm();
        }
    }
    pump(&mut manager, 1);

    // 9. 收尾：关闭全部面板并清理缓存
    manager.close_all_panels();
    manager.clear_cache();

    ui_info!("UIFrame demo finished");
    Ok(())
}

/// 构建演示用的资源库
///
/// 每个注册路径对应一个面板工厂；工厂持有请求队列的克隆，
/// 面板叶子通过它发起自关闭等请求。
fn build_prefab_library(config: &Config, commands: &PanelCommands) -> PrefabLibrary {
    let mut library = PrefabLibrary::with_latency(config.ui.load_latency_frames);

    {
        let commands = commands.clone();
        library.register("ui/panels/main_menu", move || {
            Box::new(Panel::new(Box::new(MainMenuBehavior::new(commands.clone()))))
        });
    }
    {
        let commands = commands.clone();
        library.register("ui/panels/game_hud", move || {
            Box::new(Panel::new(Box::new(GameHudBehavior::new(commands.clone()))))
        });
    }
    {
        let commands = commands.clone();
        library.register("ui/panels/settings", move || {
            Box::new(Panel::new(Box::new(SettingsBehavior::new(commands.clone()))))
        });
    }
    {
        let commands = commands.clone();
        library.register("ui/panels/dialog", move || {
            Box::new(Panel::new(Box::new(DialogBehavior::new(commands.clone()))))
        });
    }
    library.register("ui/panels/loading", || {
        Box::new(Panel::new(Box::new(LoadingBehavior::new())))
    });

    library
}

/// 推进若干帧，驱动协作式调度
fn pump(manager: &mut PanelManager, frames: u32) {
    for _ in 0..frames {
        manager.update();
    }
}
