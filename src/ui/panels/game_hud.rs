//! 游戏 HUD 面板

use std::any::Any;

use crate::ui::define::PanelType;
use crate::ui::manager::PanelCommands;
use crate::ui::panel::PanelBehavior;

/// 游戏 HUD 数据
#[derive(Debug, Clone, Copy)]
pub struct GameHudData {
    pub health: i32,
    pub max_health: i32,
    pub score: i32,
}

impl GameHudData {
    pub fn new(health: i32, max_health: i32, score: i32) -> Self {
        Self {
            health,
            max_health,
            score,
        }
    }
}

/// 游戏 HUD 面板行为
///
/// 绑定血量条和分数显示。
pub struct GameHudBehavior {
    commands: PanelCommands,

    health: i32,
    max_health: i32,
    score: i32,

    health_text: String,
    score_text: String,
}

impl GameHudBehavior {
    /// 创建 HUD 行为
    pub fn new(commands: PanelCommands) -> Self {
        let mut behavior = Self {
            commands,
            health: 100,
            max_health: 100,
            score: 0,
            health_text: String::new(),
            score_text: String::new(),
        };
        behavior.refresh();
        behavior
    }

    /// 设置血量
    pub fn set_health(&mut self, health: i32, max_health: i32) {
        self.health = health;
        self.max_health = max_health;
        self.refresh();
    }

    /// 设置分数
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
        self.refresh();
    }

    /// 血量显示文本
    pub fn health_text(&self) -> &str {
        &self.health_text
    }

    /// 分数显示文本
    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    /// 血量比例 (0-1)
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// 打开主菜单
    pub fn open_menu(&self) {
        self.commands.open(PanelType::MainMenu);
    }

    /// 打开背包
    pub fn open_inventory(&self) {
        self.commands.open(PanelType::Inventory);
    }

    fn refresh(&mut self) {
        self.health_text = format!("{}/{}", self.health, self.max_health);
        self.score_text = format!("Score: {}", self.score);
    }
}

impl PanelBehavior for GameHudBehavior {
    fn name(&self) -> &str {
        "GameHud"
    }

    fn on_open(&mut self, data: Option<&mut dyn Any>) {
        if let Some(hud) = data.and_then(|d| d.downcast_ref::<GameHudData>()) {
            self.health = hud.health;
            self.max_health = hud.max_health;
            self.score = hud.score;
        }
        self.refresh();
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

    fn hud_behavior() -> GameHudBehavior {
        GameHudBehavior::new(PanelCommands::new())
    }

    #[test]
    fn test_hud_bindings() {
        let mut hud = hud_behavior();
        assert_eq!(hud.health_text(), "100/100");

        hud.set_health(30, 120);
        hud.set_score(999);
        assert_eq!(hud.health_text(), "30/120");
        assert_eq!(hud.score_text(), "Score: 999");
        assert!((hud.health_ratio() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_hud_open_payload() {
        let mut hud = hud_behavior();
        let mut data: Box<dyn Any> = Box::new(GameHudData::new(50, 80, 7));
        hud.on_open(Some(data.as_mut()));
        assert_eq!(hud.health_text(), "50/80");
        assert_eq!(hud.score_text(), "Score: 7");
    }

    #[test]
    fn test_hud_zero_max_health() {
        let mut hud = hud_behavior();
        hud.set_health(10, 0);
        assert_eq!(hud.health_ratio(), 0.0);
    }
}
