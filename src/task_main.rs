use crate::app::{Color, Graphics, Screen};
use crate::config::TITLE_PREFIX;

/// 待機中の背景色
pub const IDLE_BACKGROUND: Color = Color::rgb(0.235, 0.235, 0.235);

/// トラッキング課題の画面。
///
/// ここでは画面のクリアとタイトルへの FPS 表示のみ受け持つ。
#[derive(Debug, Default)]
pub struct TaskMain {
    visible: bool,
}

impl TaskMain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Screen for TaskMain {
    fn show(&mut self, gfx: &mut dyn Graphics) {
        log::debug!("TaskMain shown at {}x{}", gfx.width(), gfx.height());
        self.visible = true;
    }

    fn render(&mut self, gfx: &mut dyn Graphics, _delta: f32) {
        gfx.clear(IDLE_BACKGROUND);
        let title = format!("{TITLE_PREFIX}FPS: {}", gfx.frames_per_second());
        gfx.set_title(&title);
    }

    fn hide(&mut self) {
        self.dispose();
    }

    fn dispose(&mut self) {
        log::debug!("TaskMain disposed");
        self.visible = false;
    }
}
