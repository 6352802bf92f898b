use std::cell::RefCell;
use std::rc::Rc;

use crate::task_main::TaskMain;

/// クリア色（0.0〜1.0 の RGBA）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// ランタイムループが画面側に公開するウィンドウ・描画機能
pub trait Graphics {
    fn set_title(&mut self, title: &str);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn frames_per_second(&self) -> u32;
    /// このフレームのクリア色を指定する
    fn clear(&mut self, color: Color);
}

/// 選択中の間、毎フレームの更新・描画を受け持つ単位
pub trait Screen {
    /// アクティブになったとき
    fn show(&mut self, gfx: &mut dyn Graphics);
    /// 毎フレームの描画。`delta` は前フレームからの秒数
    fn render(&mut self, gfx: &mut dyn Graphics, delta: f32);
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    /// 別の画面に切り替わるとき
    fn hide(&mut self) {}
    fn dispose(&mut self) {}
}

/// 画面の共有ハンドル。ループと同じスレッドからのみ触る。
pub type ScreenHandle = Rc<RefCell<dyn Screen>>;

/// ランタイムループから呼ばれるライフサイクルコールバック
pub trait Application {
    /// ウィンドウとグラフィックスコンテキスト生成後、最初のフレームの前に一度だけ呼ばれる
    fn create(&mut self, gfx: &mut dyn Graphics);
    fn render(&mut self, gfx: &mut dyn Graphics, delta: f32);
    fn resize(&mut self, width: u32, height: u32);
    fn pause(&mut self);
    fn resume(&mut self);
    fn dispose(&mut self);
}

/// アクティブな画面を一つ保持し、コールバックを転送する
#[derive(Default)]
pub struct ScreenSlot {
    active: Option<ScreenHandle>,
}

impl ScreenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前の画面を hide し、新しい画面を show してから現在のサイズを伝える
    pub fn set_screen(&mut self, screen: ScreenHandle, gfx: &mut dyn Graphics) {
        if let Some(previous) = self.active.take() {
            previous.borrow_mut().hide();
        }
        {
            let mut next = screen.borrow_mut();
            next.show(gfx);
            next.resize(gfx.width(), gfx.height());
        }
        self.active = Some(screen);
    }

    pub fn screen(&self) -> Option<&ScreenHandle> {
        self.active.as_ref()
    }

    pub fn render(&mut self, gfx: &mut dyn Graphics, delta: f32) {
        if let Some(screen) = &self.active {
            screen.borrow_mut().render(gfx, delta);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(screen) = &self.active {
            screen.borrow_mut().resize(width, height);
        }
    }

    pub fn pause(&mut self) {
        if let Some(screen) = &self.active {
            screen.borrow_mut().pause();
        }
    }

    pub fn resume(&mut self) {
        if let Some(screen) = &self.active {
            screen.borrow_mut().resume();
        }
    }

    pub fn dispose(&mut self) {
        if let Some(screen) = &self.active {
            screen.borrow_mut().hide();
        }
    }
}

/// アプリケーションの状態。生成前（Uninitialized）は値として存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 設定とタイトルが決まり、ループの開始待ち
    ConfigBuilt,
    /// 初期化コールバック済み。以降の振る舞いは画面に委ねる
    Running,
}

/// Track It! 本体。初期化時にタイトルを再設定し、TaskMain を表示する。
pub struct TrackIt {
    title: String,
    task_main: ScreenHandle,
    screens: ScreenSlot,
    phase: Phase,
}

impl TrackIt {
    pub fn new(title: impl Into<String>) -> Self {
        let task_main: ScreenHandle = Rc::new(RefCell::new(TaskMain::new()));
        Self {
            title: title.into(),
            task_main,
            screens: ScreenSlot::new(),
            phase: Phase::ConfigBuilt,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// このアプリケーションが持つ唯一の TaskMain
    pub fn task_main(&self) -> &ScreenHandle {
        &self.task_main
    }

    pub fn screen(&self) -> Option<&ScreenHandle> {
        self.screens.screen()
    }
}

impl Application for TrackIt {
    fn create(&mut self, gfx: &mut dyn Graphics) {
        if self.phase == Phase::Running {
            log::warn!("create called twice; ignoring");
            return;
        }
        // ウィンドウ生成前に設定したタイトルが反映されない環境があるため、ここで再設定する
        gfx.set_title(&self.title);
        self.screens.set_screen(Rc::clone(&self.task_main), gfx);
        self.phase = Phase::Running;
        log::info!("application running with TaskMain");
    }

    fn render(&mut self, gfx: &mut dyn Graphics, delta: f32) {
        self.screens.render(gfx, delta);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.screens.resize(width, height);
    }

    fn pause(&mut self) {
        self.screens.pause();
    }

    fn resume(&mut self) {
        self.screens.resume();
    }

    fn dispose(&mut self) {
        self.screens.dispose();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// テスト用の Graphics。呼び出しを記録するだけ
    #[derive(Debug, Default)]
    pub(crate) struct RecordingGraphics {
        pub titles: Vec<String>,
        pub clears: Vec<Color>,
        pub fps: u32,
    }

    impl Graphics for RecordingGraphics {
        fn set_title(&mut self, title: &str) {
            self.titles.push(title.to_string());
        }

        fn width(&self) -> u32 {
            960
        }

        fn height(&self) -> u32 {
            540
        }

        fn frames_per_second(&self) -> u32 {
            self.fps
        }

        fn clear(&mut self, color: Color) {
            self.clears.push(color);
        }
    }

    #[derive(Default)]
    struct LoggingScreen {
        log: Vec<String>,
    }

    impl Screen for LoggingScreen {
        fn show(&mut self, _gfx: &mut dyn Graphics) {
            self.log.push("show".into());
        }

        fn render(&mut self, _gfx: &mut dyn Graphics, delta: f32) {
            self.log.push(format!("render {delta}"));
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.log.push(format!("resize {width}x{height}"));
        }

        fn hide(&mut self) {
            self.log.push("hide".into());
        }
    }

    #[test]
    fn switching_screens_hides_the_previous_one() {
        let mut gfx = RecordingGraphics::default();
        let first = Rc::new(RefCell::new(LoggingScreen::default()));
        let second = Rc::new(RefCell::new(LoggingScreen::default()));
        let mut slot = ScreenSlot::new();

        slot.set_screen(first.clone(), &mut gfx);
        slot.render(&mut gfx, 0.5);
        slot.set_screen(second.clone(), &mut gfx);

        assert_eq!(
            first.borrow().log,
            vec!["show", "resize 960x540", "render 0.5", "hide"]
        );
        assert_eq!(second.borrow().log, vec!["show", "resize 960x540"]);
    }

    #[test]
    fn create_sets_title_and_task_main_once() {
        let mut gfx = RecordingGraphics::default();
        let mut app = TrackIt::new("Track It! — Loading…");
        assert_eq!(app.phase(), Phase::ConfigBuilt);
        assert!(app.screen().is_none());

        app.create(&mut gfx);
        let first = Rc::clone(app.screen().unwrap());
        assert!(Rc::ptr_eq(&first, app.task_main()));
        assert_eq!(app.phase(), Phase::Running);

        app.create(&mut gfx);
        assert!(Rc::ptr_eq(app.screen().unwrap(), &first));
        assert_eq!(gfx.titles, vec!["Track It! — Loading…"]);
    }
}
