/// ウィンドウタイトルの固定プレフィックス
pub const TITLE_PREFIX: &str = "Track It! — ";

/// 起動時に表示する "loading" 文言のキー
pub const LOADING_KEY: &str = "MENU_IO_LOADING";

pub const WINDOW_WIDTH: u32 = 960;
pub const WINDOW_HEIGHT: u32 = 540;
pub const FOREGROUND_FPS: u32 = 60;
pub const BACKGROUND_FPS: u32 = 60;

/// 言語パックの置き場所（作業ディレクトリからの相対パス）
pub const LOCALES_DIR: &str = "assets/locales";

/// ランタイムループに渡すウィンドウ・表示設定。
///
/// 一度生成したら変更しない。ループは値で受け取る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfiguration {
    window_width: u32,
    window_height: u32,
    foreground_fps: u32,
    background_fps: u32,
    resizable: bool,
    title: String,
}

impl RuntimeConfiguration {
    /// 固定値とタイトルから設定を組み立てる
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            foreground_fps: FOREGROUND_FPS,
            background_fps: BACKGROUND_FPS,
            resizable: false,
            title: title.into(),
        }
    }

    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn window_height(&self) -> u32 {
        self.window_height
    }

    pub fn foreground_fps(&self) -> u32 {
        self.foreground_fps
    }

    pub fn background_fps(&self) -> u32 {
        self.background_fps
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// プレフィックスとローカライズ済み文言を連結したタイトル
pub fn compose_title(loading: &str) -> String {
    format!("{TITLE_PREFIX}{loading}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_fixed_regardless_of_title() {
        for title in ["", "Track It! — Loading…", "x"] {
            let config = RuntimeConfiguration::new(title);
            assert_eq!(config.window_width(), 960);
            assert_eq!(config.window_height(), 540);
            assert_eq!(config.foreground_fps(), 60);
            assert_eq!(config.background_fps(), 60);
            assert!(!config.resizable());
            assert_eq!(config.title(), title);
        }
    }

    #[test]
    fn title_keeps_prefix_verbatim() {
        assert_eq!(compose_title("Loading…"), "Track It! — Loading…");
        assert_eq!(compose_title(""), "Track It! — ");
    }
}
