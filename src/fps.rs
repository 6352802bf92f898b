use std::time::{Duration, Instant};

/// 1 秒ごとに描画フレーム数を数える
#[derive(Debug)]
pub struct FpsCounter {
    last_update: Instant,
    frames: u32,
    current: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            last_update: now,
            frames: 0,
            current: 0,
        }
    }

    /// 描画のたびに呼ぶ。1 秒経過したら Some(fps) を返す。
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.last_update) < Duration::from_secs(1) {
            return None;
        }
        self.current = self.frames;
        self.frames = 0;
        // 大きく遅れたときは now に合わせ直す
        self.last_update += Duration::from_secs(1);
        if now.duration_since(self.last_update) >= Duration::from_secs(1) {
            self.last_update = now;
        }
        Some(self.current)
    }

    /// 直近 1 秒間のフレーム数
    pub fn current(&self) -> u32 {
        self.current
    }
}

/// 次のフレームまで待つべきか
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pace {
    /// フレームを進める。前回フレームからの経過秒数付き
    Frame(f32),
    WaitUntil(Instant),
    /// 停止済み。以降フレームは進まない
    Stopped,
}

/// フォーカス中は foreground_fps、非フォーカス時は background_fps でフレームを刻む
#[derive(Debug)]
pub struct FramePacer {
    foreground: Duration,
    background: Duration,
    focused: bool,
    stopped: bool,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(foreground_fps: u32, background_fps: u32, now: Instant) -> Self {
        Self {
            foreground: frame_duration(foreground_fps),
            background: frame_duration(background_fps),
            focused: true,
            stopped: false,
            last_frame: now,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// ウィンドウが閉じられたら呼ぶ
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn target(&self) -> Duration {
        if self.focused {
            self.foreground
        } else {
            self.background
        }
    }

    pub fn poll(&mut self, now: Instant) -> Pace {
        if self.stopped {
            return Pace::Stopped;
        }
        let elapsed = now.saturating_duration_since(self.last_frame);
        let target = self.target();
        if elapsed < target {
            Pace::WaitUntil(self.last_frame + target)
        } else {
            self.last_frame = now;
            Pace::Frame(elapsed.as_secs_f32())
        }
    }
}

/// 0 は上限なしとして扱う
fn frame_duration(fps: u32) -> Duration {
    if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(1) / fps
    }
}
