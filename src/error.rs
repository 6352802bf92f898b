use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 言語パックの読み込み・参照時のエラー
#[derive(Debug, Error)]
pub enum LangError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed language file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no text for `{key}` in locale `{locale}` or the fallback language")]
    MissingKey { key: String, locale: String },
}

/// ウィンドウ・グラフィックスコンテキスト生成時のエラー
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error("surface supports no texture format on this adapter")]
    NoSurfaceFormat,

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
