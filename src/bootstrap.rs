use crate::app::TrackIt;
use crate::config::{compose_title, RuntimeConfiguration, LOADING_KEY};
use crate::error::LangError;
use crate::lang::Localization;

/// "Track It! — " + ローカライズ済みの "loading" 文言
pub fn window_title(l10n: &dyn Localization) -> Result<String, LangError> {
    let loading = l10n.get(LOADING_KEY)?;
    Ok(compose_title(&loading))
}

/// ループ開始前の準備。タイトルを決めて設定とアプリケーションを組み立てる。
///
/// 返した設定はそのまま `run_app` に渡す。
pub fn prepare(l10n: &dyn Localization) -> Result<(TrackIt, RuntimeConfiguration), LangError> {
    let title = window_title(l10n)?;
    log::info!("window title: {title}");
    let config = RuntimeConfiguration::new(title.clone());
    Ok((TrackIt::new(title), config))
}
