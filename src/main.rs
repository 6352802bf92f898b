use anyhow::Context;
use trackit::config::LOCALES_DIR;
use trackit::{init_logger_with_config, prepare, run_app, Lang, LocaleContext, LoggerConfig};

fn main() -> anyhow::Result<()> {
    init_logger_with_config(LoggerConfig::default()).context("failed to initialise logging")?;
    log::info!("Track It! starting");

    let locale = LocaleContext::detect();
    let lang = Lang::load(LOCALES_DIR, locale).context("failed to load language packs")?;
    let (app, config) = prepare(&lang).context("failed to compose the window title")?;

    let never = run_app(app, config).map_err(|e| {
        log::error!("failed to start: {e}");
        e
    })?;
    match never {}
}
