// src/lib.rs
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod fps;
pub mod game;
pub mod lang;
pub mod locale;
pub mod logger;
pub mod renderer;
pub mod task_main;

pub use app::{Application, Graphics, Screen, ScreenSlot, TrackIt};
pub use bootstrap::{prepare, window_title};
pub use config::RuntimeConfiguration;
pub use error::{LangError, RuntimeError};
pub use game::run_app;
pub use lang::{Lang, Localization};
pub use locale::LocaleContext;
pub use logger::{init_logger_with_config, LoggerConfig};
pub use task_main::TaskMain;
