use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::constants::{LOG_FILE_NAME, LOG_PATTERN};
use super::errors::CacheError;

const CONSOLE_APPENDER: &str = "console";
const FILE_APPENDER: &str = "file";
const CRATE_TARGET: &str = "rank_cache";

/// Handle of the installed log4rs logger, kept so later calls reconfigure instead of
/// failing on the second `set_logger`.
static LOG4RS_HANDLE: Lazy<Mutex<Option<Handle>>> = Lazy::new(|| Mutex::new(None));

/// Logger settings for the rank_cache lib.
///
/// - `log_directory`: where `rank_cache.log` is written when `log_in_file` is set.
/// - `log_level`: one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
/// - `console_display`: also write to stdout.
/// - `only_record_rank_cache`: drop records whose target is outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub log_directory: PathBuf,
    pub log_level: String,
    pub log_in_file: bool,
    pub console_display: bool,
    pub only_record_rank_cache: bool,
}

impl LoggerConfig {
    pub fn new(
        log_directory: impl Into<PathBuf>,
        log_level: impl Into<String>,
        log_in_file: bool,
        console_display: bool,
        only_record_rank_cache: bool,
    ) -> Self {
        LoggerConfig {
            log_directory: log_directory.into(),
            log_level: log_level.into(),
            log_in_file,
            console_display,
            only_record_rank_cache,
        }
    }

    pub fn level(&self) -> Result<LevelFilter, CacheError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| CacheError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_directory.join(LOG_FILE_NAME)
    }

    pub fn build_logger_config(&self) -> Result<Config, CacheError> {
        let level = self.level()?;
        let mut builder = Config::builder();
        let mut appenders: Vec<&str> = Vec::new();

        if self.console_display {
            let console = ConsoleAppender::builder().encoder(Box::new(PatternEncoder::new(LOG_PATTERN))).build();
            builder = builder.appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
            appenders.push(CONSOLE_APPENDER);
        }
        if self.log_in_file {
            if !self.log_directory.exists() {
                std::fs::create_dir_all(&self.log_directory)?;
            }
            let file = FileAppender::builder().encoder(Box::new(PatternEncoder::new(LOG_PATTERN))).build(self.log_file())?;
            builder = builder.appender(Appender::builder().build(FILE_APPENDER, Box::new(file)));
            appenders.push(FILE_APPENDER);
        }

        let config = if self.only_record_rank_cache {
            builder
                .logger(Logger::builder().appenders(appenders).additive(false).build(CRATE_TARGET, level))
                .build(Root::builder().build(LevelFilter::Off))
        } else {
            builder.build(Root::builder().appenders(appenders).build(level))
        };
        config.map_err(|e| CacheError::LoggerInit(e.to_string()))
    }
}

/// Installs the logger described by `config`, or swaps the configuration of the
/// logger installed by a previous call.
pub fn init_logger(config: &LoggerConfig) -> Result<(), CacheError> {
    let log4rs_config = config.build_logger_config()?;
    let mut handle = LOG4RS_HANDLE.lock();
    if let Some(installed) = handle.as_ref() {
        installed.set_config(log4rs_config);
        return Ok(());
    }
    *handle = Some(log4rs::init_config(log4rs_config)?);
    Ok(())
}
