use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

pub const DEFAULT_OUTPUT: &str = "codebase_analysis.json";

/// Files larger than this (in bytes) are skipped unless overridden.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// How collected files are identified in the report and located on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathMode {
    /// Path relative to the scan root, `/`-separated. Unique per file.
    #[default]
    Relative,
    /// Bare file name, opened against the working directory. Files sharing a
    /// name in different directories collapse into one key.
    FileName,
}

/// Diagnostic output settings for a single run.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            ansi: false,
        }
    }
}

impl LogConfig {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Build a stderr subscriber printing `LEVEL: message` lines.
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        self.subscriber_with_writer(std::io::stderr)
    }

    pub fn subscriber_with_writer<W>(&self, writer: W) -> impl Subscriber + Send + Sync + 'static
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()));

        tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::layer()
                .event_format(LevelMessage)
                .with_ansi(self.ansi)
                .with_writer(writer),
        )
    }
}

/// `WARN: message`, nothing else.
struct LevelMessage;

impl<S, N> FormatEvent<S, N> for LevelMessage
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}: ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Everything a run needs. Built by the CLI, consumed by [`crate::core::CodebaseAnalyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub path_mode: PathMode,
    /// Base directory for [`PathMode::FileName`]; `None` means the process working directory.
    pub working_dir: Option<PathBuf>,
    pub follow_symlinks: bool,
    /// `0` disables the limit.
    pub max_file_size: u64,
    /// `None` leaves whatever subscriber is already active in charge.
    pub log: Option<LogConfig>,
}

impl AnalyzerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            path_mode: PathMode::default(),
            working_dir: None,
            follow_symlinks: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            log: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_path_mode(mut self, path_mode: PathMode) -> Self {
        self.path_mode = path_mode;
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = Some(log);
        self
    }

    pub fn size_limit(&self) -> Option<u64> {
        (self.max_file_size > 0).then_some(self.max_file_size)
    }

    /// Directory that collected paths are resolved against when opening files.
    pub fn base_dir(&self) -> PathBuf {
        match self.path_mode {
            PathMode::Relative => self.root.clone(),
            PathMode::FileName => self
                .working_dir
                .clone()
                .unwrap_or_else(|| Path::new(".").to_path_buf()),
        }
    }
}
