use clap::Parser;
use clap::error::ErrorKind;
use log::{info, warn};
use shellpane::core::config::{self, ResolvedConfig};
use shellpane::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug, Default)]
#[command(name = "shellpane", version, about = "Run shell commands in a scrolling terminal pane")]
struct Args {
    /// Config file to use instead of ~/.shellpane/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Anything else on the command line is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<String>,
}

/// Parse arguments without ever refusing to start: only `--help` and
/// `--version` end the program, anything unrecognized falls back to defaults.
fn parse_args<I, T>(args: I) -> Args
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => Args::default(),
    }
}

/// Initialize the file logger. The terminal belongs to the UI, so logs never go there.
fn init_logging(config: &ResolvedConfig) {
    let Some(path) = &config.log_file else {
        return;
    };
    let level = LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Debug);
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

/// Map the UI's result to the process exit code, reporting failures on `stderr`.
fn exit_code(result: io::Result<()>, stderr: &mut impl Write) -> i32 {
    match result {
        Ok(()) => {
            info!("shellpane exiting");
            0
        }
        Err(e) => {
            log::error!("Terminal UI failed: {e}");
            let _ = writeln!(stderr, "error: {e}");
            1
        }
    }
}

#[tokio::main]
async fn main() {
    let args = parse_args(std::env::args_os());

    let loaded = config::load_config(args.config.as_deref());
    let resolved = match &loaded {
        Ok((config, _)) => config::resolve(config),
        Err(_) => config::resolve(&Default::default()),
    };
    init_logging(&resolved);

    match &loaded {
        Ok((_, origin)) => origin.log(),
        Err(e) => warn!("Ignoring config ({e}), using defaults"),
    }
    info!("shellpane starting up with shell: {} {}", resolved.shell_program, resolved.shell_flag);

    let code = exit_code(tui::run(resolved), &mut io::stderr());

    // Exit here rather than returning: dropping the runtime would wait for
    // jobs still running on the blocking pool.
    log::logger().flush();
    std::process::exit(code);
}
