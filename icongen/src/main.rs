use clap::Parser;
use log::*;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::path::PathBuf;

mod acquire;
mod config;
mod emit;
mod generate;

use config::Config;
use emit::Signal;
use generate::GenError;

const APP_NAME: &str = "icongen";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(long, short)]
    /// TOML file with the icon, font and header settings
    config: Option<PathBuf>,

    #[clap(long, value_parser = parse_codepoint)]
    /// Code point to render, in hex (`F1EB`, `0xF1EB` or `U+F1EB`)
    codepoint: Option<u32>,

    #[clap(long)]
    /// Width and height of the icon in pixels
    box_size: Option<u32>,

    #[clap(long)]
    /// Font file to use instead of the cache and downloads
    font: Option<PathBuf>,

    #[clap(long)]
    /// Directory holding downloaded fonts
    cache_dir: Option<PathBuf>,

    #[clap(long, short)]
    /// Where to write the header
    output: Option<PathBuf>,

    #[clap(long)]
    /// Prefix of the defines and the array name in the header
    symbol: Option<String>,

    #[clap(long, value_enum, default_value_t = Signal::None)]
    /// How to tell the build that the icon is available, printed on stdout
    signal: Signal,

    #[clap(long)]
    /// Never download, only use the cache
    offline: bool,

    #[clap(long)]
    /// Log the rendered icon
    preview: bool,

    #[clap(long)]
    /// Exit with an error instead of skipping generation when something fails
    strict: bool,

    #[clap(long)]
    /// Print the default configuration file and exit
    print_default_config: bool,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(codepoint) = self.codepoint {
            config.icon.codepoint = codepoint;
        }
        if let Some(box_size) = self.box_size {
            config.icon.box_size = box_size;
        }
        if let Some(font) = &self.font {
            config.font.path = Some(font.clone());
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.font.cache_dir = Some(cache_dir.clone());
        }
        if let Some(output) = &self.output {
            config.header.output = output.clone();
        }
        if let Some(symbol) = &self.symbol {
            config.header.symbol = symbol.clone();
        }
    }
}

fn parse_codepoint(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix("U+"))
        .or_else(|| s.strip_prefix("u+"))
        .unwrap_or(s);
    let value = u32::from_str_radix(digits, 16).map_err(|e| format!("`{s}` is not hex: {e}"))?;
    if char::from_u32(value).is_none() {
        return Err(format!("{value:#X} is not a Unicode scalar value"));
    }
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // Stdout is reserved for the build signal
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("console").build(LevelFilter::Error);

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .logger(Logger::builder().build(APP_NAME, log_level))
        .logger(Logger::builder().build("icon_bitmap", log_level))
        .build(root)?;

    log4rs::init_config(log_config)?;
    if args.verbose > 0 {
        log_panics::init();
    }

    if args.print_default_config {
        print!("{}", toml::to_string_pretty(&Config::default())?);
        return Ok(());
    }

    for line in execute(&args)? {
        println!("{line}");
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Config, GenError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Reading config file from {}", path.display());
            Config::new_from_file(path)
                .map_err(|e| GenError::Config(format!("{}: {e}", path.display())))?
        }
        None => Config::default(),
    };
    args.apply_to(&mut config);
    debug!("Using config: {config:?}");
    Ok(config)
}

/// Runs every stage and returns the lines for stdout. Failures are only returned
/// with `--strict`, otherwise they are logged and nothing is printed.
fn execute(args: &Args) -> Result<Vec<String>, GenError> {
    let result = load_config(args).and_then(|config| {
        let icon = generate::run(&config, args.offline)?;
        if args.preview {
            info!("Rendered icon:\n{}", icon.raster);
        }
        Ok(args.signal.lines(&config.header.spec().available_define()))
    });

    match result {
        Ok(lines) => Ok(lines),
        Err(e) if args.strict => {
            error!("{e}");
            Err(e)
        }
        Err(e) => {
            warn!("{e}");
            warn!("Skipping icon generation, the built-in fallback icon will be used");
            Ok(vec![])
        }
    }
}
