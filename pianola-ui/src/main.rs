mod panes;
mod runtime;
mod setup;
mod ui;

use std::fs::File;

use pianola_core::config::Config;
use runtime::RunOptions;
use ui::RatatuiBackend;

const USAGE: &str = "\
Usage: pianola [OPTIONS]

Options:
  -v, --verbose       Debug logging
      --no-audio      Run without opening an audio device
      --list-devices  Print audio output devices and exit
  -h, --help          Print this help";

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("pianola")
        .join("pianola.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/pianola.log")) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("pianola: logging disabled ({})", e);
            return;
        }
    };

    if WriteLogger::init(log_level, Config::default(), log_file).is_err() {
        eprintln!("pianola: logger already initialized");
        return;
    }

    log::info!("pianola starting (log level: {:?})", log_level);
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    if args.iter().any(|a| a == "--list-devices") {
        setup::print_output_devices();
        return Ok(());
    }

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let options = RunOptions {
        no_audio: args.iter().any(|a| a == "--no-audio"),
    };
    if let Some(unknown) = args.iter().skip(1).find(|a| {
        !matches!(a.as_str(), "--verbose" | "-v" | "--no-audio")
    }) {
        log::warn!("ignoring unknown argument {:?}", unknown);
    }

    let config = Config::load();

    let mut backend = RatatuiBackend::new()?;
    backend.start()?;

    let result = runtime::run(&mut backend, &config, options);

    backend.stop()?;
    result
}
