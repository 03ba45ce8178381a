use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use log::LevelFilter;

use common::config::DemoConfig;
use common::{debug, run};
use demo::Demo;

mod demo;

/// Fly around a textured, lit cube scene
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with window, camera and asset settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// One of off, error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_parser = parse_level_filter)]
    log_level: LevelFilter,
}

fn parse_level_filter(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("\"{level}\" is not a log level"))
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    debug::set_up_logging(args.log_level)?;

    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    run::run::<Demo>(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_without_config() {
        let args = Args::try_parse_from(["demo"]).unwrap();

        assert_eq!(args.log_level, LevelFilter::Info);
        assert_eq!(args.config, None);
    }

    #[test]
    fn parses_config_and_level() {
        let args =
            Args::try_parse_from(["demo", "--config", "assets/demo.json", "--log-level", "debug"])
                .unwrap();

        assert_eq!(args.log_level, LevelFilter::Debug);
        assert_eq!(args.config, Some(PathBuf::from("assets/demo.json")));
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Args::try_parse_from(["demo", "--log-level", "loud"]).is_err());
    }
}
