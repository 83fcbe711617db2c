use std::path::PathBuf;

use clap::{Arg, Command};
use tracing::{error, info};

use shrmpl_conf::{executable_dir, extract_value_map, read_config_file};

// Checks that a config file parses and prints its key/value pairs sorted by
// key. Exits non-zero on the first problem.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("shrmpl-conf-check")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .help("Path to config file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("exe-dir")
                .long("exe-dir")
                .help("Resolve the config file relative to this executable's directory")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("DEBUG, INFO, WARN or ERROR (default: INFO)")
                .default_value("INFO"),
        )
        .get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(|s| s.to_uppercase())
        .unwrap_or_default();
    tracing_subscriber::fmt()
        .with_max_level(match log_level.as_str() {
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        })
        .with_writer(std::io::stderr)
        .init();

    let config_arg = matches
        .get_one::<String>("config")
        .ok_or("config file argument missing")?;
    let config_path = if matches.get_flag("exe-dir") {
        executable_dir()?.join(config_arg)
    } else {
        PathBuf::from(config_arg)
    };

    let content = match read_config_file(&config_path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };

    let key_values = match extract_value_map(&content) {
        Ok(map) => map,
        Err(e) => {
            error!("Invalid config {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };

    let mut pairs: Vec<_> = key_values.into_iter().collect();
    pairs.sort();
    for (key, value) in &pairs {
        println!("{}:{}", key, value);
    }
    info!("{} is valid ({} keys)", config_path.display(), pairs.len());

    Ok(())
}
