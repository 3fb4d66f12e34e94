use clap::{Arg, Command};
use log::LevelFilter;
use phish_screen::{analyze, run_server, Config, ThreatLevel};
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("phish-screen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing-risk screening for raw email text")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/phish-screen.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("test-email")
                .long("test-email")
                .value_name("FILE")
                .help("Analyze an email file and print the result")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDRESS")
                .help("Override the listen address")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Override the listen port")
                .value_parser(clap::value_parser!(u16))
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/phish-screen.yaml");

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    // Logger comes up before the config so load warnings are visible.
    let configured_level = peek_log_level(config_path);
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        configured_level.unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if let Some(bind) = matches.get_one::<String>("bind") {
        config.server.bind_address = bind.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        match config.validate() {
            Ok(()) => {
                println!(
                    "Listen address: {}:{}",
                    config.server.bind_address, config.server.port
                );
                println!("Max body size: {} bytes", config.server.max_body_bytes);
                println!("✅ Configuration is valid");
            }
            Err(e) => {
                println!("❌ Configuration validation failed:");
                println!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Some(email_file) = matches.get_one::<String>("test-email") {
        test_email_file(email_file);
        return;
    }

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {e}");
        process::exit(1);
    }

    log::info!("Starting phish-screen v{}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = run_server(&config).await {
        log::error!("Server error: {e}");
        process::exit(1);
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(Config::default())
    }
}

fn peek_log_level(path: &str) -> Option<LevelFilter> {
    Config::from_file(path)
        .ok()?
        .logging?
        .level
        .parse()
        .ok()
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn test_email_file(email_file: &str) {
    println!("🧪 Testing email file: {}", email_file);
    println!();

    let email_content = match std::fs::read_to_string(email_file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("❌ Error reading email file: {}", e);
            process::exit(1);
        }
    };

    let result = analyze(&email_content);
    let marker = match result.threat_level {
        ThreatLevel::Low => "🟢",
        ThreatLevel::Medium => "🟡",
        ThreatLevel::High => "🔴",
    };

    println!("{} Threat level: {}", marker, result.threat_level);
    if result.indicators.is_empty() {
        println!("   No obvious phishing indicators detected");
    } else {
        for indicator in &result.indicators {
            println!("   • {}", indicator);
        }
    }
}
