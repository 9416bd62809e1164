use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use std::error::Error;
use std::path::Path;
use subnet_calculator::cli::{self, CommandLine};
use subnet_calculator::config::Config;

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = CommandLine::parse_args();

    let result = Config::from_env().and_then(|config| {
        init_logging(&config.log_config)?;
        log::info!("#Start main()");
        cli::run(&args, &config)
    });

    match result {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}

/// log4rs from the config file when present, else warnings to stderr.
fn init_logging(log_config: &str) -> Result<(), Box<dyn Error>> {
    if Path::new(log_config).exists() {
        log4rs::init_file(log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {log_config}: {e}"))?;
    } else {
        let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
        let config = log4rs::Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}
