use clap::Parser;
use netaddr::config::{Args, DEFAULT_LOG_CONFIG, ENV_LOG_CONFIG};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let path = std::env::var(ENV_LOG_CONFIG).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.into());
            if netaddr::init_logging(&path).is_ok() {
                log::error!("Invalid arguments: {}", e.render());
            }
            e.exit()
        }
    };
    let config = args.config();

    if let Err(e) = netaddr::init_logging(&config.log_config) {
        eprintln!("{e}");
    }
    log::info!("#Start main()");

    netaddr::run(&args, &config).map_err(|e| {
        log::error!("{e}");
        e
    })
}
