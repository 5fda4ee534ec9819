use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use env_logger::{Builder, Env};
use structopt::StructOpt;

use ferroftp::{FtpServer, LogLevel, MemDriverFactory, ServerConfig, StdFtpLogger};

/// Command-line arguments
#[derive(Debug, StructOpt)]
#[structopt(name = "ferroftp-mem", about = "An in-memory demo FTP server.")]
struct Cli {
    /// Path to the configuration file
    #[structopt(short, long, default_value = "")]
    config: String,

    /// Log every command and reply
    #[structopt(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::from_args();

    // Initialize the logger with a custom format
    Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .init();

    let config = if args.config.is_empty() {
        ServerConfig {
            server_name: String::from("ferroftp-mem, the in memory FTP server"),
            listen_port: 2121,
            pasv_min_port: 60200,
            pasv_max_port: 60300,
            ..ServerConfig::default()
        }
    } else {
        ServerConfig::load_from_file(&args.config)?
    };

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let logger = Arc::new(StdFtpLogger::with_level(level));

    let server = Arc::new(FtpServer::new(
        config,
        Box::new(MemDriverFactory),
        Some(logger),
    ));

    let closer = Arc::clone(&server);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Exiting...");
            closer.close();
        }
    });

    server.listen_and_serve().await
}
