use clap::Parser;
use dream_recorder::core::config::{self, CliOverrides};
use dream_recorder::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "dream-recorder", about = "Turn a scene from your dream into a video")]
struct Args {
    /// Base URL of the video-generation service
    #[arg(short, long)]
    url: Option<String>,

    /// Give up on a request after this many seconds (0 waits forever)
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let config = config::resolve(
        &file_config,
        CliOverrides {
            base_url: args.url.as_deref(),
            request_timeout_secs: args.timeout,
        },
    );

    // File logger only: anything on stdout/stderr would corrupt the TUI.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    // Config was loaded before the logger existed; replay what it had to say.
    for notice in &config.notices {
        log::log!(notice.level, "{}", notice.message);
    }

    log::info!(
        "Dream Recorder starting up (service={}{}, timeout={:?})",
        config.base_url,
        config.endpoint,
        config.request_timeout
    );

    tui::run(config)
}
