use clap::Parser;
use folio::core::config::{self, CliOverrides, FolioConfig};
use folio::core::lang::Lang;
use folio::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "folio", about = "Personal site in the terminal")]
struct Args {
    /// Site root: an http(s) URL or a local directory
    #[arg(short, long)]
    site: Option<String>,

    /// Content language (overrides the saved preference)
    #[arg(short, long, value_enum)]
    lang: Option<Lang>,

    /// Page to open, e.g. `#skills` or `?page=skills`
    #[arg(long)]
    location: Option<String>,

    /// Fragment file extension
    #[arg(long)]
    ext: Option<String>,

    /// Log level written to folio.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to folio.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("folio.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        FolioConfig::default()
    });

    let cli = CliOverrides {
        site: args.site,
        lang: args.lang,
        fragment_ext: args.ext,
        location: args.location,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Folio starting up with site: {}", resolved.site);

    tui::run(resolved)
}
