use anyhow::{Context, Result};
use clap::Parser;
use postboard::app::App;
use postboard::cli::Cli;
use postboard::config::Config;
use postboard::services::HttpPostsService;
use postboard::styles::{init_theme, ThemeType};
use std::sync::Arc;
use tracing::info;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = postboard::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    let log_file = log_dir.join("postboard.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout belongs to the TUI, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&log_dir, "postboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config_path = cli.config_path();
    let config = Config::load_or_create(&config_path)
        .context("Failed to load configuration")?
        .with_overrides(cli.base_url.clone(), cli.theme.clone());

    let theme_type = if std::env::var_os("NO_COLOR").is_some() {
        ThemeType::NoColor
    } else {
        config.theme.parse().unwrap_or_default()
    };
    init_theme(theme_type);

    let result = if cli.launches_tui() {
        // Print log location before TUI starts (this will be visible briefly)
        eprintln!("Logs are being written to: {:?}", log_file);
        eprintln!("View logs in real-time: tail -f {:?}", log_file);

        info!("Starting postboard against {}", config.api.base_url);
        info!("Keymap preset: {}", config.keymap.preset.name());
        let service = Arc::new(HttpPostsService::new(&config.api)?);
        App::new(config, service).and_then(|mut app| app.run())
    } else {
        cli.execute(&config)
    };

    drop(guard);

    result
}
