mod gateway;

use clap::{Parser, Subcommand};
use standup_channels::telegram::TelegramChannel;
use standup_core::config::{self, shellexpand, ConfigSource, StandupConfig};
use standup_core::report::ReportFormatter;
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "standup",
    version,
    about = "Standup — turns daily work reports into team announcements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot.
    Start,
    /// Check configuration.
    Status,
    /// Render a report from a file (or stdin) and print the announcement.
    Render {
        /// Report file. Reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let (cfg, source) = config::load(&cli.config)?;
    let _log_guard = init_tracing(&cfg.standup)?;
    if source == ConfigSource::Defaults {
        tracing::info!("Config file not found at {}, using defaults", cli.config);
    }

    match cli.command {
        Commands::Start => {
            let tg = match cfg.channel.telegram {
                Some(ref tg) if tg.enabled && !tg.bot_token.is_empty() => tg.clone(),
                Some(ref tg) if tg.enabled => anyhow::bail!(
                    "BOT_TOKEN not found. Set it in the environment or as \
                     channel.telegram.bot_token in {}.",
                    cli.config
                ),
                _ => anyhow::bail!(
                    "No channels enabled. Enable [channel.telegram] in {}.",
                    cli.config
                ),
            };

            let mut channels: HashMap<String, Arc<dyn standup_core::traits::Channel>> =
                HashMap::new();
            channels.insert("telegram".to_string(), Arc::new(TelegramChannel::new(tg)));

            println!("{} — Starting bot...", cfg.standup.name);
            let gw = Arc::new(gateway::Gateway::new(channels, cfg.report.formatter()));
            if let Err(e) = gw.run().await {
                tracing::error!("bot stopped with a critical error: {e:#}");
                return Err(e);
            }
        }
        Commands::Status => {
            println!("{} — Status Check\n", cfg.standup.name);
            println!("Config: {}", cli.config);
            println!("Tracker: {}", cfg.report.tracker_url);
            println!();

            if let Some(ref tg) = cfg.channel.telegram {
                println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.bot_token.is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing bot_token"
                    } else {
                        "disabled"
                    }
                );
                if !tg.allowed_users.is_empty() {
                    println!("  allowed users: {}", tg.allowed_users.len());
                }
            } else {
                println!("  telegram: not configured");
            }
        }
        Commands::Render { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("failed to read {}: {e}", path.display())
                })?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let (output, code) = render_report(&cfg.report.formatter(), &text);
            println!("{output}");
            return Ok(ExitCode::from(code));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Render `text` for the `render` subcommand: the announcement and the
/// process exit code (1 when no tasks were recognized).
fn render_report(formatter: &ReportFormatter, text: &str) -> (String, u8) {
    let rendered = formatter.render(text);
    let code = if rendered.succeeded { 0 } else { 1 };
    (rendered.text, code)
}

/// Install the global subscriber: stderr always, plus an optional log file.
///
/// `RUST_LOG` wins over the configured level. The returned guard must live
/// until exit so buffered file output is flushed.
fn init_tracing(
    cfg: &StandupConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&cfg.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let mut guard = None;
    let file_layer = if cfg.log_file.trim().is_empty() {
        None
    } else {
        let path = PathBuf::from(shellexpand(cfg.log_file.trim()));
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("invalid log_file path: {}", cfg.log_file))?;
        std::fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::never(&dir, file_name);
        let (writer, g) = tracing_appender::non_blocking(appender);
        guard = Some(g);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use standup_core::report::UNRECOGNIZED_REPORT;

    #[test]
    fn test_render_report_success_exits_zero() {
        let (output, code) = render_report(
            &ReportFormatter::default(),
            "Отчет о трудозатратах за 05.01.2024\n1. ABC-1: Work",
        );
        assert_eq!(code, 0);
        assert!(output.contains("[ABC\\-1: Work](https://tracker.yandex.ru/ABC-1)"));
    }

    #[test]
    fn test_render_report_without_tasks_exits_one() {
        let (output, code) = render_report(&ReportFormatter::default(), "просто текст");
        assert_eq!(code, 1);
        assert_eq!(output, UNRECOGNIZED_REPORT);
    }

    #[test]
    fn test_render_report_uses_configured_tracker() {
        let (output, code) = render_report(
            &ReportFormatter::new("https://t.example/"),
            "1. XY-7: Fix",
        );
        assert_eq!(code, 0);
        assert!(output.contains("(https://t.example/XY-7)"));
    }
}
