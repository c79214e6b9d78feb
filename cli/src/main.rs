mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use olla_tui::AppExitInfo;
use olla_tui::AppOptions;
use olla_tui::ExitReason;
use olla_tui::MenuKey;
use olla_tui::OllaTui;

use crate::config::ConfigStore;
use crate::config::OllaConfig;

/// Menus that mount a screen and can be opened directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[clap(rename_all = "kebab-case")]
enum CliScreen {
    #[default]
    MyPage,
    Cards,
    Diary,
}

impl CliScreen {
    fn as_menu(self) -> MenuKey {
        match self {
            CliScreen::MyPage => MenuKey::MyPage,
            CliScreen::Cards => MenuKey::CardRecommendation,
            CliScreen::Diary => MenuKey::ConsumptionDiary,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "OLLA personal-finance companion in the terminal")]
struct Cli {
    /// Delay before the chat bot answers, in milliseconds. Overrides `reply_delay_ms` from the
    /// config file.
    #[arg(long, env = "OLLA_REPLY_DELAY_MS")]
    reply_delay_ms: Option<u64>,

    /// Screen shown on startup.
    #[arg(long, value_enum, default_value_t)]
    screen: CliScreen,

    /// Config file to read instead of `~/.olla/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = match dirs::home_dir() {
        Some(home) => match logging::init(&logging::default_log_dir(&home)) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("warning: failed to set up logging: {err:#}");
                None
            }
        },
        None => None,
    };

    let store = match cli.config.clone() {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::new_default()?,
    };
    let config = store.load()?;
    tracing::info!(path = %store.path().display(), ?config, "loaded config");

    let options = build_options(&cli, config);

    let mut ui = OllaTui::new()?;
    let result = ui.run(options).await;
    // Restore the terminal before printing anything.
    drop(ui);

    let exit_info = result?;
    print_exit_summary(&exit_info);
    if let ExitReason::Fatal(message) = &exit_info.exit_reason {
        tracing::error!("session ended: {message}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn build_options(cli: &Cli, config: OllaConfig) -> AppOptions {
    let defaults = AppOptions::default();
    let reply_delay = cli
        .reply_delay_ms
        .or(config.reply_delay_ms)
        .map_or(defaults.reply_delay, Duration::from_millis);

    AppOptions {
        reply_delay,
        user_name: config.user_name.unwrap_or(defaults.user_name),
        initial_menu: cli.screen.as_menu(),
    }
}

fn print_exit_summary(exit_info: &AppExitInfo) {
    match &exit_info.exit_reason {
        ExitReason::UserRequested => {
            println!(
                "OLLA closed. {} chat message(s) sent, {} diary entr{} written.",
                exit_info.messages_sent,
                exit_info.diary_entries_written,
                if exit_info.diary_entries_written == 1 {
                    "y"
                } else {
                    "ies"
                },
            );
        }
        ExitReason::Fatal(message) => {
            eprintln!("OLLA stopped unexpectedly: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("olla").chain(args.iter().copied()))
            .expect("parse args")
    }

    #[test]
    fn screen_flag_maps_to_menu() {
        assert_eq!(parse(&[]).screen.as_menu(), MenuKey::MyPage);
        assert_eq!(
            parse(&["--screen", "cards"]).screen.as_menu(),
            MenuKey::CardRecommendation
        );
        assert_eq!(
            parse(&["--screen", "diary"]).screen.as_menu(),
            MenuKey::ConsumptionDiary
        );
    }

    #[test]
    fn unknown_screen_is_rejected() {
        assert!(Cli::try_parse_from(["olla", "--screen", "analysis"]).is_err());
    }

    #[test]
    fn flag_overrides_config_delay() {
        let cli = parse(&["--reply-delay-ms", "10"]);
        let config = OllaConfig {
            reply_delay_ms: Some(2_000),
            user_name: Some("김하늘".to_string()),
        };
        let options = build_options(&cli, config);
        assert_eq!(options.reply_delay, Duration::from_millis(10));
        assert_eq!(options.user_name, "김하늘");
    }

    #[test]
    fn config_delay_applies_without_flag() {
        let cli = Cli {
            reply_delay_ms: None,
            screen: CliScreen::Diary,
            config: None,
        };
        let config = OllaConfig {
            reply_delay_ms: Some(2_000),
            user_name: None,
        };
        let options = build_options(&cli, config);
        assert_eq!(options.reply_delay, Duration::from_millis(2_000));
        assert_eq!(options.user_name, AppOptions::default().user_name);
        assert_eq!(options.initial_menu, MenuKey::ConsumptionDiary);
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cli = Cli {
            reply_delay_ms: None,
            screen: CliScreen::MyPage,
            config: None,
        };
        let options = build_options(&cli, OllaConfig::default());
        assert_eq!(options.reply_delay, Duration::from_millis(600));
    }
}
