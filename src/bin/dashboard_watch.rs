// Terminal dashboard - Drives the dashboard controller against a running server
use meta_dashboard::application::dashboard_controller::{DashboardController, DashboardEvent};
use meta_dashboard::domain::platform::{Platform, Tab};
use meta_dashboard::domain::settings::DashboardSettings;
use meta_dashboard::infrastructure::config::load_app_config;
use meta_dashboard::infrastructure::http_dashboard_api::HttpDashboardApi;
use meta_dashboard::infrastructure::refresh_timer::TokioRefreshTimer;
use meta_dashboard::infrastructure::settings_store::FileSettingsStore;
use meta_dashboard::presentation::terminal_view::TerminalView;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

enum Command {
    Event(DashboardEvent),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["quit"] | ["exit"] => Some(Command::Quit),
        ["refresh"] => Some(Command::Event(DashboardEvent::Refresh)),
        ["refresh", platform] => platform
            .parse::<Platform>()
            .ok()
            .map(|platform| Command::Event(DashboardEvent::RefreshPlatform(platform))),
        ["settings"] => Some(Command::Event(DashboardEvent::OpenSettings)),
        ["close"] => Some(Command::Event(DashboardEvent::CloseSettings)),
        ["set", token, page_id, user_id, minutes] => {
            let minutes = minutes.parse().ok()?;
            Some(Command::Event(DashboardEvent::SaveSettings(
                DashboardSettings::new(*token, *page_id, *user_id, minutes),
            )))
        }
        [tab] => tab
            .parse::<Tab>()
            .ok()
            .map(|tab| Command::Event(DashboardEvent::SelectTab(tab))),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_app_config()?;
    let (timer, mut ticks) = TokioRefreshTimer::channel();

    let mut controller = DashboardController::new(
        HttpDashboardApi::new(config.dashboard.api_base_url.clone()),
        FileSettingsStore::new(config.dashboard.settings_file.clone()),
        timer,
        TerminalView::new(std::io::stdout()),
    );
    controller.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(()) = ticks.recv() => controller.handle(DashboardEvent::Tick).await,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Event(event)) => controller.handle(event).await,
                    None => eprintln!(
                        "commands: overview|facebook|instagram|messenger|threads, refresh [platform], settings, set <token> <page_id> <user_id> <minutes>, quit"
                    ),
                }
            }
        }
    }

    Ok(())
}
