mod bot;
mod config;
mod errors;
mod homework;
mod logging;
mod notification;
mod practicum;

use crate::bot::HomeworkBot;
use crate::config::AppConfig;
use crate::notification::TelegramClient;
use crate::practicum::PracticumClient;
use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, Command};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// Poll interval used in watch mode when `retry_time` is not configured.
const WATCH_RETRY_TIME: u64 = 600;

struct Options {
    config: Option<PathBuf>,
    from_date: i64,
    watch: bool,
}

fn options() -> Options {
    let matches = Command::new("Homework Status Notifier")
        .about("Polls the homework review service and reports status changes to Telegram")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("from-date")
                .long("from-date")
                .value_name("TIMESTAMP")
                .help("Reports changes made after this unix timestamp [default: now]")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .help("Keeps polling instead of exiting after the first check")
                .action(ArgAction::SetTrue),
        )
        .get_matches();
    Options {
        config: matches.get_one::<PathBuf>("config").cloned(),
        from_date: matches
            .get_one::<i64>("from-date")
            .copied()
            .unwrap_or_else(|| Utc::now().timestamp()),
        watch: matches.get_flag("watch"),
    }
}

fn configuration(options: &Options) -> AppConfig {
    let app_config = config::load_config(options.config.as_deref()).and_then(|app_config| {
        logging::init(&app_config)?;
        Ok(app_config)
    });
    match app_config {
        Ok(app_config) => app_config,
        Err(e) => {
            logging::init_stderr();
            error!("exiting because of {}", e);
            process::exit(1);
        }
    }
}

fn poll_interval(retry_time: u64, watch: bool) -> Duration {
    if watch && retry_time == 0 {
        warn!(
            "retry_time is not set, polling every {} seconds",
            WATCH_RETRY_TIME
        );
        return Duration::from_secs(WATCH_RETRY_TIME);
    }
    if watch && retry_time < WATCH_RETRY_TIME {
        warn!(
            "polling every {} seconds, the homework service may throttle requests",
            retry_time
        );
    }
    Duration::from_secs(retry_time)
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("unable to load .env: {}", e);
        }
    }
    let options = options();
    let app_config = configuration(&options);
    info!("starting, watch mode: {}", options.watch);

    let practicum = PracticumClient::new(
        app_config.endpoint.clone(),
        app_config.practicum_token.clone(),
    );
    let telegram = TelegramClient::new(&app_config.telegram_api_url, &app_config.telegram_token);
    let mut bot = HomeworkBot::new(practicum, telegram, app_config.telegram_chat_id.clone());

    let retry_time = poll_interval(app_config.retry_time, options.watch);
    let mut from_date = options.from_date;
    loop {
        from_date = bot.poll(from_date).await;
        tokio::time::sleep(retry_time).await;
        if !options.watch {
            break;
        }
    }
    info!("done");
}
