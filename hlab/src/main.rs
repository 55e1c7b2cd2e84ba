use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hlab_frontend::settings::{Page, Settings, DEFAULT_API_URL};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Initialization error")]
    Initialization,
}

#[tokio::main]
async fn main() {
    let logpath = match get_logging_path() {
        Ok(it) => it,
        Err(err) => {
            eprintln!("{}: cache directory not resolvable", err);
            return;
        }
    };

    let logfile = tracing_appender::rolling::daily(logpath, "log");
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_writer(logfile)
        .init();

    debug!("starting application");

    let mut settings = Settings::default();
    map_args_to_settings(&cli().get_matches(), &mut settings);

    debug!("settings: {:?}", settings);

    match hlab_frontend::run(settings).await {
        Ok(()) => {
            debug!("closing application");
        }
        Err(err) => {
            error!("closing application with error: {:?}", err);
            eprintln!("hlab: {}", err);
        }
    }
}

fn cli() -> Command {
    Command::new("hlab")
        .about("hlab - homelab dashboard for proxmox, docker and storage in your terminal")
        .args([
            Arg::new("url")
                .long("url")
                .short('u')
                .env("HLAB_URL")
                .action(ArgAction::Set)
                .default_value(DEFAULT_API_URL)
                .help("base url of the homelab api"),
            Arg::new("interval")
                .long("interval")
                .short('i')
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .default_value("60")
                .help("poll interval in seconds, clamped to 30..=120"),
            Arg::new("timeout")
                .long("timeout")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64).range(1..))
                .default_value("10")
                .help("request timeout in seconds"),
            Arg::new("page")
                .long("page")
                .short('p')
                .action(ArgAction::Set)
                .value_parser(value_parser!(Page))
                .help("page shown on startup (dashboard, docker, storage, docs, scripts, media, recommendations)"),
        ])
}

fn map_args_to_settings(args: &ArgMatches, settings: &mut Settings) {
    if let Some(url) = args.get_one::<String>("url") {
        settings.api_url = url.to_owned();
    }

    if let Some(interval) = args.get_one::<u64>("interval") {
        settings.set_poll_interval(*interval);
    }

    if let Some(timeout) = args.get_one::<u64>("timeout") {
        settings.request_timeout = Duration::from_secs(*timeout);
    }

    if let Some(page) = args.get_one::<Page>("page") {
        settings.startup_page = *page;
    }
}

fn get_logging_path() -> Result<String, Error> {
    let cache_dir = match dirs::cache_dir() {
        Some(cache_dir) => match cache_dir.to_str() {
            Some(cache_dir_string) => cache_dir_string.to_string(),
            None => return Err(Error::Initialization),
        },
        None => return Err(Error::Initialization),
    };

    Ok(format!("{}{}", cache_dir, "/hlab/logs"))
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use hlab_frontend::settings::{Page, Settings};

    #[test]
    fn args_map_onto_settings() {
        let args = super::cli().get_matches_from([
            "hlab",
            "--url",
            "http://nas:5000",
            "--interval",
            "500",
            "--timeout",
            "3",
            "--page",
            "media",
        ]);

        let mut settings = Settings::default();
        super::map_args_to_settings(&args, &mut settings);

        assert_eq!(settings.api_url, "http://nas:5000");
        assert_eq!(settings.poll_interval, Duration::from_secs(120));
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.startup_page, Page::MediaRequests);
    }
}
