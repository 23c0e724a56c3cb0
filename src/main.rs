// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tourdesk CLI entrypoint.
//!
//! Serves the guide tour endpoints over HTTP at `http://<bind>:<port>/guide/tours`.
//! Use `--demo` to start with a demo catalog and one tour owned by guide 1.

use std::error::Error;
use std::net::IpAddr;

use tourdesk::config::{ServerConfig, DEFAULT_LOG_FILTER, DEFAULT_PORT, LOG_FILTER_ENV};
use tourdesk::model::Catalog;
use tourdesk::store::TourRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--bind <addr>] [--port <port>] [--demo] [--log-json]\n\n--bind selects the listen address (default 127.0.0.1).\n--port selects the port (0 = ephemeral; default {DEFAULT_PORT}).\n--demo seeds the repository with a demo catalog and one tour owned by guide 1.\n--log-json writes logs as JSON lines.\n\n{LOG_FILTER_ENV} sets the log filter (default `{DEFAULT_LOG_FILTER}`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    bind: Option<IpAddr>,
    port: Option<u16>,
    demo: bool,
    log_json: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bind" => {
                if options.bind.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.bind = Some(raw.parse().map_err(|_| ())?);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.port = Some(raw.parse().map_err(|_| ())?);
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--log-json" => {
                if options.log_json {
                    return Err(());
                }
                options.log_json = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn server_config(options: &CliOptions) -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        bind: options.bind.unwrap_or(defaults.bind),
        port: options.port.unwrap_or(defaults.port),
        ..defaults
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tourdesk".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing(options.log_json);

        let config = server_config(&options);
        let repository = if options.demo {
            TourRepository::demo(config.uploads)
        } else {
            TourRepository::new(Catalog::demo(), config.uploads)
        };
        let addr = config.socket_addr();
        let state = tourdesk::http::AppState::new(repository, config);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(addr = %listener.local_addr()?, demo = options.demo, "serving tour endpoints");

            let router = tourdesk::http::router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    info!("shutting down");
                })
                .await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("tourdesk: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::{parse_options, server_config, CliOptions};

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_all_flags_in_any_order() {
        let raw = ["--log-json", "--port", "0", "--demo", "--bind", "0.0.0.0"];
        let options = parse_options(args(&raw)).expect("parse options");
        assert_eq!(options.bind, Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
        assert_eq!(options.port, Some(0));
        assert!(options.demo);
        assert!(options.log_json);
    }

    #[test]
    fn unset_flags_fall_back_to_defaults() {
        let config = server_config(&parse_options(args(&["--port", "9000"])).expect("parse"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn rejects_unknown_and_positional_args() {
        parse_options(args(&["--nope"])).unwrap_err();
        parse_options(args(&["some/dir"])).unwrap_err();
    }

    #[test]
    fn rejects_bad_values() {
        parse_options(args(&["--port", "70000"])).unwrap_err();
        parse_options(args(&["--bind", "localhost"])).unwrap_err();
        parse_options(args(&["--port"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--demo", "--demo"])).unwrap_err();
        parse_options(args(&["--log-json", "--log-json"])).unwrap_err();
        parse_options(args(&["--port", "1", "--port", "2"])).unwrap_err();
    }
}
