use clap::Parser;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

use crate::types::board::AnswerLockScope;

/// Q&A board server
#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file, without extension
    #[clap(short, long, default_value = "setup")]
    pub config: String,
    /// Which log level to use: error, warn, info, debug or trace
    #[clap(short, long)]
    pub log_level: Option<String>,
    /// Address to bind the web server to
    #[clap(long)]
    pub host: Option<String>,
    /// Which port the web server listens on
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Answer input locking: per_question or board
    #[clap(long)]
    pub answer_lock: Option<AnswerLockScope>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub answer_lock: AnswerLockScope,
}

impl Config {
    /// Builds the settings from defaults, then the settings file, then `BOARD_*`
    /// environment variables, then command line flags.
    pub fn new() -> Result<Config, handle_errors::Error> {
        Config::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Config, handle_errors::Error> {
        let settings = config::Config::builder()
            .set_default("log_level", "warn")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3030)?
            .set_default("answer_lock", "per_question")?
            .add_source(config::File::with_name(&args.config).required(false))
            .add_source(config::Environment::with_prefix("BOARD"))
            .build()?;

        let mut config = settings.try_deserialize::<Config>()?;

        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }
        if let Some(host) = args.host {
            config.host = host;
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(answer_lock) = args.answer_lock {
            config.answer_lock = answer_lock;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, handle_errors::Error> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(handle_errors::Error::InvalidAddress)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn log_filter(&self) -> String {
        format!(
            "handle_errors={},question_board={},warp={}",
            self.log_level, self.log_level, self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            config: "does-not-exist".to_string(),
            ..Args::default()
        }
    }

    #[test]
    fn defaults_apply_without_a_settings_file() {
        let config = Config::from_args(args()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3030);
        assert_eq!(config.answer_lock, AnswerLockScope::PerQuestion);
    }

    #[test]
    fn flags_override_settings() {
        let config = Config::from_args(Args {
            log_level: Some("debug".to_string()),
            port: Some(8080),
            answer_lock: Some(AnswerLockScope::Board),
            ..args()
        })
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.answer_lock, AnswerLockScope::Board);
        assert_eq!(
            config.log_filter(),
            "handle_errors=debug,question_board=debug,warp=debug"
        );
    }

    #[test]
    fn host_must_be_an_ip_address() {
        let config = Config::from_args(Args {
            host: Some("localhost".to_string()),
            ..args()
        })
        .unwrap();
        assert!(matches!(
            config.socket_addr(),
            Err(handle_errors::Error::InvalidAddress(_))
        ));

        let config = Config::from_args(args()).unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3030");
    }
}
