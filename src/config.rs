use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;

use crate::{
    application::{
        handlers::broadcast_dispatcher::DispatchConfig,
        usecases::start_broadcast::StartBroadcastConfig,
    },
    infrastructure::messaging::telegram::DEFAULT_API_BASE,
};

pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    /// Left unset, the service still starts but rejects every broadcast.
    pub telegram_bot_token: Option<String>,
    pub telegram_api_base: String,
    pub batch_size: usize,
    pub stagger_ms: u64,
    pub batch_pause_ms: u64,
    pub progress_buffer: usize,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, &'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let batch_size = optional(&lookup, "BROADCAST_BATCH_SIZE", 25usize)
            .map_err(|_| "An error occured while parsing BROADCAST_BATCH_SIZE env param")?;
        if batch_size == 0 {
            return Err("BROADCAST_BATCH_SIZE must be at least 1");
        }

        Ok(Config {
            port: lookup("PORT")
                .ok_or("An error occured while getting PORT env param")?
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            scheme: lookup("SCHEME").ok_or("An error occured while getting SCHEME env param")?,
            host: lookup("HOST").ok_or("An error occured while getting HOST env param")?,
            telegram_bot_token: lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.trim().is_empty()),
            telegram_api_base: lookup("TELEGRAM_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            batch_size,
            stagger_ms: optional(&lookup, "BROADCAST_STAGGER_MS", 50)
                .map_err(|_| "An error occured while parsing BROADCAST_STAGGER_MS env param")?,
            batch_pause_ms: optional(&lookup, "BROADCAST_BATCH_PAUSE_MS", 2000)
                .map_err(|_| "An error occured while parsing BROADCAST_BATCH_PAUSE_MS env param")?,
            progress_buffer: optional(&lookup, "PROGRESS_BUFFER", 16usize)
                .map_err(|_| "An error occured while parsing PROGRESS_BUFFER env param")?
                .max(1),
        })
    }

    pub fn broadcast(&self) -> StartBroadcastConfig {
        StartBroadcastConfig {
            dispatch: DispatchConfig {
                batch_size: self.batch_size,
                stagger: Duration::from_millis(self.stagger_ms),
                batch_pause: Duration::from_millis(self.batch_pause_ms),
            },
            progress_buffer: self.progress_buffer,
        }
    }
}

fn optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T, T::Err>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse(),
        None => Ok(default),
    }
}
