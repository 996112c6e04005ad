use crate::error::{config::ConfigError, AppError};

const DEFAULT_TASK_QUEUE_CAPACITY: usize = 1000;
const DEFAULT_FORM_STATE_MAX_AGE_MINUTES: u64 = 30;
const DEFAULT_FORM_STATE_SWEEP_INTERVAL_MINUTES: u64 = 30;

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    /// Guild that receives slash commands in development; unset registers globally.
    pub discord_guild_id: Option<u64>,
    pub environment: String,

    /// Channel where `/support` tickets are posted.
    pub support_channel_id: Option<u64>,

    pub task_queue_capacity: usize,
    pub form_state_max_age_minutes: u64,
    pub form_state_sweep_interval_minutes: u64,

    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_guild_id: optional_number("DISCORD_GUILD_ID")?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            support_channel_id: optional_number("SUPPORT_CHANNEL_ID")?,
            task_queue_capacity: positive_or("TASK_QUEUE_CAPACITY", DEFAULT_TASK_QUEUE_CAPACITY)?,
            form_state_max_age_minutes: positive_or(
                "FORM_STATE_MAX_AGE_MINUTES",
                DEFAULT_FORM_STATE_MAX_AGE_MINUTES,
            )?,
            form_state_sweep_interval_minutes: positive_or(
                "FORM_STATE_SWEEP_INTERVAL_MINUTES",
                DEFAULT_FORM_STATE_SWEEP_INTERVAL_MINUTES,
            )?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Whether slash commands should be registered globally rather than per guild.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Age after which an unfinished wizard is swept.
    pub fn form_state_max_age(&self) -> chrono::Duration {
        i64::try_from(self.form_state_max_age_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .unwrap_or(chrono::Duration::MAX)
    }

    pub fn form_state_sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.form_state_sweep_interval_minutes.saturating_mul(60))
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

fn positive_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let value = optional_number::<T>(name)?.unwrap_or(default);
    if value <= T::default() {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: std::env::var(name).unwrap_or_default(),
        });
    }
    Ok(value)
}
