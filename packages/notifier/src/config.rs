use std::env;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

/// Values the CLI may supply up front. Anything absent falls back to the
/// environment, then to an interactive prompt.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub remote_instance: Option<String>,
    pub reason: Option<String>,
    pub suspension_date: Option<String>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub local_instance: String,
    pub access_token: String,
    pub remote_instance: String,
    pub reason: String,
    pub suspension_date: NaiveDateTime,
}

impl Config {
    /// Resolve configuration from CLI overrides and environment variables,
    /// prompting interactively for anything still missing.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let database_url = env_or_prompt(
            "DATABASE_URL",
            "Specify the postgres connection string",
        )?;
        let local_instance = env_or_prompt(
            "LOCAL_INSTANCE",
            "What's your local instance? (Will only be used to message affected users via the API)",
        )?;
        let access_token = env_or_prompt(
            "ACCESS_TOKEN",
            "What's your access token for the API? (Will only be used to message affected users via the API)",
        )?;
        let remote_instance = override_or_env_or_prompt(
            overrides.remote_instance,
            "REMOTE_INSTANCE",
            "What's the remote instance that will be suspended?",
        )?;
        let reason = override_or_env_or_prompt(
            overrides.reason,
            "SUSPENSION_REASON",
            "What's the reason for suspension? (Will be used in the DM, do not end it with a period)",
        )?;
        let suspension_date = resolve_suspension_date(overrides.suspension_date)?;

        Ok(Self {
            database_url,
            local_instance,
            access_token,
            remote_instance,
            reason,
            suspension_date,
        })
    }
}

/// Parse an ISO 8601 date or date-time. A bare date resolves to midnight.
pub fn parse_suspension_date(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("'{raw}' is not an ISO 8601 date"))?;
    Ok(date.and_time(NaiveTime::MIN))
}

fn resolve_suspension_date(override_value: Option<String>) -> Result<NaiveDateTime> {
    let initial = override_value.or_else(|| env::var("SUSPENSION_DATE").ok());
    if let Some(raw) = initial {
        match parse_suspension_date(&raw) {
            Ok(date) => return Ok(date),
            Err(_) => println!("{}", "Invalid suspension date".red()),
        }
    }

    // Re-prompt until the input parses, like the other missing settings
    loop {
        let raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("What's the suspension date? (ISO 8601 format)")
            .interact_text()
            .context("Failed to read suspension date")?;

        match parse_suspension_date(&raw) {
            Ok(date) => return Ok(date),
            Err(_) => println!("{}", "Invalid suspension date".red()),
        }
    }
}

fn env_or_prompt(var: &str, prompt: &str) -> Result<String> {
    if let Ok(value) = env::var(var) {
        if !value.is_empty() {
            return Ok(value);
        }
    }

    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .with_context(|| format!("Failed to read {var}"))
}

fn override_or_env_or_prompt(
    override_value: Option<String>,
    var: &str,
    prompt: &str,
) -> Result<String> {
    match override_value {
        Some(value) => Ok(value),
        None => env_or_prompt(var, prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_time_with_t_separator() {
        let dt = parse_suspension_date("2026-09-01T12:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-09-01 12:30:00");
    }

    #[test]
    fn parses_date_time_with_space_separator() {
        let dt = parse_suspension_date("2026-09-01 12:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-09-01 12:30:00");
    }

    #[test]
    fn bare_date_resolves_to_midnight() {
        let dt = parse_suspension_date("2026-09-01").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-09-01 00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_suspension_date("next tuesday").is_err());
        assert!(parse_suspension_date("2026-13-40").is_err());
    }
}
