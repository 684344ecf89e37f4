use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_AUTH_TOKEN: &str = "auth-token";
pub const ARG_FRONTEND_URL: &str = "frontend-url";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Base URL of the auth/session service")
                .env("SALONNAV_AUTH_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_TOKEN)
                .long(ARG_AUTH_TOKEN)
                .help("Service key sent to the auth service as the apikey header")
                .env("SALONNAV_AUTH_TOKEN")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_FRONTEND_URL)
                .long(ARG_FRONTEND_URL)
                .help("Dashboard origin allowed by CORS")
                .env("SALONNAV_FRONTEND_URL")
                .default_value("http://localhost:3000"),
        )
}

pub struct Options {
    pub url: String,
    pub token: SecretString,
    pub frontend_url: String,
}

impl Options {
    /// # Errors
    /// Returns an error if the auth service URL is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_AUTH_URL)
            .cloned()
            .context("missing required argument: --auth-url")?;

        let token = matches
            .get_one::<String>(ARG_AUTH_TOKEN)
            .cloned()
            .map(SecretString::from)
            .unwrap_or_default();

        let frontend_url = matches
            .get_one::<String>(ARG_FRONTEND_URL)
            .cloned()
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            url,
            token,
            frontend_url,
        })
    }
}
