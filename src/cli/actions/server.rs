use crate::{api, cli::globals::GlobalArgs};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;
use url::Url;

pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub auth_url: String,
    pub auth_token: SecretString,
    pub frontend_url: String,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &redact_dsn(&self.dsn))
            .field("auth_url", &self.auth_url)
            .field("auth_token", &"***")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database or auth client cannot be set up, or the
/// server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let mut globals = GlobalArgs::new(args.auth_url, args.frontend_url);
    globals.set_token(args.auth_token);

    api::new(args.port, args.dsn, &globals).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dsn", redact_dsn(&args.dsn)),
        ("auth_url", args.auth_url.clone()),
        (
            "auth_token_set",
            (!args.auth_token.expose_secret().is_empty()).to_string(),
        ),
        ("frontend_url", args.frontend_url.clone()),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dsn_password_is_redacted() {
        assert_eq!(
            redact_dsn("postgres://salon:hunter2@db:5432/salon"),
            "postgres://salon:REDACTED@db:5432/salon"
        );
        assert_eq!(
            redact_dsn("postgres://salon@db:5432/salon"),
            "postgres://salon@db:5432/salon"
        );
        assert_eq!(redact_dsn("::nope"), "invalid-dsn");
    }

    #[test]
    fn short_commit_truncates() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("abc"), "abc");
    }
}
