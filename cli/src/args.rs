//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use fint_shared::config::AppConfig;

/// Default location of the auth token file
pub const DEFAULT_TOKEN_FILE: &str = ".fint/tokens.json";

#[derive(Parser, Debug)]
#[command(name = "fint-otp")]
#[command(version, about = "Verify a FINT account with the one-time code sent by email")]
pub struct Cli {
    /// Email address the code was sent to
    #[arg(long)]
    pub email: String,

    /// TOML file layered over the built-in configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of digits in the code (4 or 6)
    #[arg(long)]
    pub code_length: Option<usize>,

    /// Where accepted auth tokens are saved
    #[arg(long, default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,
}

impl Cli {
    /// Apply flags that override configuration values
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(digits) = self.code_length {
            config.otp.code_length = digits;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::try_parse_from(["fint-otp", "--email", "user@example.com"]).unwrap();
        assert_eq!(cli.email, "user@example.com");
        assert_eq!(cli.config, None);
        assert_eq!(cli.code_length, None);
        assert_eq!(cli.token_file, PathBuf::from(DEFAULT_TOKEN_FILE));
    }

    #[test]
    fn test_email_is_required() {
        assert!(Cli::try_parse_from(["fint-otp"]).is_err());
    }

    #[test]
    fn test_code_length_override() {
        let cli = Cli::try_parse_from([
            "fint-otp",
            "--email",
            "user@example.com",
            "--code-length",
            "6",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.otp.code_length, 6);
    }
}
