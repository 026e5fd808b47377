//! Encrypt or decrypt checkout `data` tokens with the configured passphrase.
//!
//! ```text
//! checkout-token encrypt product=tirzepatida-60mg nome=Maria email=maria@example.com
//! checkout-token decrypt <token>
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use quiz_funnel::{FunnelConfig, cipher::Record, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "checkout-token", about = "Encrypt or decrypt checkout data tokens")]
struct Cli {
    /// Passphrase to use instead of FUNNEL_CHECKOUT_SECRET.
    #[arg(long, global = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt `key=value` pairs into a token.
    Encrypt {
        #[arg(required = true, value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Decrypt a token and print its record as JSON.
    Decrypt { token: String },
}

fn parse_fields(fields: &[String]) -> anyhow::Result<Record> {
    let mut record = Record::new();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            bail!("expected KEY=VALUE, got '{field}'");
        };
        if key.is_empty() {
            bail!("empty key in '{field}'");
        }
        record.insert(key.to_string(), value.to_string());
    }
    Ok(record)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = FunnelConfig::from_env().context("loading configuration")?;
    if let Some(secret) = cli.secret {
        config.checkout_secret = secret;
    }
    let cipher = config.cipher();

    match cli.command {
        Command::Encrypt { fields } => {
            let record = parse_fields(&fields)?;
            println!("{}", cipher.encrypt(&record)?);
        }
        Command::Decrypt { token } => {
            let record = cipher.decrypt(&token).context("decrypting token")?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
