//! aer-crypt: offline tool for Aer client-side encryption.
//!
//! Derives the token key, seals text into `{ciphertext, nonce}` blobs and
//! opens blobs produced by any Aer client. Output is JSON for scripting.

use aer_crypto::{
    decrypt, derive_key, derive_key_from_user_id, encrypt, open_blob, user_id_from_token,
    DerivedKey, EncryptedBlob,
};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "aer-crypt")]
#[command(author, version, about = "Client-side encryption tools for Aer")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the key comes from.
#[derive(Args)]
struct KeySource {
    /// Auth token (aer_{userId}); falls back to AER_AUTH_TOKEN
    #[arg(short, long, env = "AER_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Bare user id instead of a token
    #[arg(short, long, conflicts_with = "token")]
    user_id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the base64 key derived from a token
    DeriveKey {
        #[command(flatten)]
        key: KeySource,
    },

    /// Encrypt text into a {ciphertext, nonce} blob
    Encrypt {
        #[command(flatten)]
        key: KeySource,

        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Decrypt a {ciphertext, nonce} blob
    Decrypt {
        #[command(flatten)]
        key: KeySource,

        /// File holding the blob JSON (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the placeholder instead of failing when the blob cannot be opened
        #[arg(long)]
        lenient: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::DeriveKey { key } => cmd_derive_key(&key)?,
        Commands::Encrypt { key, input } => cmd_encrypt(&key, input.as_deref())?,
        Commands::Decrypt {
            key,
            input,
            lenient,
        } => cmd_decrypt(&key, input.as_deref(), lenient)?,
    }

    Ok(())
}

fn resolve_key(source: &KeySource) -> Result<(DerivedKey, String), Box<dyn std::error::Error>> {
    if let Some(ref user_id) = source.user_id {
        return Ok((derive_key_from_user_id(user_id), user_id.clone()));
    }

    let token = source
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or("No token given; pass --token or set AER_AUTH_TOKEN")?;
    let token = token.trim();

    Ok((derive_key(token)?, user_id_from_token(token)?.to_string()))
}

fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn cmd_derive_key(source: &KeySource) -> Result<(), Box<dyn std::error::Error>> {
    let (key, user_id) = resolve_key(source)?;

    let output = serde_json::json!({
        "user_id": user_id,
        "key": key.to_base64(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn cmd_encrypt(source: &KeySource, input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (key, _) = resolve_key(source)?;
    let plaintext = read_input(input)?;

    let blob = encrypt(&plaintext, &key)?;

    println!("{}", serde_json::to_string_pretty(&blob)?);

    Ok(())
}

fn cmd_decrypt(
    source: &KeySource,
    input: Option<&Path>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (key, _) = resolve_key(source)?;
    let blob: EncryptedBlob = serde_json::from_str(&read_input(input)?)?;

    if lenient {
        let text = decrypt(&blob, &key)
            .unwrap_or_else(|| "[Encrypted content – cannot preview]".to_string());
        println!("{}", text);
        return Ok(());
    }

    println!("{}", open_blob(&blob, &key)?);

    Ok(())
}
