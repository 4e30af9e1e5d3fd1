//! aer: command-line client for the Aer context store.
//!
//! Uploads end-to-end encrypted captures, runs ranked searches with local
//! previews, and exposes the content filter for long captures.

use aer_client::{logging, AerClient};
use aer_core::{normalize, CapturedArtifact, ClientConfig, TransportConfig};
use aer_crypto::derive_key_from_user_id;
use aer_search::{compose_insertion, filter_by_first_half, meta_line, resolve_preview};
use clap::{Args, Parser, Subcommand};
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "aer")]
#[command(author, version, about = "Encrypted capture and search for Aer")]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    conn: Connection,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Connection {
    /// Auth token (aer_{userId})
    #[arg(long, global = true, env = "AER_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "AER_API_URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt and upload text, a file, or a JSON artifact
    Upload {
        /// Text to upload (reads stdin when neither text nor --file is given)
        text: Option<String>,

        /// Upload the contents of a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Treat the input as a JSON artifact instead of plain text
        #[arg(long)]
        json: bool,

        /// Keep only a short encrypted summary
        #[arg(long)]
        summary_only: bool,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        url: Option<String>,
    },

    /// Search stored contexts and show ranked previews
    Search {
        query: String,

        /// Print the insertion text of the best result instead of the list
        #[arg(long)]
        insert: bool,

        /// Print ranked results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drop navigation chrome from long text, keeping its first half
    Filter {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Tag that marks relevant blocks (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Ask the server for tags instead
        #[arg(long, conflicts_with = "tags")]
        server_tags: bool,

        #[arg(long, default_value = "")]
        title: String,
    },

    /// Check that the API answers
    Ping,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = AerClient::http(client_config(&cli.conn), TransportConfig::from_env())?;

    match cli.command {
        Commands::Upload {
            text,
            file,
            json,
            summary_only,
            title,
            url,
        } => {
            let raw = match (&text, &file) {
                (Some(text), _) => text.clone(),
                (None, path) => read_input(path.as_deref())?,
            };
            let flags = UploadFlags {
                summary_only,
                title,
                url,
                file_name: file
                    .as_deref()
                    .and_then(Path::file_name)
                    .map(|n| n.to_string_lossy().into_owned()),
            };
            cmd_upload(&client, &raw, json, flags).await?
        }
        Commands::Search {
            query,
            insert,
            json,
        } => cmd_search(&client, &query, insert, json).await?,
        Commands::Filter {
            input,
            tags,
            server_tags,
            title,
        } => {
            let text = read_input(input.as_deref())?;
            let filtered = if server_tags {
                client.filter(&text, &title).await
            } else {
                filter_by_first_half(&text, &tags)
            };
            println!("{}", filtered);
        }
        Commands::Ping => {
            if !client.test_connection().await {
                return Err(format!("{} is unreachable", client.config().api_base_url).into());
            }
            println!("{} is reachable", client.config().api_base_url);
        }
    }

    Ok(())
}

fn client_config(conn: &Connection) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(token) = &conn.token {
        config = config.with_token(token.as_str());
    }
    if let Some(url) = &conn.api_url {
        config = config.with_base_url(url.as_str());
    }
    config
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

struct UploadFlags {
    summary_only: bool,
    title: Option<String>,
    url: Option<String>,
    file_name: Option<String>,
}

/// Build the artifact for an upload, folding command-line fields into it.
fn build_artifact(
    raw: &str,
    as_json: bool,
    flags: UploadFlags,
) -> Result<CapturedArtifact, Box<dyn std::error::Error>> {
    let artifact: CapturedArtifact = if as_json {
        serde_json::from_str::<JsonValue>(raw)?.into()
    } else if flags.summary_only {
        serde_json::json!({ "plaintext": raw }).into()
    } else {
        raw.into()
    };

    let JsonValue::Object(mut record) = serde_json::to_value(normalize(artifact))? else {
        return Err("normalized payload is not an object".into());
    };
    if flags.summary_only {
        record.insert("summaryOnly".into(), JsonValue::Bool(true));
    }
    for (key, value) in [
        ("title", flags.title),
        ("url", flags.url),
        ("fileName", flags.file_name),
    ] {
        if let Some(value) = value {
            record.insert(key.into(), JsonValue::String(value));
        }
    }
    Ok(CapturedArtifact::Record(record))
}

async fn cmd_upload(
    client: &AerClient,
    raw: &str,
    as_json: bool,
    flags: UploadFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let artifact = build_artifact(raw, as_json, flags)?;
    let response = client.upload(artifact).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

async fn cmd_search(
    client: &AerClient,
    query: &str,
    insert: bool,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let found = client.assist(query).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    let Some(user_id) = found.user_id else {
        println!("Query too short");
        return Ok(());
    };
    let key = derive_key_from_user_id(&user_id);

    if insert {
        let text = found
            .results
            .first()
            .and_then(|hit| compose_insertion(&hit.item, &key, query))
            .ok_or("Unable to decrypt the best result")?;
        println!("{}", text);
        return Ok(());
    }

    if found.results.is_empty() {
        println!("No results");
        return Ok(());
    }

    for (rank, hit) in found.results.iter().enumerate() {
        let title = hit.item.title.as_deref().unwrap_or("(untitled)");
        println!("{:>2}. {} [{:.1}]", rank + 1, title, hit.score);
        println!("    {}", resolve_preview(&hit.item, &key).replace('\n', " "));
        let meta = meta_line(&hit.item);
        if !meta.is_empty() {
            println!("    {}", meta);
        }
    }

    Ok(())
}
