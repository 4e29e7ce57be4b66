use anyhow::{anyhow, Result};
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{info, warn};

use vidmark::{
    format_epoch, parse_captions, youtube, Config, EntityIndex, NlpClient, SortOrder,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("vidmark=info,warn")
        .init();

    let matches = Command::new("vidmark")
        .version("0.1.0")
        .about("Caption-driven video annotation: SBV parsing and keyword timelines")
        .arg(
            Arg::new("transcript")
                .short('t')
                .long("transcript")
                .value_name("FILE")
                .help("SBV transcript file to parse")
                .required(true)
        )
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("YouTube url of the source video")
                .default_value("")
        )
        .arg(
            Arg::new("entities")
                .short('e')
                .long("entities")
                .value_name("FILE")
                .help("Pre-computed entity index JSON (skips the keyword service)")
        )
        .arg(
            Arg::new("nlp")
                .long("nlp")
                .help("Send the parsed captions to the keyword service")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_name("ORDER")
                .help("Entity sort order: alphabetical or chronological")
                .default_value("alphabetical")
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Case-insensitive substring filter over entity keys")
                .default_value("")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the caption document JSON to this file")
        )
        .get_matches();

    let transcript = PathBuf::from(matches.get_one::<String>("transcript").unwrap());
    let url = matches.get_one::<String>("url").unwrap().clone();
    let sort_order = parse_sort_order(matches.get_one::<String>("sort").unwrap())?;
    let query = matches.get_one::<String>("query").unwrap();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    info!("🎬 vidmark starting");
    info!("📄 Transcript: {}", transcript.display());

    if !url.is_empty() {
        let video_id = youtube::extract_video_id(&url)?;
        info!("▶️  Video id: {}", video_id);
    }

    let raw = tokio::fs::read_to_string(&transcript).await?;
    let document = parse_captions(&raw, url);
    info!(
        "💬 Parsed {} captions spanning {}",
        document.len(),
        format_epoch(document.total_duration())
    );

    if let Some(output) = matches.get_one::<String>("output") {
        let json = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(output, json).await?;
        info!("💾 Caption document written to: {}", output);
    }

    // Entity index: from a local file, or from the keyword service
    let index = if let Some(path) = matches.get_one::<String>("entities") {
        let raw = tokio::fs::read_to_string(path).await?;
        let mut index: EntityIndex = serde_json::from_str(&raw)?;
        if vidmark::nlp::split_metadata(&mut index).is_some() {
            info!("📎 Dropped METADATA entry from {}", path);
        }
        Some(index)
    } else if matches.get_flag("nlp") {
        // the service windows the captions itself; its response metadata is
        // logged by the client
        let client = NlpClient::new(&config.nlp)?;
        Some(client.extract_entities(&document).await?)
    } else {
        None
    };

    if let Some(mut index) = index {
        index.sort(sort_order);
        let hits = index.filter(query);

        if hits.is_empty() {
            info!("🔍 No entities matched");
        }
        for entity in hits {
            let times: Vec<String> = entity.mentions.iter().map(|t| format_epoch(*t)).collect();
            println!("{}  appears at  {}", entity.key, times.join(", "));
        }
    }

    Ok(())
}

fn parse_sort_order(raw: &str) -> Result<SortOrder> {
    match raw {
        "alphabetical" => Ok(SortOrder::Alphabetical),
        "chronological" => Ok(SortOrder::Chronological),
        other => Err(anyhow!("unknown sort order: {}", other)),
    }
}
