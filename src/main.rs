//! Podium command-line front-end
//!
//! Runs the store against a file-backed slot in the configured data directory.

use std::path::PathBuf;

use podium::leaderboard::{format_relative, rows};
use podium::persistence::{FileStorage, KeyValueRepository};
use podium::ranking::position_of;
use podium::{AudioRef, StoreConfig, SubmissionError, SubmissionInput, SubmissionStore};

type FileStore = SubmissionStore<KeyValueRepository<FileStorage>>;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(error) = run(std::env::args().skip(1).collect()).await {
        eprintln!("{error}");
        std::process::exit(2);
    }
}

async fn run(args: Vec<String>) -> Result<(), String> {
    if args.is_empty() {
        return Err(usage());
    }

    match args[0].as_str() {
        "submit" => run_submit(&args[1..]).await,
        "list" => run_list(&args[1..]).await,
        "help" | "--help" | "-h" => {
            println!("{}", usage());
            Ok(())
        }
        other => Err(format!("unknown subcommand '{other}'\n\n{}", usage())),
    }
}

fn usage() -> String {
    [
        "podium usage:",
        "  podium submit --name <name> --score <0-100> --time <1-3600> [--audio <handle>]",
        "      [--config <path>] [--data-dir <dir>]",
        "  podium list [--json] [--config <path>] [--data-dir <dir>]",
        "",
        "RUST_LOG controls log output; PODIUM_DATA_DIR overrides the data directory.",
    ]
    .join("\n")
}

/// Options shared by every subcommand
#[derive(Default)]
struct Common {
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
}

impl Common {
    /// Consume a shared flag at `args[*index]`. Returns false if it isn't one.
    fn take(&mut self, args: &[String], index: &mut usize) -> Result<bool, String> {
        match args[*index].as_str() {
            "--config" => {
                self.config = Some(PathBuf::from(flag_value(args, index, "--config")?));
                Ok(true)
            }
            "--data-dir" => {
                self.data_dir = Some(PathBuf::from(flag_value(args, index, "--data-dir")?));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn open_store(&self) -> Result<FileStore, String> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("podium.json"));
        let mut config = StoreConfig::load(&config_path)
            .map_err(|error| format!("failed to load {}: {error}", config_path.display()))?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }

        let repository =
            KeyValueRepository::new(FileStorage::new(&config.data_dir), &config.storage_key);
        let mut store = SubmissionStore::new(repository, config);
        store
            .initialize()
            .await
            .map_err(|error| format!("failed to load submissions: {error}"))?;
        Ok(store)
    }
}

fn flag_value<'a>(args: &'a [String], index: &mut usize, flag: &str) -> Result<&'a str, String> {
    *index += 1;
    args.get(*index)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number(value: &str, flag: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("{flag} expects a number, got '{value}'"))
}

async fn run_submit(args: &[String]) -> Result<(), String> {
    let mut common = Common::default();
    let mut name: Option<String> = None;
    let mut score: Option<f64> = None;
    let mut time: Option<f64> = None;
    let mut audio: Option<AudioRef> = None;

    let mut index = 0usize;
    while index < args.len() {
        if !common.take(args, &mut index)? {
            match args[index].as_str() {
                "--name" => name = Some(flag_value(args, &mut index, "--name")?.to_string()),
                "--score" => {
                    score = Some(parse_number(flag_value(args, &mut index, "--score")?, "--score")?)
                }
                "--time" => {
                    time = Some(parse_number(flag_value(args, &mut index, "--time")?, "--time")?)
                }
                "--audio" => audio = Some(AudioRef::new(flag_value(args, &mut index, "--audio")?)),
                flag => return Err(format!("unknown flag for submit: {flag}")),
            }
        }
        index += 1;
    }

    let mut input = SubmissionInput::new(
        name.ok_or_else(|| "missing required --name <name>".to_string())?,
        score.ok_or_else(|| "missing required --score <0-100>".to_string())?,
        time.ok_or_else(|| "missing required --time <1-3600>".to_string())?,
    );
    if let Some(audio) = audio {
        input = input.with_audio(audio);
    }

    let mut store = common.open_store().await?;
    let created = store.submit(input).await.map_err(|error| match error {
        SubmissionError::Rejected(reason) => format!("{} is invalid: {reason}", reason.field()),
    })?;

    let ranked = store.submissions();
    let rank = position_of(&ranked, created.id).unwrap_or(ranked.len());
    println!("Submitted {} (rank {} of {})", created.name, rank, ranked.len());

    if let Some(celebration) = store.celebration() {
        println!();
        println!("{}", celebration.category.title());
        println!("{} - {} points", celebration.name, celebration.score);
        println!("{}", celebration.category.message());
    }
    Ok(())
}

async fn run_list(args: &[String]) -> Result<(), String> {
    let mut common = Common::default();
    let mut json = false;

    let mut index = 0usize;
    while index < args.len() {
        if !common.take(args, &mut index)? {
            match args[index].as_str() {
                "--json" => json = true,
                flag => return Err(format!("unknown flag for list: {flag}")),
            }
        }
        index += 1;
    }

    let store = common.open_store().await?;
    let submissions = store.submissions();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&submissions)
                .map_err(|error| format!("failed to encode submissions: {error}"))?
        );
        return Ok(());
    }

    if submissions.is_empty() {
        println!("No submissions yet. Be the first!");
        return Ok(());
    }

    let now = chrono::Utc::now();
    for row in rows(&submissions) {
        println!(
            "{:>4}  {:<3} {:<24} {:>6.1}  {:>6}  {}{}",
            row.badge.label(),
            row.initials,
            row.name,
            row.score,
            row.time,
            format_relative(row.created_at, now),
            if row.has_audio { "  [audio]" } else { "" }
        );
    }
    Ok(())
}
