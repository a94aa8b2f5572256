use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mojmap_config::MojmapConfig;
use mojmap_core::{
    MappingIndex, MappingStats, SearchResult, Side, VersionCatalog, VersionPackage,
};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Parser)]
#[command(
    name = "mojmap",
    version,
    about = "Inspect and search obfuscation mapping files"
)]
struct Cli {
    /// Config file (defaults to `mojmap.toml` in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a mapping file and report what it contains
    Parse(ParseArgs),
    /// Search class, method and field names in a mapping file
    Search(SearchArgs),
    /// List versions from a launcher version manifest
    Versions(VersionsArgs),
    /// Print the mapping download URL from a version metadata document
    Resolve(ResolveArgs),
}

#[derive(Args)]
struct ParseArgs {
    /// Mapping file to parse
    file: PathBuf,
    /// Emit the stats and the full index as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Mapping file to search
    file: PathBuf,
    /// Case-insensitive substring to look for
    filter: String,
    /// Maximum number of results (defaults to `search.limit`)
    #[arg(long)]
    limit: Option<usize>,
    /// Emit JSON suitable for scripts
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct VersionsArgs {
    /// Launcher version manifest (JSON)
    manifest: PathBuf,
    /// Include snapshot versions (defaults to `search.include_snapshots`)
    #[arg(long)]
    snapshots: bool,
    /// Emit JSON suitable for scripts
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ResolveArgs {
    /// Version metadata document (JSON)
    package: PathBuf,
    /// Which build's mappings to resolve
    #[arg(long, default_value_t = Side::Server)]
    side: Side,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn load_config(explicit: Option<&Path>) -> Result<MojmapConfig> {
    match explicit {
        Some(path) => MojmapConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            let (config, _) = mojmap_config::load_for_dir(&cwd)?;
            Ok(config)
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_index(path: &Path) -> Result<MappingIndex> {
    let text = read_text(path)?;
    mojmap_core::parse_mappings(&text).with_context(|| format!("parsing {}", path.display()))
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    mojmap_config::init_tracing(&config.logging);

    match cli.command {
        Command::Parse(args) => {
            let index = load_index(&args.file)?;
            let stats = index.stats();
            if args.json {
                print_json(&ParseReport {
                    stats,
                    classes: &index,
                })?;
            } else {
                println!("parsed: {}", args.file.display());
                println!("  classes: {}", stats.classes);
                println!("  methods: {}", stats.methods);
                println!("  fields: {}", stats.fields);
            }
            Ok(0)
        }
        Command::Search(args) => {
            let index = load_index(&args.file)?;
            let limit = args.limit.unwrap_or(config.search.limit);
            let result = index.search(&args.filter, limit);
            if args.json {
                print_json(&result)?;
            } else {
                print_search_result(&result);
            }
            Ok(0)
        }
        Command::Versions(args) => {
            let text = read_text(&args.manifest)?;
            let catalog = VersionCatalog::from_launcher_manifest(&text)
                .with_context(|| format!("parsing {}", args.manifest.display()))?;
            let include_snapshots = args.snapshots || config.search.include_snapshots;
            let rows: Vec<VersionRow<'_>> = catalog
                .version_ids(include_snapshots)
                .into_iter()
                .filter_map(|id| catalog.get(id))
                .map(|info| VersionRow {
                    id: &info.version,
                    kind: info.kind.as_str(),
                    release_time: info.release_time,
                    mappings: catalog.has_mappings(&info.version),
                })
                .collect();

            if args.json {
                print_json(&rows)?;
            } else {
                for row in &rows {
                    println!(
                        "{}\t{}\t{}",
                        row.id,
                        row.kind,
                        if row.mappings { "mappings" } else { "-" }
                    );
                }
            }
            Ok(0)
        }
        Command::Resolve(args) => {
            let text = read_text(&args.package)?;
            let package = VersionPackage::from_json(&text)
                .with_context(|| format!("parsing {}", args.package.display()))?;
            match package.mappings_url(args.side) {
                Some(url) => {
                    println!("{url}");
                    Ok(0)
                }
                None => {
                    tracing::info!(side = %args.side, "version publishes no mappings");
                    eprintln!(
                        "no {} mappings for {}",
                        args.side,
                        package.id.as_deref().unwrap_or("this version")
                    );
                    Ok(1)
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ParseReport<'a> {
    stats: MappingStats,
    classes: &'a MappingIndex,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    release_time: OffsetDateTime,
    mappings: bool,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn print_search_result(result: &SearchResult) {
    for class in &result.results {
        println!("{} -> {}", class.class_name, class.obfuscated);
        for method in class.methods.iter().flatten() {
            println!(
                "    {} {}({}) -> {}",
                method.return_type,
                method.name,
                method.argument_types.join(", "),
                method.obfuscated
            );
        }
        for field in class.fields.iter().flatten() {
            println!("    {} {} -> {}", field.ty, field.name, field.obfuscated);
        }
    }

    if result.limit_reached {
        println!("results: {} (limit reached)", result.num_results);
    } else {
        println!("results: {}", result.num_results);
    }
}
