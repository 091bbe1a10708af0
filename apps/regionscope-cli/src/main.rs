use anyhow::Context;
use clap::{Parser, Subcommand};
use regionscope_common::{
    ChunkSnapshot, FoliaRegionId, RegionSnapshot, TelemetrySample, WorldSnapshot, WorldStatistics,
};
use regionscope_ingest::{LoadedStatistics, SnapshotFormat, SnapshotSource};
use regionscope_input::{Action, Outcome};
use regionscope_kernel::RegionBrowser;
use regionscope_tools::{RegionInspector, ReportConfig};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "regionscope-cli",
    about = "Browse the hottest regions of world statistics snapshots"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML report configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List regions ranked by entity count
    Rank {
        /// Statistics file (.json, .cbor or .cbor.zst)
        file: PathBuf,
        /// Number of regions to list
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show the summary of one ranked region
    Show {
        /// Statistics file (.json, .cbor or .cbor.zst)
        file: PathBuf,
        /// Cursor index; negative values count back from the coldest region
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        index: i64,
    },
    /// Navigate regions interactively, one command per line on stdin
    Browse {
        /// Statistics file (.json, .cbor or .cbor.zst)
        file: PathBuf,
    },
    /// Write a demonstration statistics file
    Sample {
        /// Output file; the extension picks the format
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("loading report config {}", path.display()))?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("regionscope-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("tools: {}", regionscope_tools::crate_info());
            let formats = [SnapshotFormat::Json, SnapshotFormat::Cbor, SnapshotFormat::CborZstd]
                .map(SnapshotFormat::extension);
            println!("formats: {}", formats.join(", "));
        }
        Commands::Rank { file, limit } => {
            let browser = open_browser(&file)?;
            if browser.is_empty() {
                println!("No regions");
            }
            for row in RegionInspector::ranking(&browser, limit) {
                println!("{row}");
            }
            if browser.len() > limit {
                println!("  ... {} more", browser.len() - limit);
            }
        }
        Commands::Show { file, index } => {
            let mut browser = open_browser(&file)?;
            browser.select(index);
            print!("{}", RegionInspector::report(&browser, &config));
        }
        Commands::Browse { file } => browse(&file, &config)?,
        Commands::Sample { file } => {
            let digest = regionscope_ingest::save_statistics(&file, &sample_statistics())
                .with_context(|| format!("writing {}", file.display()))?;
            println!("Wrote {} (sha256 {digest})", file.display());
        }
    }

    Ok(())
}

fn open_browser(file: &Path) -> anyhow::Result<RegionBrowser> {
    let loaded = regionscope_ingest::load_statistics(file)
        .with_context(|| format!("loading {}", file.display()))?;
    Ok(RegionBrowser::new(&loaded.statistics.worlds))
}

fn browse(file: &Path, config: &ReportConfig) -> anyhow::Result<()> {
    let mut source =
        SnapshotSource::open(file).with_context(|| format!("opening {}", file.display()))?;
    let loaded = source
        .load()
        .with_context(|| format!("loading {}", file.display()))?;
    let mut browser = RegionBrowser::new(&loaded.statistics.worlds);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", loaded_banner(source.path(), &loaded))?;
    writeln!(
        out,
        "Commands: n(ext), p(rev), g <n>, first, r(efresh), q(uit)"
    )?;
    write!(out, "{}", RegionInspector::report(&browser, config))?;
    out.flush()?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match Action::parse(&line).apply(&mut browser) {
            Outcome::Moved => {}
            Outcome::RefreshRequested => match source.reload_if_changed() {
                Ok(Some(fresh)) => {
                    writeln!(out, "{}", loaded_banner(source.path(), &fresh))?;
                    browser.refresh(&fresh.statistics.worlds);
                }
                Ok(None) => {
                    let digest = source.last_digest().map(short_digest).unwrap_or_default();
                    writeln!(out, "(unchanged, sha256 {digest})")?;
                }
                Err(e) => {
                    tracing::error!("failed to reload {}: {e}", file.display());
                    continue;
                }
            },
            Outcome::Quit => break,
            Outcome::Ignored => {
                tracing::warn!(input = %line.trim(), "unrecognised command");
                continue;
            }
        }
        writeln!(out)?;
        write!(out, "{}", RegionInspector::report(&browser, config))?;
        out.flush()?;
    }

    Ok(())
}

fn loaded_banner(path: &Path, loaded: &LoadedStatistics) -> String {
    format!(
        "Loaded {} ({}, {} worlds, sha256 {})",
        path.display(),
        loaded.format.extension(),
        loaded.statistics.worlds.len(),
        short_digest(&loaded.digest)
    )
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

/// A small multi-world document for trying the viewer out.
fn sample_statistics() -> WorldStatistics {
    fn chunk(x: i32, z: i32, counts: &[(&str, i64)]) -> ChunkSnapshot {
        ChunkSnapshot {
            x,
            z,
            total_entities: counts.iter().map(|(_, c)| c).sum(),
            entity_counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn region(
        id: i64,
        chunks: Vec<ChunkSnapshot>,
        samples: Vec<TelemetrySample>,
    ) -> RegionSnapshot {
        RegionSnapshot {
            folia_region_id: Some(FoliaRegionId(id)),
            total_entities: chunks.iter().map(|c| c.total_entities).sum(),
            chunks,
            samples,
        }
    }

    fn sample(time: i64, tps: f64, mspt: f64, utilisation: Option<f64>) -> TelemetrySample {
        TelemetrySample {
            time,
            tps,
            mspt,
            utilisation,
        }
    }

    let worlds = vec![
        WorldSnapshot {
            name: "world".into(),
            regions: vec![
                region(
                    1,
                    vec![
                        chunk(0, 0, &[("minecraft:cow", 4), ("minecraft:item", 12)]),
                        chunk(1, 0, &[("minecraft:zombie", 3), ("minecraft:cow", 1)]),
                    ],
                    vec![
                        sample(1_000, 19.8, 31.2, Some(0.41)),
                        sample(2_000, 19.95, 28.7, Some(0.38)),
                    ],
                ),
                region(
                    2,
                    vec![
                        chunk(32, -8, &[("minecraft:villager", 40), ("minecraft:item", 85)]),
                        chunk(33, -8, &[("minecraft:villager", 22)]),
                        chunk(32, -7, &[("minecraft:iron_golem", 2), ("minecraft:item", 9)]),
                    ],
                    vec![sample(2_000, 14.2, 70.4, None)],
                ),
            ],
        },
        WorldSnapshot {
            name: "world_nether".into(),
            regions: vec![region(
                3,
                vec![chunk(-4, 10, &[("minecraft:zombified_piglin", 37)])],
                vec![],
            )],
        },
        WorldSnapshot {
            name: "world_the_end".into(),
            regions: vec![],
        },
    ];

    WorldStatistics {
        total_entities: worlds
            .iter()
            .flat_map(|w| &w.regions)
            .map(|r| r.total_entities)
            .sum(),
        entity_counts: Default::default(),
        worlds,
    }
}
