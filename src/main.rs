//! Brick Campaign entry point
//!
//! Generates a campaign from a config file and/or flags, logs a summary and
//! optionally exports it or prints one level.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use brick_campaign::levelgen::{EMPTY, Grid, INDESTRUCTIBLE, LevelKind};
use brick_campaign::{CampaignSettings, LevelGenerator, LifePatternScope};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Campaign seed (0 draws a random one)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of levels
    #[arg(long)]
    levels: Option<usize>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// Hit points of the toughest brick in the last level
    #[arg(long)]
    max_hp: Option<u32>,

    /// Keep pictorial levels at a single hit-point value
    #[arg(long)]
    symmetric_only_patterns: bool,

    /// Write every level as text to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print one level to stdout
    #[arg(long)]
    show: Option<usize>,
}

impl Args {
    fn settings(&self) -> anyhow::Result<CampaignSettings> {
        let mut settings = match &self.config {
            Some(path) => CampaignSettings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => CampaignSettings::default(),
        };

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(levels) = self.levels {
            settings.total_levels = levels;
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if let Some(max_hp) = self.max_hp {
            settings.max_hit_points = max_hp;
        }
        if self.symmetric_only_patterns {
            settings.life_pattern_scope = LifePatternScope::SymmetricOnly;
        }
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = args.settings()?;

    let mut generator = LevelGenerator::new(settings).context("invalid campaign settings")?;
    let campaign = generator.generate().context("campaign generation failed")?;

    log::info!(
        "Campaign ready: {} levels, seed {}",
        campaign.len(),
        campaign.effective_seed()
    );
    for meta in campaign.levels_meta() {
        log::info!(
            "  level {:>2}: {:<28} {:>3} blocks  hp {}..={}",
            meta.index,
            match &meta.kind {
                LevelKind::Symmetric => "symmetric".to_string(),
                LevelKind::Special { shape } => format!("special ({shape})"),
            },
            meta.block_count,
            meta.hp_min,
            meta.hp_max
        );
    }

    if let Some(path) = &args.export {
        campaign
            .export(path)
            .with_context(|| format!("writing campaign to {}", path.display()))?;
    }

    if let Some(index) = args.show {
        let grid = campaign.level(index)?;
        println!("Level {index} (seed {})", campaign.effective_seed());
        print_grid(grid);
    }

    Ok(())
}

fn print_grid(grid: &Grid) {
    for row in grid.iter_rows() {
        let line: String = row
            .iter()
            .map(|&v| match v {
                EMPTY => " .".to_string(),
                INDESTRUCTIBLE => " #".to_string(),
                v => format!("{v:>2}"),
            })
            .collect();
        println!("{line}");
    }
}
