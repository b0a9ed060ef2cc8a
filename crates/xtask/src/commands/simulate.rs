//! Headless encounter simulation
//!
//! Plays the same hero against the same monster many times with the
//! autopilot and summarizes how the fights went. The codex carries over from
//! one run to the next, as it would across a real save file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::{ContentBundle, ContentFactory};
use combat_core::{
    CombatState, Dice, EncounterOutcome, InMemoryCodex, MonsterCodex, MonsterTemplate,
    WeatherModifiers, compute_seed,
};
use combat_runtime::{
    AutoPilot, EncounterReport, EncounterRunner, EncounterSession, EventBus, OracleManager,
    RuntimeConfig,
};
use console::style;
use serde::Serialize;

use crate::dirs;

/// Run a batch of autopilot encounters and summarize the results
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Content directory (defaults to $COMBAT_CONTENT_DIR or ./data)
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Hero preset id
    #[arg(long)]
    pub hero: String,

    /// Monster id
    #[arg(long)]
    pub monster: String,

    /// Number of encounters to run
    #[arg(long, default_value_t = 100)]
    pub runs: u32,

    /// Base seed; omit for fresh entropy every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Weather accuracy penalty applied to the hero's attack rolls
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub weather_penalty: i32,

    /// Autopilot heals below this percent of max HP
    #[arg(long, default_value_t = AutoPilot::DEFAULT_HEAL_BELOW_PERCENT)]
    pub heal_below: u32,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Also save the JSON summary under the platform data directory
    #[arg(long)]
    pub save: bool,

    /// Wait COMBAT_MONSTER_DELAY_MS before each monster turn
    #[arg(long)]
    pub paced: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        if self.runs == 0 {
            anyhow::bail!("--runs must be at least 1");
        }
        let dir = self.content.clone().unwrap_or_else(dirs::content_dir);
        let bundle = ContentFactory::new(&dir)
            .load_all()
            .with_context(|| format!("Failed to load content from {}", dir.display()))?;
        let template = bundle
            .monster(&self.monster)
            .cloned()
            .with_context(|| format!("Unknown monster '{}'", self.monster))?;
        // fail fast on a bad preset before spinning up the runtime
        bundle.hero(&self.hero)?;
        let oracles = OracleManager::from_bundle(&bundle);
        let config = self.runtime_config(|key| std::env::var(key).ok())?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to start async runtime")?;
        let summary = runtime.block_on(self.run_batch(&bundle, template, oracles, &config))?;

        let json = serde_json::to_string_pretty(&summary)?;
        if self.json {
            println!("{json}");
        } else {
            summary.print();
        }
        if self.save {
            let dir = dirs::report_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let path = dir.join(format!("{}_vs_{}.json", self.hero, self.monster));
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Report saved to {}", path.display());
        }
        Ok(())
    }

    /// `COMBAT_*` settings; monster turns are immediate unless `--paced`.
    fn runtime_config(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<RuntimeConfig> {
        let mut config = RuntimeConfig::from_lookup(lookup)?;
        if !self.paced {
            config.monster_delay = Duration::ZERO;
        }
        Ok(config)
    }

    async fn run_batch(
        &self,
        bundle: &ContentBundle,
        template: MonsterTemplate,
        oracles: OracleManager,
        config: &RuntimeConfig,
    ) -> Result<Summary> {
        let weather = WeatherModifiers::new(self.weather_penalty);
        let mut summary = Summary::new(&self.hero, &self.monster);
        let mut codex = InMemoryCodex::new();

        for run in 0..self.runs {
            let player = bundle.hero(&self.hero)?;
            let session = match self.seed {
                Some(seed) => EncounterSession::new(
                    CombatState::new(player, template.clone(), weather),
                    Dice::seeded(compute_seed(seed, u64::from(run), 0)),
                    codex,
                    oracles.clone(),
                    EventBus::from_config(config),
                ),
                None => EncounterSession::start(
                    player,
                    template.clone(),
                    weather,
                    codex,
                    oracles.clone(),
                    EventBus::from_config(config),
                ),
            };
            let pilot = AutoPilot::new(oracles.clone()).heal_below(self.heal_below);
            let report = EncounterRunner::new(session, pilot, config.clone())
                .run()
                .await
                .with_context(|| format!("Run {} failed", run + 1))?;

            tracing::debug!(run = run + 1, rounds = report.rounds, "run finished");
            summary.record(run + 1, &report);
            codex = report.codex;
        }

        summary.finish(&codex);
        tracing::info!(runs = summary.runs, victories = summary.victories, "simulation complete");
        Ok(summary)
    }
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    hero: String,
    monster: String,
    runs: u32,
    victories: u32,
    defeats: u32,
    fled: u32,
    total_rounds: u64,
    average_rounds: f64,
    win_rate: f64,
    gold_earned: u64,
    /// First run after which the monster's AC was known.
    ac_discovered_on_run: Option<u32>,
    seen_drops: Vec<String>,
}

impl Summary {
    fn new(hero: &str, monster: &str) -> Self {
        Self {
            hero: hero.to_owned(),
            monster: monster.to_owned(),
            ..Self::default()
        }
    }

    fn record<C: MonsterCodex>(&mut self, run: u32, report: &EncounterReport<C>) {
        self.runs += 1;
        self.total_rounds += u64::from(report.rounds);
        match &report.outcome {
            EncounterOutcome::Victory(victory) => {
                self.victories += 1;
                self.gold_earned += u64::from(victory.gold);
            }
            EncounterOutcome::Defeat(_) => self.defeats += 1,
            EncounterOutcome::Fled => self.fled += 1,
        }
        if self.ac_discovered_on_run.is_none() && report.codex.is_ac_discovered(&self.monster) {
            self.ac_discovered_on_run = Some(run);
        }
    }

    fn finish<C: MonsterCodex>(&mut self, codex: &C) {
        if self.runs > 0 {
            self.average_rounds = self.total_rounds as f64 / f64::from(self.runs);
            self.win_rate = f64::from(self.victories) / f64::from(self.runs);
        }
        self.seen_drops = codex
            .entry(&self.monster)
            .map(|entry| entry.seen_drops.into_iter().collect())
            .unwrap_or_default();
    }

    fn print(&self) {
        println!(
            "{} {} vs {}",
            style("⚔").yellow(),
            style(&self.hero).cyan().bold(),
            style(&self.monster).red().bold()
        );
        println!();
        println!("  Runs         {}", self.runs);
        println!(
            "  Victories    {} ({:.1}%)",
            style(self.victories).green(),
            self.win_rate * 100.0
        );
        println!("  Defeats      {}", style(self.defeats).red());
        println!("  Fled         {}", self.fled);
        println!("  Avg rounds   {:.2}", self.average_rounds);
        println!("  Gold earned  {}", self.gold_earned);
        match self.ac_discovered_on_run {
            Some(run) => println!("  AC known     after run {run}"),
            None => println!("  AC known     {}", style("never").dim()),
        }
        if !self.seen_drops.is_empty() {
            println!("  Drops seen   {}", self.seen_drops.join(", "));
        }
    }
}
