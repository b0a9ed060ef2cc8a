//! Content validation command
//!
//! Loads every catalog in a content directory, prints how many entries each
//! holds, then cross-checks item and technique references.

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use combat_content::{ContentBundle, ContentFactory, LoadResult};
use console::style;

use crate::dirs;

/// Load a content directory and report unresolved references
#[derive(Parser, Debug)]
pub struct CheckContent {
    /// Content directory (defaults to $COMBAT_CONTENT_DIR or ./data)
    #[arg(long)]
    pub content: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let dir = self.content.unwrap_or_else(dirs::content_dir);
        let factory = ContentFactory::new(&dir);

        println!("{}", style("Checking combat content").yellow().bold());
        println!("  {}", style(dir.display()).dim());
        println!();

        let mut failures = 0;
        let config = report("rules.toml", factory.load_config(), |_| "loaded", &mut failures);
        let monsters = report(
            "monsters.ron",
            factory.load_monsters(),
            counted("monsters"),
            &mut failures,
        );
        let techniques = report(
            "techniques.ron",
            factory.load_techniques(),
            counted("techniques"),
            &mut failures,
        );
        let items = report("items.ron", factory.load_items(), counted("items"), &mut failures);
        let heroes = report("heroes.ron", factory.load_heroes(), counted("heroes"), &mut failures);

        let (Some(config), Some(monsters), Some(techniques), Some(items), Some(heroes)) =
            (config, monsters, techniques, items, heroes)
        else {
            println!();
            anyhow::bail!("{} file(s) failed to load", failures);
        };

        let bundle = ContentBundle {
            config,
            monsters,
            techniques,
            items,
            heroes,
        };
        println!();
        match bundle.validate() {
            Ok(()) => {
                println!("{}", style("✓ All references resolve").green().bold());
                Ok(())
            }
            Err(err) => {
                println!("{} {}", style("✗").red().bold(), err);
                anyhow::bail!("content directory has unresolved references")
            }
        }
    }
}

fn counted<T>(noun: &'static str) -> impl Fn(&Vec<T>) -> String {
    move |entries: &Vec<T>| format!("{} {}", entries.len(), noun)
}

/// Prints one line per file and keeps the loaded value, if any.
fn report<T, D: Display>(
    file: &str,
    loaded: LoadResult<T>,
    describe: impl Fn(&T) -> D,
    failures: &mut usize,
) -> Option<T> {
    match loaded {
        Ok(value) => {
            println!(
                "  {} {:<16} {}",
                style("✓").green(),
                file,
                style(describe(&value)).dim()
            );
            Some(value)
        }
        Err(err) => {
            *failures += 1;
            println!("  {} {:<16} {}", style("✗").red(), file, err);
            None
        }
    }
}
