//! Check command - validate the configured reference data

use anyhow::Result;
use console::style;
use ngender::model::tips::bucket_key;
use ngender::model::{Gender, Tier};
use ngender::NGenderConfig;
use std::path::PathBuf;

pub fn run(config: &NGenderConfig) -> Result<()> {
    println!("ngender check\n");
    let mut failures = 0;

    let source = |path: &Option<PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string())
    };

    match config.frequency_table() {
        Ok(table) => {
            println!(
                "{} Frequency table ({}): {} characters, male total {}, female total {}",
                style("✓").green(),
                source(&config.data.charfreq),
                table.len(),
                table.male_total(),
                table.female_total()
            );
        }
        Err(e) => {
            failures += 1;
            println!("{} Frequency table: {}", style("✗").red(), e);
        }
    }

    match config.caption_bank() {
        Ok(bank) => {
            let sizes: Vec<String> = Gender::ALL
                .iter()
                .flat_map(|&g| Tier::ALL.iter().map(move |&t| (g, t)))
                .map(|(g, t)| format!("{}={}", bucket_key(g, t), bank.bucket_len(g, t)))
                .collect();
            println!(
                "{} Caption bank ({}): {}",
                style("✓").green(),
                source(&config.data.tips),
                sizes.join(", ")
            );
        }
        Err(e) => {
            failures += 1;
            println!("{} Caption bank: {}", style("✗").red(), e);
        }
    }

    match config.base_priors() {
        Ok(priors) => println!(
            "{} Priors: male {}, female {}",
            style("✓").green(),
            priors.male,
            priors.female
        ),
        Err(e) => {
            failures += 1;
            println!("{} Priors: {}", style("✗").red(), e);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} check(s) failed", failures);
    }

    println!("\n{}", style("All checks passed!").green().bold());
    Ok(())
}
