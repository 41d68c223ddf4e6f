//! Ledger processing command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{
    config::LedgerConfig,
    import::{ImportStats, LedgerSide},
    normalize::parse_amount,
    pipeline::Pipeline,
    CategoryMatch,
};

pub fn cmd_process(
    mut config: LedgerConfig,
    file: &Path,
    out_dir: &Path,
    user_id: Option<String>,
) -> Result<()> {
    if let Some(user_id) = user_id {
        if user_id.trim().is_empty() {
            anyhow::bail!("--user-id must not be empty");
        }
        config.user_id = user_id;
    }

    println!("📥 Processing {}...", file.display());

    let pipeline = Pipeline::new(config);
    let (output, written) = pipeline
        .process_file(file, out_dir)
        .with_context(|| format!("Failed to process {}", file.display()))?;

    print_stats(&output.stats);

    println!();
    println!("✅ Wrote {} files", written.len());
    for path in &written {
        println!("   {}", path.display());
    }

    println!();
    println!("{}", output.insights);
    Ok(())
}

pub fn cmd_summary(config: LedgerConfig, file: &Path) -> Result<()> {
    let pipeline = Pipeline::new(config);
    let output = pipeline
        .run_file(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!("{}", output.insights);
    Ok(())
}

pub fn cmd_categorize(
    config: &LedgerConfig,
    description: &str,
    amount: Option<&str>,
) -> Result<()> {
    let pipeline = Pipeline::new(config.clone());
    let extractor = pipeline.extractor();

    println!("🔍 \"{}\"", description);
    println!("{}", describe_match(&extractor.categorizer().explain(description)));

    if let Some(raw) = amount {
        let value = parse_amount(raw);
        if value == 0.0 {
            println!("   Amount: {} (zero, row would be skipped)", raw);
            return Ok(());
        }

        let income_type = extractor.classifier().classify(value, description);
        println!("   Amount: {}", value.abs());
        match extractor.classifier().income_keyword(description) {
            Some(keyword) => println!(
                "   Income column: {} (keyword \"{}\")",
                income_type, keyword
            ),
            None => println!("   Income column: {} (no income keyword)", income_type),
        }
        println!("   Expense column: expense");
    }

    Ok(())
}

fn describe_match(matched: &CategoryMatch) -> String {
    match &matched.keyword {
        Some(keyword) => format!("   Category: {} (keyword \"{}\")", matched.category, keyword),
        None => format!("   Category: {} (no keyword matched)", matched.category),
    }
}

fn print_stats(stats: &ImportStats) {
    println!("   Rows read: {}", stats.rows_read);
    for side in [LedgerSide::Income, LedgerSide::Expense] {
        let side_stats = stats.side(side);
        println!(
            "   {} column: {} transactions, {} skipped",
            side,
            side_stats.emitted,
            side_stats.skipped_total()
        );
        for (reason, count) in &side_stats.skipped {
            println!("   - {}: {}", reason, count);
        }
    }
}
