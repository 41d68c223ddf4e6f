//! End-to-end run: sheet in, analysis and output documents out

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::{analyze, Analysis};
use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::export::{AnalysisDocument, Documents};
use crate::import::{ImportStats, LedgerExtractor};
use crate::insights::render_insights;
use crate::models::Transaction;

/// Everything one run produces before anything is written
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Sorted ascending by date
    pub transactions: Vec<Transaction>,
    pub stats: ImportStats,
    pub analysis: Analysis,
    pub insights: String,
}

impl PipelineOutput {
    /// Serialize the three output documents for `user_id`
    pub fn documents(&self, user_id: &str) -> Result<Documents> {
        let analysis = AnalysisDocument::new(&self.analysis, self.insights.clone());
        Documents::build(&self.transactions, user_id, &analysis)
    }
}

/// Import, analyze and export with one configuration
pub struct Pipeline {
    config: LedgerConfig,
    extractor: LedgerExtractor,
}

impl Pipeline {
    pub fn new(config: LedgerConfig) -> Self {
        let extractor = LedgerExtractor::new(&config);
        Self { config, extractor }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn extractor(&self) -> &LedgerExtractor {
        &self.extractor
    }

    /// Run import and analysis over a sheet
    pub fn run<R: Read>(&self, reader: R) -> Result<PipelineOutput> {
        let extraction = self.extractor.extract(reader)?;
        let analysis = analyze(&extraction.transactions);
        let insights = render_insights(&analysis);

        info!(
            transactions = analysis.transaction_count,
            months = analysis.monthly.len(),
            net_balance = analysis.net_balance,
            "Analysis complete"
        );

        Ok(PipelineOutput {
            transactions: extraction.transactions,
            stats: extraction.stats,
            analysis,
            insights,
        })
    }

    /// Run over a sheet on disk
    pub fn run_file(&self, path: &Path) -> Result<PipelineOutput> {
        let file = File::open(path)
            .map_err(|e| Error::Import(format!("Failed to open {}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Reading ledger sheet");
        self.run(BufReader::new(file))
    }

    /// Run over a sheet on disk and write all three documents into `out_dir`.
    ///
    /// Either every document is written or none is.
    pub fn process_file(
        &self,
        path: &Path,
        out_dir: &Path,
    ) -> Result<(PipelineOutput, Vec<PathBuf>)> {
        let output = self.run_file(path)?;
        let documents = output.documents(&self.config.user_id)?;
        let written = documents.write_to(out_dir, &self.config.output)?;
        Ok((output, written))
    }
}
