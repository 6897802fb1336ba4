pub mod json;
pub mod md;

use crate::error::FrontierError;
use crate::types::report::LeaderboardReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &LeaderboardReport, format: OutputFormat) -> Result<String, FrontierError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(FrontierError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
