pub mod history;
pub mod loader;
pub mod output;

pub use history::{HistoricalSource, JsonHistoricalSource, SeedHistoricalSource};
pub use loader::{
    load_historical, load_responses, load_scoring_table, parse_historical, parse_responses,
    parse_scoring_table,
};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
