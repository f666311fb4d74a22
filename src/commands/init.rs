use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# dsat-whatif configuration

[exam]
# Subjects always scored, even when a response set omits them
subjects = ["Math", "Reading and Writing"]

[thresholds]
# Module 1 accuracy cutoff used before (or without) fitting
default = 0.5
# Candidate grid scanned when fitting from historical data
min = 0.30
max = 0.80
step = 0.01
# Which candidate wins when several fit equally well:
# "lowest", "highest" or "closest_to_default"
tie_break = "lowest"

[impact]
# Bonus for a Module 1 fix that moves the Module 2 tier
branch_bonus = 120
# Effort bonus by question complexity
easy_bonus = 5
medium_bonus = 2
hard_bonus = 0
unknown_bonus = 0

[scoring]
# Reported when a raw score cannot be resolved in the table
default_scaled_score = 200

[output]
top_n = 5
default_format = "terminal"
parallel = false
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

/// Write the default config into `dir`, returning its path.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
