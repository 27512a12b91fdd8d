use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "expensetui.db";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_dir: PathBuf,
    pub(crate) log_level: String,
}

impl Config {
    /// Resolve the config from argv, removing `--db <path>` and
    /// `--log-level <level>`. Returns the config and the remaining arguments
    /// (program name first).
    pub(crate) fn from_args(args: &[String]) -> Result<(Self, Vec<String>)> {
        let mut db_override: Option<PathBuf> = None;
        let mut log_level: Option<String> = None;
        let mut rest = Vec::with_capacity(args.len());

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
                    db_override = Some(PathBuf::from(crate::run::shellexpand(value)));
                }
                "--log-level" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--log-level requires a level"))?;
                    log_level = Some(value.clone());
                }
                _ => rest.push(arg.clone()),
            }
        }

        let data_dir = data_dir()?;
        let config = Self {
            db_path: db_override.unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };
        Ok((config, rest))
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
