//! Environment configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `CARMAINT_DB_PATH` | `~/.carmaint/maintenance.db` |
//! | `CARMAINT_LOG_FORMAT` | `pretty` (`json` for structured output) |
//! | `CARMAINT_PAGE_SIZE` | scheduler default (10) |
//! | `CARMAINT_REPORT_OWNER` + `CARMAINT_REPORT_VEHICLE` | no report |

use anyhow::{Context, Result};
use carmaint_core::application::SchedulerConfig;

pub const DEFAULT_DB_PATH: &str = "~/.carmaint/maintenance.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Owner + vehicle whose due list is printed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    pub owner_id: String,
    pub vehicle_id: String,
}

#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub db_path: String,
    pub log_format: LogFormat,
    pub scheduler: SchedulerConfig,
    pub report: Option<ReportTarget>,
}

impl BootstrapConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (process env in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("CARMAINT_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let db_path = shellexpand::tilde(&db_path).into_owned();

        let log_format = match lookup("CARMAINT_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let mut scheduler = SchedulerConfig::default();
        if let Some(raw) = lookup("CARMAINT_PAGE_SIZE") {
            scheduler.default_page_size = raw
                .trim()
                .parse()
                .with_context(|| format!("CARMAINT_PAGE_SIZE is not a number: {:?}", raw))?;
        }
        scheduler.validate()?;

        let report = match (lookup("CARMAINT_REPORT_OWNER"), lookup("CARMAINT_REPORT_VEHICLE")) {
            (Some(owner_id), Some(vehicle_id)) => Some(ReportTarget {
                owner_id,
                vehicle_id,
            }),
            _ => None,
        };

        Ok(Self {
            db_path,
            log_format,
            scheduler,
            report,
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.contains(":memory:")
    }
}
