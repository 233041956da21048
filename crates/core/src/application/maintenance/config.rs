// Scheduler configuration (constructed explicitly, passed to the scheduler)

use crate::error::{AppError, Result};

/// Default page size of due-item lists
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default cap on catalog entries shown in the directory view
pub const DEFAULT_CATALOG_DIRECTORY_LIMIT: i64 = 1000;

/// Maintenance scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Page size used when the caller does not pick one
    pub default_page_size: u32,

    /// Maximum number of catalog entries loaded for the directory view
    pub catalog_directory_limit: i64,

    /// Log a warning when a recorded odometer is below the previous checkpoint
    pub warn_on_odometer_regression: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            catalog_directory_limit: DEFAULT_CATALOG_DIRECTORY_LIMIT,
            warn_on_odometer_regression: true,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(AppError::Config(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        if self.catalog_directory_limit <= 0 {
            return Err(AppError::Config(
                "catalog_directory_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
