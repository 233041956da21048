// Application Layer - Use Cases and Business Logic

pub mod display;
pub mod maintenance;
pub mod pagination;

// Re-exports
pub use display::{Category, DisplayItem, ItemType};
pub use maintenance::{MaintenanceScheduler, MaintenanceStores, SchedulerConfig};
pub use pagination::PaginationInfo;
