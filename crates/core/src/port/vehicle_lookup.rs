// Vehicle Lookup Port (Interface)

use crate::domain::Vehicle;
use crate::error::Result;
use async_trait::async_trait;

/// Resolves a vehicle's owner and current odometer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleLookup: Send + Sync {
    /// Find vehicle by ID
    async fn get(&self, vehicle_id: &str) -> Result<Option<Vehicle>>;
}
