// Vehicle Domain Model (external entity, referenced not owned)

use serde::{Deserialize, Serialize};

/// Vehicle ID (UUID v4)
pub type VehicleId = String;

/// Owner (user) identifier
pub type OwnerId = String;

/// Vehicle as seen by the scheduler: ownership plus current odometer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub owner_id: OwnerId,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub odometer: i64, // km
}

impl Vehicle {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, odometer: i64) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            brand: String::new(),
            model: String::new(),
            year: None,
            odometer,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}
