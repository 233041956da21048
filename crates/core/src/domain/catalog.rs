// Maintenance Catalog Domain Model

use serde::{Deserialize, Serialize};

/// Catalog item ID (UUID v4)
pub type CatalogItemId = String;

/// Reusable maintenance operation type with a recommended interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub name: String,
    pub default_interval: i64, // km
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, default_interval: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_interval,
        }
    }
}

/// Default catalog installed on an empty database: (name, default interval km)
pub const DEFAULT_CATALOG: &[(&str, i64)] = &[
    ("Трансмиссионное масло", 80_000),
    ("Жидкость ГУР", 120_000),
    ("Масло редуктора", 75_000),
    ("Масляный фильтр", 6_000),
    ("Топливный фильтр", 25_000),
    ("Воздушный фильтр", 6_000),
    ("Ремень ГРМ", 100_000),
    ("Антифриз", 60_000),
    ("Тосол", 60_000),
    ("Тормозная жидкость", 57_000),
    ("Свечи", 18_000),
    ("Тормозные колодки", 15_000),
    ("Тормозные диски", 30_000),
    ("Тормозные барабаны", 15_000),
    ("Масло моторное", 6_000),
];
