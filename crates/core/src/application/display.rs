//! Display Projector - tracked item + classification -> display record
//!
//! Item type, icon and category are inferred from the catalog item name by
//! keyword matching. Catalog names are localized (Russian seed data, English
//! user entries), so every table lists both word stems. All matching runs on
//! the lower-cased name.

use crate::domain::{
    CatalogItem, Classification, MaintenanceStatus, TrackedItemId, TrackedItemView,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// UI classification tag of a maintenance item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    OilChange,
    BrakePads,
    TimingBelt,
    AirFilter,
    Battery,
    Other,
}

/// Search category offered by list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    All,
    Engine,
    Brakes,
    Filters,
    Battery,
}

const OIL_KEYWORDS: &[&str] = &["масл", "oil"];
const BRAKE_KEYWORDS: &[&str] = &["тормоз", "колод", "brake", "pad"];
const BELT_KEYWORDS: &[&str] = &["ремен", "ремень", "грм", "belt", "timing"];
const FILTER_KEYWORDS: &[&str] = &["фильтр", "filter"];
const AIR_KEYWORDS: &[&str] = &["воздух", "воздуш", "air"];
const BATTERY_TYPE_KEYWORDS: &[&str] = &["аккумулятор", "батар", "battery"];

/// Ordered item-type table: first matching row wins
const ITEM_TYPE_TABLE: &[(ItemType, &[&[&str]])] = &[
    (ItemType::OilChange, &[OIL_KEYWORDS]),
    (ItemType::BrakePads, &[BRAKE_KEYWORDS]),
    (ItemType::TimingBelt, &[BELT_KEYWORDS]),
    (ItemType::AirFilter, &[FILTER_KEYWORDS, AIR_KEYWORDS]),
    (ItemType::Battery, &[BATTERY_TYPE_KEYWORDS]),
];

/// Ordered icon table: first matching row wins, "wrench" otherwise
const ICON_TABLE: &[(&str, &[&str])] = &[
    ("oil-can", OIL_KEYWORDS),
    ("brake-system", &["тормоз", "brake"]),
    ("cogs", &["ремень", "грм", "belt", "timing"]),
    ("filter", FILTER_KEYWORDS),
    ("car-battery", &["аккум", "battery"]),
];

const DEFAULT_ICON: &str = "wrench";

/// Category membership table
const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (Category::Engine, &["масл", "двигател", "oil", "engine"]),
    (Category::Brakes, BRAKE_KEYWORDS),
    (Category::Filters, FILTER_KEYWORDS),
    (Category::Battery, &["аккум", "батар", "battery"]),
];

fn contains_any(name_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_keyword(name_lower, k))
}

/// Latin keywords must start a word ("oil" is not in "coil"); Cyrillic stems
/// match anywhere
fn contains_keyword(name_lower: &str, keyword: &str) -> bool {
    if !keyword.is_ascii() {
        return name_lower.contains(keyword);
    }
    name_lower.match_indices(keyword).any(|(start, _)| {
        !name_lower[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    })
}

/// Item type of a catalog item name
pub fn item_type(name: &str) -> ItemType {
    let name_lower = name.to_lowercase();
    ITEM_TYPE_TABLE
        .iter()
        .find(|(_, groups)| groups.iter().all(|group| contains_any(&name_lower, group)))
        .map(|(item_type, _)| *item_type)
        .unwrap_or(ItemType::Other)
}

/// Icon tag of a catalog item name
pub fn item_icon(name: &str) -> &'static str {
    let name_lower = name.to_lowercase();
    ICON_TABLE
        .iter()
        .find(|(_, keywords)| contains_any(&name_lower, keywords))
        .map(|(icon, _)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

impl Category {
    /// Whether a catalog item name belongs to this category
    pub fn matches(self, name: &str) -> bool {
        if self == Category::All {
            return true;
        }
        let name_lower = name.to_lowercase();
        CATEGORY_TABLE
            .iter()
            .find(|(category, _)| *category == self)
            .is_some_and(|(_, keywords)| contains_any(&name_lower, keywords))
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Category::All),
            "engine" => Ok(Category::Engine),
            "brakes" => Ok(Category::Brakes),
            "filters" => Ok(Category::Filters),
            "battery" => Ok(Category::Battery),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Case-insensitive substring search on a catalog item name
pub fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search.map(str::trim) {
        None | Some("") => true,
        Some(query) => name.to_lowercase().contains(&query.to_lowercase()),
    }
}

/// Display-ready record of one tracked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub id: TrackedItemId,
    pub name: String,
    pub item_type: ItemType,
    pub icon: String,
    pub status: MaintenanceStatus,
    pub last_service_date: Option<NaiveDate>,
    pub last_service_odometer: Option<i64>,
    pub overdue_km: Option<i64>,
    pub remaining_km: Option<i64>,
    pub custom_interval: Option<i64>,
    pub default_interval: i64,
    pub effective_interval: i64,
}

/// Project a tracked item and its classification into a display record
pub fn project(view: &TrackedItemView, classification: &Classification) -> DisplayItem {
    let catalog: &CatalogItem = &view.catalog_item;

    DisplayItem {
        id: view.item.id.clone(),
        name: catalog.name.clone(),
        item_type: item_type(&catalog.name),
        icon: item_icon(&catalog.name).to_string(),
        status: classification.status,
        last_service_date: view.item.last_service_date,
        last_service_odometer: view.item.last_service_odometer,
        overdue_km: classification.overdue_km,
        remaining_km: classification.remaining_km,
        custom_interval: view.item.custom_interval,
        default_interval: catalog.default_interval,
        effective_interval: view.effective_interval(),
    }
}
