// Due Items Use Case - status, filtering, ordering and paging

use crate::application::display::{self, Category, DisplayItem};
use crate::application::pagination::{paginate, PaginationInfo};
use crate::domain::{classify, lateness, Classification, TrackedItemView, Vehicle};
use crate::error::{AppError, Result};
use crate::port::{TrackedItemStore, VehicleLookup};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Load every tracked item of a vehicle in one read
const ALL_ROWS: i64 = i64::MAX;

/// Due items request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueItemsQuery {
    pub vehicle_id: String,
    pub page: u32,
    pub page_size: u32,

    /// Include items whose status is OK
    #[serde(default)]
    pub show_all: bool,

    /// Case-insensitive substring of the catalog item name
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub category: Option<Category>,
}

impl DueItemsQuery {
    pub fn new(vehicle_id: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            page,
            page_size,
            show_all: false,
            search: None,
            category: None,
        }
    }

    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// One page of display items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueItemsPage {
    pub items: Vec<DisplayItem>,
    pub pagination: PaginationInfo,
}

/// Tracked item with its computed status, before projection
struct Candidate {
    view: TrackedItemView,
    classification: Classification,
    lateness: Option<i64>,
}

/// Execute the due items use case
///
/// A vehicle that does not exist or belongs to someone else yields an empty
/// page with zero pages (list semantics, not an error).
pub async fn execute(
    vehicles: &dyn VehicleLookup,
    tracked_items: &dyn TrackedItemStore,
    owner_id: &str,
    query: &DueItemsQuery,
) -> Result<DueItemsPage> {
    validate_page(query.page, query.page_size)?;

    let Some(vehicle) = resolve_owned_vehicle(vehicles, owner_id, &query.vehicle_id).await?
    else {
        debug!(
            owner_id = %owner_id,
            vehicle_id = %query.vehicle_id,
            "Vehicle not found for owner, returning empty page"
        );
        return Ok(DueItemsPage {
            items: Vec::new(),
            pagination: PaginationInfo::empty(query.page, query.page_size),
        });
    };

    let candidates = collect_candidates(
        tracked_items,
        owner_id,
        &vehicle,
        query.show_all,
        query.search.as_deref(),
        query.category,
    )
    .await?;

    let (page_slice, _) = paginate(&candidates, query.page, query.page_size);
    let items = page_slice
        .iter()
        .map(|c| display::project(&c.view, &c.classification))
        .collect();

    debug!(
        vehicle_id = %vehicle.id,
        odometer = vehicle.odometer,
        total_items = candidates.len(),
        page = query.page,
        "Computed due items"
    );

    Ok(DueItemsPage {
        items,
        pagination: PaginationInfo::new(query.page, query.page_size, candidates.len()),
    })
}

/// Number of items needing attention (NEVER_SERVICED, UPCOMING, OVERDUE)
pub async fn count(
    vehicles: &dyn VehicleLookup,
    tracked_items: &dyn TrackedItemStore,
    owner_id: &str,
    vehicle_id: &str,
) -> Result<usize> {
    let Some(vehicle) = resolve_owned_vehicle(vehicles, owner_id, vehicle_id).await? else {
        return Ok(0);
    };

    let candidates =
        collect_candidates(tracked_items, owner_id, &vehicle, false, None, None).await?;
    Ok(candidates.len())
}

fn validate_page(page: u32, page_size: u32) -> Result<()> {
    if page < 1 {
        return Err(AppError::Validation("page must be at least 1".to_string()));
    }
    if page_size < 1 {
        return Err(AppError::Validation(
            "page_size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

async fn resolve_owned_vehicle(
    vehicles: &dyn VehicleLookup,
    owner_id: &str,
    vehicle_id: &str,
) -> Result<Option<Vehicle>> {
    let vehicle = vehicles.get(vehicle_id).await?;
    Ok(vehicle.filter(|v| v.is_owned_by(owner_id)))
}

/// Classify, filter and order every tracked item of the vehicle
async fn collect_candidates(
    tracked_items: &dyn TrackedItemStore,
    owner_id: &str,
    vehicle: &Vehicle,
    show_all: bool,
    search: Option<&str>,
    category: Option<Category>,
) -> Result<Vec<Candidate>> {
    let views = tracked_items
        .list_by_vehicle(owner_id, &vehicle.id, 0, ALL_ROWS)
        .await?;

    let mut candidates: Vec<Candidate> = views
        .into_iter()
        .filter(|view| display::matches_search(&view.catalog_item.name, search))
        .filter(|view| category.map_or(true, |c| c.matches(&view.catalog_item.name)))
        .map(|view| {
            let interval = view.effective_interval();
            let last = view.item.last_service_odometer;
            Candidate {
                classification: classify(vehicle.odometer, last, interval),
                lateness: lateness(vehicle.odometer, last, interval),
                view,
            }
        })
        .filter(|c| show_all || c.classification.status.requires_attention())
        .collect();

    sort_candidates(&mut candidates);
    Ok(candidates)
}

/// Never-serviced first, then by lateness descending (stable)
fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| compare_lateness(a.lateness, b.lateness));
}

fn compare_lateness(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x),
    }
}
