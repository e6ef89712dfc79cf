//! Record aggregation: flat travel rows into the four-level grouping
//! Department → Purpose → Transport mode → Route → trips.
//!
//! Ordering contract:
//! - Every level keeps first-seen insertion order of its keys.
//! - Trips keep input row order within their route.

use std::collections::HashMap;

use foundation::color::Rgb;
use tracing::{info, warn};

use crate::node::{GroupMetric, TripMetric};
use crate::palette::department_color;

/// Label used when a row carries no purpose or transport mode.
pub const OTHER_LABEL: &str = "Other";
/// Substituted for each missing origin/destination city.
pub const UNKNOWN_CITY: &str = "Unknown";

/// One parsed input row. Every field is optional; the aggregator decides what is usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub department: Option<String>,
    pub emission: Option<f64>,
    pub trip_id: Option<String>,
    pub purpose: Option<String>,
    pub transport_mode: Option<String>,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub net_cost: Option<f64>,
}

impl Row {
    /// Convenience constructor for the two required fields.
    pub fn new(department: impl Into<String>, emission: f64) -> Self {
        Self {
            department: Some(department.into()),
            emission: Some(emission),
            ..Self::default()
        }
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn transport_mode(mut self, mode: impl Into<String>) -> Self {
        self.transport_mode = Some(mode.into());
        self
    }

    pub fn route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin_city = Some(origin.into());
        self.destination_city = Some(destination.into());
        self
    }

    pub fn trip_id(mut self, id: impl Into<String>) -> Self {
        self.trip_id = Some(id.into());
        self
    }

    pub fn net_cost(mut self, cost: f64) -> Self {
        self.net_cost = Some(cost);
        self
    }
}

/// Insertion-ordered keyed groups.
#[derive(Debug, Clone)]
pub struct OrderedGroups<T> {
    items: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for OrderedGroups<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> OrderedGroups<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.items[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().map(|(_, v)| v)
    }

    /// Returns the group for `key`, creating it with `make` on first sight.
    pub fn entry_with(&mut self, key: &str, make: impl FnOnce() -> T) -> &mut T {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.items.len();
                self.items.push((key.to_string(), make()));
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.items[idx].1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripLeaf {
    pub label: String,
    pub metric: TripMetric,
}

#[derive(Debug, Clone, Default)]
pub struct RouteGroup {
    pub metric: GroupMetric,
    pub trips: Vec<TripLeaf>,
}

#[derive(Debug, Clone, Default)]
pub struct TransportGroup {
    pub metric: GroupMetric,
    pub routes: OrderedGroups<RouteGroup>,
}

#[derive(Debug, Clone, Default)]
pub struct PurposeGroup {
    pub metric: GroupMetric,
    pub modes: OrderedGroups<TransportGroup>,
}

#[derive(Debug, Clone)]
pub struct DepartmentGroup {
    pub color: Rgb,
    pub metric: GroupMetric,
    pub purposes: OrderedGroups<PurposeGroup>,
}

impl DepartmentGroup {
    fn new(name: &str) -> Self {
        Self {
            color: department_color(name),
            metric: GroupMetric::default(),
            purposes: OrderedGroups::new(),
        }
    }

    /// Sub-linear in total emissions so large departments do not dominate the canvas.
    pub fn radius(&self) -> f64 {
        100.0 + 0.5 * self.metric.emissions.max(0.0).sqrt()
    }

    pub fn label_size(&self) -> f32 {
        (32.0 + 12.0 * (self.metric.emissions.max(0.0) / 2000.0).sqrt()) as f32
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AggregateStats {
    pub accepted_rows: usize,
    pub skipped_rows: usize,
}

/// Output of [`aggregate`]: grouped trips without coordinates.
#[derive(Debug, Clone, Default)]
pub struct HierarchyForest {
    pub departments: OrderedGroups<DepartmentGroup>,
    pub stats: AggregateStats,
}

impl HierarchyForest {
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    pub fn trip_count(&self) -> u64 {
        self.departments.values().map(|d| d.metric.trip_count).sum()
    }

    pub fn total_emissions(&self) -> f64 {
        self.departments.values().map(|d| d.metric.emissions).sum()
    }
}

/// Group rows into a [`HierarchyForest`].
///
/// Rows without a department or without a usable emission value are skipped and
/// only counted in [`AggregateStats::skipped_rows`]. Empty input yields an empty forest.
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a Row>) -> HierarchyForest {
    let mut forest = HierarchyForest::default();

    for (position, row) in rows.into_iter().enumerate() {
        let (Some(department), Some(emission)) = (present(&row.department), usable(row.emission))
        else {
            forest.stats.skipped_rows += 1;
            continue;
        };
        forest.stats.accepted_rows += 1;

        let ordinal = position + 1;
        let purpose = present(&row.purpose).unwrap_or(OTHER_LABEL);
        let mode = present(&row.transport_mode).unwrap_or(OTHER_LABEL);
        let route = route_key(row);

        let dept = forest
            .departments
            .entry_with(department, || DepartmentGroup::new(department));
        dept.metric.add_trip(emission);

        let purpose_group = dept.purposes.entry_with(purpose, PurposeGroup::default);
        purpose_group.metric.add_trip(emission);

        let mode_group = purpose_group.modes.entry_with(mode, TransportGroup::default);
        mode_group.metric.add_trip(emission);

        let route_group = mode_group.routes.entry_with(&route, RouteGroup::default);
        route_group.metric.add_trip(emission);

        let trip_id = present(&row.trip_id).map(str::to_string);
        route_group.trips.push(TripLeaf {
            label: trip_id.clone().unwrap_or_else(|| format!("Trip {ordinal}")),
            metric: TripMetric {
                emission,
                cost: row.net_cost.filter(|c| c.is_finite()),
                trip_id,
            },
        });
    }

    info!(
        departments = forest.department_count(),
        accepted = forest.stats.accepted_rows,
        skipped = forest.stats.skipped_rows,
        "aggregated travel rows"
    );
    if forest.stats.accepted_rows == 0 && forest.stats.skipped_rows > 0 {
        warn!(
            skipped = forest.stats.skipped_rows,
            "no usable rows; scene will be empty"
        );
    }

    forest
}

/// `"origin → destination"` with each missing city replaced by [`UNKNOWN_CITY`].
pub fn route_key(row: &Row) -> String {
    let origin = present(&row.origin_city).unwrap_or(UNKNOWN_CITY);
    let destination = present(&row.destination_city).unwrap_or(UNKNOWN_CITY);
    format!("{origin} → {destination}")
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn usable(emission: Option<f64>) -> Option<f64> {
    emission.filter(|e| e.is_finite() && *e >= 0.0)
}
