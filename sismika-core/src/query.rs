//! Typed catalog queries.
//!
//! Caller-facing [`EarthquakeFilters`] resolve into a [`Predicate`] plus a
//! [`SortSpec`]. The predicate carries its own reference evaluation
//! ([`Predicate::matches`]) which every store backend must agree with,
//! whether it pushes conditions down into its engine or refines in
//! memory.

use std::cmp::Ordering;

use serde_json::{json, Map, Value};

use crate::{entities::*, repositories::Pagination};

/// Caller-facing filter surface of the earthquake catalog.
///
/// All range bounds are inclusive and compose exactly as given; a caller
/// that swaps min and max gets the empty result, not a correction. The
/// intensity bounds rank by the unified moment magnitude.
#[derive(Debug, Clone, Default)]
pub struct EarthquakeFilters {
    pub min_depth_km: Option<f64>,
    pub max_depth_km: Option<f64>,
    pub min_intensity: Option<f64>,
    pub max_intensity: Option<f64>,
    pub min_time: Option<Timestamp>,
    pub max_time: Option<Timestamp>,
    pub bounds: Option<GeoBounds>,
    pub center: Option<MapPoint>,
    pub radius_meters: Option<f64>,
    pub order_by_depth: bool,
    pub order_by_intensity: bool,
    pub order_by_time: bool,
    pub limit: Option<u64>,
}

/// One conjunct of a catalog predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    DepthAtLeast(f64),
    DepthAtMost(f64),
    IntensityAtLeast(f64),
    IntensityAtMost(f64),
    TimeAtEarliest(Timestamp),
    TimeAtLatest(Timestamp),
    WithinBounds(GeoBounds),
    WithinCap(SphericalCap),
}

impl Condition {
    pub fn matches(&self, event: &EarthquakeEvent) -> bool {
        match *self {
            Self::DepthAtLeast(min) => event.depth_km >= min,
            Self::DepthAtMost(max) => event.depth_km <= max,
            Self::IntensityAtLeast(min) => event.magnitudes.mw >= min,
            Self::IntensityAtMost(max) => event.magnitudes.mw <= max,
            Self::TimeAtEarliest(min) => event.occurred_at >= min,
            Self::TimeAtLatest(max) => event.occurred_at <= max,
            Self::WithinBounds(ref bounds) => bounds.contains(event.epicenter),
            Self::WithinCap(ref cap) => cap.contains(event.epicenter),
        }
    }
}

/// Pure conjunction of conditions. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate(Vec<Condition>);

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.0
    }

    pub fn push(&mut self, condition: Condition) {
        self.0.push(condition);
    }

    /// Reference evaluation against a single event.
    pub fn matches(&self, event: &EarthquakeEvent) -> bool {
        self.0.iter().all(|condition| condition.matches(event))
    }

    /// Renders the predicate as the equivalent document-store filter,
    /// used for query logging and cross-checking against document
    /// stores. Conditions on the same field merge into one range
    /// document.
    pub fn as_document(&self) -> Value {
        let mut doc = Map::new();
        for condition in &self.0 {
            match *condition {
                Condition::DepthAtLeast(min) => merge(&mut doc, "depth", "$gte", json!(min)),
                Condition::DepthAtMost(max) => merge(&mut doc, "depth", "$lte", json!(max)),
                Condition::IntensityAtLeast(min) => merge(&mut doc, "mw", "$gte", json!(min)),
                Condition::IntensityAtMost(max) => merge(&mut doc, "mw", "$lte", json!(max)),
                Condition::TimeAtEarliest(min) => {
                    merge(&mut doc, "time", "$gte", json!(min.to_string()));
                }
                Condition::TimeAtLatest(max) => {
                    merge(&mut doc, "time", "$lte", json!(max.to_string()));
                }
                Condition::WithinBounds(ref bounds) => {
                    // The ring closes by repeating the first corner.
                    let ring: Vec<Value> = bounds
                        .corners()
                        .iter()
                        .chain(bounds.corners().first())
                        .map(|c| json!([c.lng(), c.lat()]))
                        .collect();
                    merge(&mut doc, "coord", "$geoWithin", json!({ "$polygon": ring }));
                }
                Condition::WithinCap(ref cap) => {
                    let center = [cap.center().lng(), cap.center().lat()];
                    merge(
                        &mut doc,
                        "coord",
                        "$geoWithin",
                        json!({ "$centerSphere": [center, cap.angular_radius_rad()] }),
                    );
                }
            }
        }
        Value::Object(doc)
    }
}

fn merge(doc: &mut Map<String, Value>, field: &str, op: &str, value: Value) {
    let entry = doc.entry(field.to_owned()).or_insert_with(|| json!({}));
    if let Value::Object(ops) = entry {
        match (ops.get_mut(op), value) {
            // Two geo selectors on the same field share one operator
            // object instead of clobbering each other.
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                existing.extend(incoming);
            }
            (_, value) => {
                ops.insert(op.to_owned(), value);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Depth,
    Intensity,
    Time,
}

/// Ordered list of sort keys, most significant first, all ascending.
///
/// The priority is fixed (depth before intensity before time) so result
/// order stays reproducible regardless of how callers assemble their
/// filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec(Vec<SortKey>);

impl SortSpec {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn push(&mut self, key: SortKey) {
        self.0.push(key);
    }

    pub fn cmp(&self, a: &EarthquakeEvent, b: &EarthquakeEvent) -> Ordering {
        for key in &self.0 {
            let ordering = match key {
                SortKey::Depth => a.depth_km.total_cmp(&b.depth_km),
                SortKey::Intensity => a.magnitudes.mw.total_cmp(&b.magnitudes.mw),
                SortKey::Time => a.occurred_at.cmp(&b.occurred_at),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    pub fn as_document(&self) -> Value {
        let mut doc = Map::new();
        for key in &self.0 {
            let field = match key {
                SortKey::Depth => "depth",
                SortKey::Intensity => "mw",
                SortKey::Time => "time",
            };
            doc.insert(field.to_owned(), json!(1));
        }
        Value::Object(doc)
    }
}

/// Fully resolved catalog query.
#[derive(Debug, Clone, Default)]
pub struct EarthquakeQuery {
    pub predicate: Predicate,
    pub sort: SortSpec,
    pub pagination: Pagination,
}

impl EarthquakeQuery {
    pub fn as_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("filter".to_owned(), self.predicate.as_document());
        if !self.sort.is_empty() {
            doc.insert("sort".to_owned(), self.sort.as_document());
        }
        if let Some(offset) = self.pagination.offset {
            doc.insert("skip".to_owned(), json!(offset));
        }
        if let Some(limit) = self.pagination.limit {
            doc.insert("limit".to_owned(), json!(limit));
        }
        Value::Object(doc)
    }
}

/// Resolves the filter surface into a predicate and a sort specification.
///
/// The spherical-cap condition only forms when both the center and the
/// radius are given; either one alone is ignored.
pub fn build_earthquake_query(filters: &EarthquakeFilters) -> (Predicate, SortSpec) {
    let mut predicate = Predicate::default();
    if let Some(min) = filters.min_depth_km {
        predicate.push(Condition::DepthAtLeast(min));
    }
    if let Some(max) = filters.max_depth_km {
        predicate.push(Condition::DepthAtMost(max));
    }
    if let Some(min) = filters.min_intensity {
        predicate.push(Condition::IntensityAtLeast(min));
    }
    if let Some(max) = filters.max_intensity {
        predicate.push(Condition::IntensityAtMost(max));
    }
    if let Some(min) = filters.min_time {
        predicate.push(Condition::TimeAtEarliest(min));
    }
    if let Some(max) = filters.max_time {
        predicate.push(Condition::TimeAtLatest(max));
    }
    if let Some(bounds) = filters.bounds {
        predicate.push(Condition::WithinBounds(bounds));
    }
    if let (Some(center), Some(radius_meters)) = (filters.center, filters.radius_meters) {
        predicate.push(Condition::WithinCap(
            SphericalCap::from_center_and_radius_meters(center, radius_meters),
        ));
    }

    let mut sort = SortSpec::default();
    if filters.order_by_depth {
        sort.push(SortKey::Depth);
    }
    if filters.order_by_intensity {
        sort.push(SortKey::Intensity);
    }
    if filters.order_by_time {
        sort.push(SortKey::Time);
    }
    (predicate, sort)
}
