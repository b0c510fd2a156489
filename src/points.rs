//! Multi-Point Management
//!
//! Caller-side collection of independent site points keyed by point id.
//! Points keep insertion order; batch evaluation runs in parallel with Rayon
//! and returns outcomes in that same order.

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::{evaluate_with, ResultRecord};
use crate::error::LiquefactionError;
use crate::site::SiteRecord;
use crate::standard::StandardTables;

/// Errors from collection management
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SitePointsError {
    #[error("unknown point '{0}'")]
    UnknownPoint(String),

    #[error("at least one site point must be retained")]
    LastPoint,
}

/// Result of evaluating one point in a batch
#[derive(Debug, Clone, Serialize)]
pub struct PointOutcome {
    pub point_id: String,
    #[serde(serialize_with = "serialize_outcome")]
    pub result: Result<ResultRecord, LiquefactionError>,
}

fn serialize_outcome<S>(
    result: &Result<ResultRecord, LiquefactionError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(record) => map.serialize_entry("ok", record)?,
        Err(e) => map.serialize_entry("error", &e.to_string())?,
    }
    map.end()
}

/// Ordered collection of site points
#[derive(Debug, Clone, Default)]
pub struct SitePoints {
    points: Vec<(String, SiteRecord)>,
}

impl SitePoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert a point, replacing an existing one with the same id in place
    pub fn insert(&mut self, point_id: impl Into<String>, site: SiteRecord) {
        let point_id = point_id.into();
        match self.points.iter_mut().find(|(id, _)| *id == point_id) {
            Some((_, existing)) => *existing = site,
            None => self.points.push((point_id, site)),
        }
    }

    /// Append the default starter point as "Point N"; returns its id
    pub fn add_default_point(&mut self) -> String {
        let mut n = self.points.len() + 1;
        let mut point_id = format!("Point {}", n);
        while self.get(&point_id).is_some() {
            n += 1;
            point_id = format!("Point {}", n);
        }

        self.points.push((point_id.clone(), SiteRecord::default()));
        point_id
    }

    /// Remove a point. The last remaining point cannot be removed.
    pub fn remove(&mut self, point_id: &str) -> Result<SiteRecord, SitePointsError> {
        let idx = self
            .points
            .iter()
            .position(|(id, _)| id == point_id)
            .ok_or_else(|| SitePointsError::UnknownPoint(point_id.to_string()))?;

        if self.points.len() <= 1 {
            return Err(SitePointsError::LastPoint);
        }

        Ok(self.points.remove(idx).1)
    }

    pub fn get(&self, point_id: &str) -> Option<&SiteRecord> {
        self.points
            .iter()
            .find(|(id, _)| id == point_id)
            .map(|(_, site)| site)
    }

    pub fn get_mut(&mut self, point_id: &str) -> Option<&mut SiteRecord> {
        self.points
            .iter_mut()
            .find(|(id, _)| id == point_id)
            .map(|(_, site)| site)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteRecord)> {
        self.points.iter().map(|(id, site)| (id.as_str(), site))
    }

    /// Evaluate every point in parallel.
    ///
    /// A failing point does not stop the others; its outcome holds the error.
    pub fn evaluate_all(&self, tables: &StandardTables) -> Vec<PointOutcome> {
        tracing::info!("Evaluating {} site points", self.points.len());

        let outcomes: Vec<PointOutcome> = self
            .points
            .par_iter()
            .map(|(point_id, site)| PointOutcome {
                point_id: point_id.clone(),
                result: evaluate_with(site, tables),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                tracing::warn!("Point '{}' failed: {}", outcome.point_id, e);
            }
        }
        tracing::info!(
            "Evaluated {} points ({} ok, {} failed)",
            outcomes.len(),
            outcomes.len() - failed,
            failed
        );

        outcomes
    }
}

impl FromIterator<(String, SiteRecord)> for SitePoints {
    fn from_iter<I: IntoIterator<Item = (String, SiteRecord)>>(iter: I) -> Self {
        let mut points = SitePoints::new();
        for (id, site) in iter {
            points.insert(id, site);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SoilLayer;
    use crate::standard::standard;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut points = SitePoints::new();
        points.insert("A", SiteRecord::default());
        points.insert("B", SiteRecord::default());

        let mut replacement = SiteRecord::default();
        replacement.layers.truncate(1);
        points.insert("A", replacement);

        assert_eq!(points.ids().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(points.get("A").unwrap().layers.len(), 1);
    }

    #[test]
    fn test_iter_yields_points_in_insertion_order() {
        let mut points = SitePoints::new();
        points.insert("North", SiteRecord::default());
        points.insert("South", SiteRecord::new(SiteRecord::default().parameters, vec![]));

        let seen: Vec<(&str, usize)> = points
            .iter()
            .map(|(id, site)| (id, site.layers.len()))
            .collect();
        assert_eq!(seen, vec![("North", 5), ("South", 0)]);
    }

    #[test]
    fn test_add_default_point_numbers_sequentially() {
        let mut points = SitePoints::new();
        assert_eq!(points.add_default_point(), "Point 1");
        assert_eq!(points.add_default_point(), "Point 2");
        points.remove("Point 1").unwrap();
        assert_eq!(points.add_default_point(), "Point 3");
    }

    #[test]
    fn test_last_point_cannot_be_removed() {
        let mut points = SitePoints::new();
        points.add_default_point();
        assert_eq!(points.remove("Point 1").unwrap_err(), SitePointsError::LastPoint);
        assert_eq!(
            points.remove("nope").unwrap_err(),
            SitePointsError::UnknownPoint("nope".to_string())
        );
    }

    #[test]
    fn test_evaluate_all_keeps_order_and_isolates_failures() {
        let mut points = SitePoints::new();
        for i in 0..20 {
            points.insert(format!("P{}", i), SiteRecord::default());
        }
        points.get_mut("P7").unwrap().layers.push(SoilLayer::new(3.0, 0.0, 1.0));

        let outcomes = points.evaluate_all(standard());

        assert_eq!(outcomes.len(), 20);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.point_id, format!("P{}", i));
            assert_eq!(outcome.result.is_err(), i == 7);
        }
    }

    #[test]
    fn test_outcome_serializes_ok_or_error() {
        let mut points = SitePoints::new();
        points.insert("good", SiteRecord::default());
        points.insert("bad", SiteRecord::new(SiteRecord::default().parameters, vec![]));

        let outcomes = points.evaluate_all(standard());
        let json = serde_json::to_value(&outcomes).unwrap();

        assert!(json[0]["result"]["ok"]["ile"].is_number());
        assert_eq!(
            json[1]["result"]["error"],
            "invalid site: layer sequence is empty"
        );
    }
}
