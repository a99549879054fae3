//! Trip point domain model and reference data.
//!
//! A point is one leg of a trip: a typed, priced, scheduled stop at a
//! destination with optional add-on offers. Destinations and offer catalogs are
//! immutable reference data loaded once alongside the points.
//!
//! Field names on the wire follow the data file format (`base_price`,
//! `date_from`, `date_to`, `is_favorite`, `type`).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identifier of a persisted point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed catalog of point types.
///
/// Each type owns one [`OfferCatalog`] listing the offers a point of that type
/// may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointType {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointType {
    /// Every point type, in catalog order.
    pub const ALL: [Self; 9] = [
        Self::Taxi,
        Self::Bus,
        Self::Train,
        Self::Ship,
        Self::Drive,
        Self::Flight,
        Self::CheckIn,
        Self::Sightseeing,
        Self::Restaurant,
    ];

    /// Human-readable label used by the renderer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Taxi => "Taxi",
            Self::Bus => "Bus",
            Self::Train => "Train",
            Self::Ship => "Ship",
            Self::Drive => "Drive",
            Self::Flight => "Flight",
            Self::CheckIn => "Check-in",
            Self::Sightseeing => "Sightseeing",
            Self::Restaurant => "Restaurant",
        }
    }
}

/// The fields of a point, without an identity.
///
/// Used as the payload of an add action: the data-access layer assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPoint {
    #[serde(rename = "type")]
    pub kind: PointType,
    pub destination: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    #[serde(default)]
    pub offers: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl NewPoint {
    /// Attaches an identity, producing a persisted point.
    #[must_use]
    pub fn with_id(self, id: PointId) -> Point {
        Point {
            id,
            kind: self.kind,
            destination: self.destination,
            date_from: self.date_from,
            date_to: self.date_to,
            base_price: self.base_price,
            offers: self.offers,
            is_favorite: self.is_favorite,
        }
    }
}

/// A persisted trip point.
///
/// Owned by the store. The board reads points and hands modified copies back to
/// the store; it never edits the store's collection in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    #[serde(rename = "type")]
    pub kind: PointType,
    /// Id of the [`Destination`] this point visits.
    pub destination: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    /// Ids of the selected offers from this type's catalog.
    #[serde(default)]
    pub offers: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Point {
    /// Time spent at the point. Negative spans are clamped to zero.
    #[must_use]
    pub fn duration(&self) -> Duration {
        (self.date_to - self.date_from).max(Duration::zero())
    }

    /// Returns a copy with the favourite flag flipped.
    #[must_use]
    pub fn toggled_favorite(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }
}

/// A destination photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    #[serde(default)]
    pub description: String,
}

/// Reference data describing a place a point may visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

/// One purchasable add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// The ordered offers available to points of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCatalog {
    #[serde(rename = "type")]
    pub kind: PointType,
    pub offers: Vec<Offer>,
}

/// Finds the destination with the given id.
#[must_use]
pub fn find_destination<'a>(destinations: &'a [Destination], id: &str) -> Option<&'a Destination> {
    destinations.iter().find(|destination| destination.id == id)
}

/// Returns the offers of `catalogs` that `point` has selected, in catalog order.
#[must_use]
pub fn selected_offers<'a>(catalogs: &'a [OfferCatalog], point: &Point) -> Vec<&'a Offer> {
    catalogs
        .iter()
        .find(|catalog| catalog.kind == point.kind)
        .map(|catalog| {
            catalog
                .offers
                .iter()
                .filter(|offer| point.offers.contains(&offer.id))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Point {
        Point {
            id: PointId::new("p-1"),
            kind: PointType::CheckIn,
            destination: "d-1".to_string(),
            date_from: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            base_price: 120,
            offers: vec!["o-2".to_string()],
            is_favorite: false,
        }
    }

    #[test]
    fn wire_format_uses_data_file_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "check-in");
        assert_eq!(json["base_price"], 120);
        assert_eq!(json["is_favorite"], false);
        assert_eq!(json["id"], "p-1");
    }

    #[test]
    fn duration_never_negative() {
        let mut point = sample();
        assert_eq!(point.duration(), Duration::minutes(150));
        point.date_to = point.date_from - Duration::hours(1);
        assert_eq!(point.duration(), Duration::zero());
    }

    #[test]
    fn selected_offers_follow_catalog_of_point_type() {
        let catalogs = vec![
            OfferCatalog {
                kind: PointType::Taxi,
                offers: vec![Offer { id: "o-2".into(), title: "Wrong type".into(), price: 1 }],
            },
            OfferCatalog {
                kind: PointType::CheckIn,
                offers: vec![
                    Offer { id: "o-1".into(), title: "Breakfast".into(), price: 20 },
                    Offer { id: "o-2".into(), title: "Late checkout".into(), price: 35 },
                ],
            },
        ];
        let offers = selected_offers(&catalogs, &sample());
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].title, "Late checkout");
    }
}
