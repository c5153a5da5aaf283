//! A restaurant row from the `restaurants` collection.
//!
//! Only `id` and `name` are guaranteed; the rest renders as a placeholder when absent.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub i64);

impl From<i64> for RestaurantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "restaurant_{}", self.0)
    }
}

/// A point on the map, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Restaurant {
    pub fn new(id: RestaurantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: None,
            image_url: None,
            rating: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
        self
    }

    /// Map position, when both halves are known.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }

    pub fn location_label(&self) -> &str {
        self.location.as_deref().unwrap_or("No location available")
    }

    /// Rating with one decimal, or "N/A".
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{rating:.1}"),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_with_missing_columns_deserialize() {
        let row: Restaurant = serde_json::from_str(r#"{"id": 3, "name": "Karahi House"}"#).unwrap();
        assert_eq!(row.id, RestaurantId(3));
        assert_eq!(row.location_label(), "No location available");
        assert_eq!(row.rating_label(), "N/A");
        assert!(row.coordinates().is_none());
    }

    #[test]
    fn test_coordinates_need_both_halves() {
        let mut restaurant = Restaurant::new(RestaurantId(1), "Tikka Point").with_rating(4.26);
        restaurant.latitude = Some(31.52);
        assert!(restaurant.coordinates().is_none());

        let restaurant = restaurant.with_coordinates(Coordinates::new(31.52, 74.35));
        assert_eq!(restaurant.coordinates(), Some(Coordinates::new(31.52, 74.35)));
        assert_eq!(restaurant.rating_label(), "4.3");
    }
}
