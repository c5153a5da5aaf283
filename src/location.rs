//! Device location, for the "delivering to" label on the home view.
//!
//! Platform geolocation is out of reach here, so it sits behind [`Locator`]. A denied
//! permission is an ordinary outcome the caller shows as a prompt, not a failure of the app.

use crate::model::Coordinates;
use async_trait::async_trait;
use std::fmt::{self, Display};
use thiserror::Error;
use tracing::{instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// City and country of a reverse-geocoded position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub city: String,
    pub country: String,
}

impl Locality {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }
}

impl Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;

    /// `Ok(None)` when the position has no known locality.
    async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<Locality>, LocationError>;
}

/// Always answers with the same position, or always refuses.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    position: Option<Coordinates>,
    locality: Option<Locality>,
}

impl FixedLocator {
    pub fn new(position: Coordinates, locality: Option<Locality>) -> Self {
        Self {
            position: Some(position),
            locality,
        }
    }

    pub fn denied() -> Self {
        Self {
            position: None,
            locality: None,
        }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::PermissionDenied)
    }

    async fn reverse_geocode(&self, _at: Coordinates) -> Result<Option<Locality>, LocationError> {
        if self.position.is_none() {
            return Err(LocationError::PermissionDenied);
        }
        Ok(self.locality.clone())
    }
}

/// The label shown on the home view: the locality when one is known, otherwise `None`.
///
/// Geocoding failures are logged and dropped; only a missing position is reported.
#[instrument(skip(locator))]
pub async fn delivery_label(locator: &dyn Locator) -> Result<Option<String>, LocationError> {
    let position = locator.current_position().await?;
    match locator.reverse_geocode(position).await {
        Ok(locality) => Ok(locality.map(|l| l.to_string())),
        Err(e) => {
            warn!(error = %e, "Could not resolve address");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_label_is_city_and_country() {
        let locator = FixedLocator::new(
            Coordinates::new(31.5204, 74.3587),
            Some(Locality::new("Lahore", "Pakistan")),
        );
        assert_eq!(
            delivery_label(&locator).await,
            Ok(Some("Lahore, Pakistan".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unknown_locality_has_no_label() {
        let locator = FixedLocator::new(Coordinates::default(), None);
        assert_eq!(delivery_label(&locator).await, Ok(None));
    }

    #[tokio::test]
    async fn test_denied_permission_is_reported() {
        let locator = FixedLocator::denied();
        assert_eq!(
            delivery_label(&locator).await,
            Err(LocationError::PermissionDenied)
        );
    }
}
