use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Meter};

/// A ground observer position used for topocentric visibility queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude, degrees north.
    pub latitude: Degree,
    /// Longitude, degrees east of Greenwich.
    pub longitude: Degree,
    /// Altitude above the ellipsoid, meters.
    pub altitude: Meter,
    pub name: Option<String>,
}

impl Observer {
    pub fn new(latitude: Degree, longitude: Degree, altitude: Meter, name: Option<String>) -> Observer {
        Observer {
            latitude,
            longitude,
            altitude,
            name,
        }
    }

    /// Stable identity used to key cached results for this observer.
    pub fn cache_label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.4},{:.4},{:.0}", self.latitude, self.longitude, self.altitude),
        }
    }
}

#[cfg(test)]
mod observer_test {
    use super::Observer;

    #[test]
    fn test_observer_constructor() {
        let observer = Observer::new(27.5667, 76.6167, 268.0, Some("Alwar".to_string()));
        assert_eq!(observer.latitude, 27.5667);
        assert_eq!(observer.longitude, 76.6167);
        assert_eq!(observer.cache_label(), "Alwar");

        let anonymous = Observer::new(0.0, 0.0, 0.0, None);
        assert_eq!(anonymous.cache_label(), "0.0000,0.0000,0");
    }
}
