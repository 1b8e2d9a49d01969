use crate::geo::datum::Datum;

/// Point on the surface of a celestial body, given in degrees.
pub trait GeoPoint {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lon(&self) -> f64;

    /// Latitude in radians.
    fn lat_rad(&self) -> f64 {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> f64 {
        self.lon().to_radians()
    }

    /// Great-circle (haversine) distance to the other point in meters, using the mean earth radius.
    fn distance(&self, other: &impl GeoPoint) -> f64 {
        let d_lat = other.lat_rad() - self.lat_rad();
        let d_lon = other.lon_rad() - self.lon_rad();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat_rad().cos() * other.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);

        2.0 * Datum::MEAN_RADIUS * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// Geographic point that can be constructed from its coordinates.
pub trait NewGeoPoint: GeoPoint + Sized {
    /// Creates a point from latitude and longitude in degrees.
    fn latlon(lat: f64, lon: f64) -> Self;

    /// Creates a point from longitude and latitude in degrees.
    fn lonlat(lon: f64, lat: f64) -> Self {
        Self::latlon(lat, lon)
    }
}
