use hifitime::Unit;

use skywatch::observers::Observer;
use skywatch::orbital_params::{DerivedParameters, OrbitClass};
use skywatch::region::{find_region_entries, BoundingBox};
use skywatch::sgp4_oracle::Sgp4Oracle;
use skywatch::tle::parse_tle;
use skywatch::tle_history::compare_texts;
use skywatch::visibility::find_passes;
use skywatch::PositionOracle;

const ISS: &str = "1 25544U 98067A   24079.91511194  .00016717  00000+0  30571-3 0  9993\n\
                   2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.49560532394779";

/// Sun-synchronous Earth-observation orbit: 98.7° inclination, 14.20 rev/day.
const SSO: &str = "1 44804U 19081A   24080.50000000  .00001000  00000+0  45000-4 0  9991\n\
                   2 44804  98.7000 150.0000 0012000  90.0000 270.1000 14.20000000 22308";

#[test]
fn parse_and_derive_a_sun_synchronous_satellite() {
    let elements = parse_tle(SSO).unwrap();
    assert_eq!(elements.catalog_number, 44804);
    assert_eq!(elements.inclination_deg, 98.7);
    assert_eq!(elements.mean_motion, 14.20);

    let params = DerivedParameters::from_elements(&elements).unwrap();
    assert_eq!(params.orbit_class, OrbitClass::SunSynchronous);
    assert!((params.period_minutes - 101.40845070422536).abs() < 1e-9);
    // ~830 km circular orbit
    assert!(params.perigee_km > 750.0 && params.apogee_km < 900.0);
    assert!(params.apogee_km >= params.perigee_km);
}

#[test]
fn comparator_covers_raw_and_derived_parameters() {
    let comparison = compare_texts(ISS, SSO).unwrap();

    // Mixing two different objects is nonsense operationally but exercises
    // every tracked parameter with nonzero drift.
    for name in skywatch::tle_history::TRACKED_PARAMETERS {
        let delta = comparison.delta(name).unwrap();
        assert_ne!(delta.absolute_delta, 0.0, "{name}");
    }
    assert!(comparison.elapsed_days < 0.0);
}

#[test]
fn sgp4_subpoint_is_physical() {
    let elements = parse_tle(ISS).unwrap();
    let oracle = Sgp4Oracle::new(&elements).unwrap();

    let mut t = elements.epoch;
    let end = elements.epoch + Unit::Hour * 3.0;
    while t <= end {
        let point = oracle.position_at(t).unwrap();
        // The sub-satellite latitude is bounded by the inclination and the
        // ISS flies between roughly 400 and 440 km.
        assert!(point.lat_deg.abs() <= 52.0);
        assert!((-180.0..=180.0).contains(&point.lon_deg));
        assert!(point.altitude_km > 300.0 && point.altitude_km < 550.0);
        t = t + Unit::Minute * 7.0;
    }
}

#[test]
fn sgp4_topocentric_is_consistent() {
    let elements = parse_tle(ISS).unwrap();
    let oracle = Sgp4Oracle::new(&elements).unwrap();
    let observer = Observer::new(51.6, 0.0, 0.0, Some("mid-latitude".into()));

    let topo = oracle.topocentric_at(&observer, elements.epoch).unwrap();
    assert!((-90.0..=90.0).contains(&topo.elevation_deg));
    assert!((0.0..360.0).contains(&topo.azimuth_deg));
    // Slant range is bounded below by the orbit altitude and above by the
    // horizon-to-horizon geometry.
    assert!(topo.range_km > 350.0 && topo.range_km < 15_000.0);
}

#[test]
fn sgp4_pass_scan_over_a_day() {
    let elements = parse_tle(ISS).unwrap();
    let oracle = Sgp4Oracle::new(&elements).unwrap();
    // An observer under the northern apex of the ISS ground track sees
    // several passes every day.
    let observer = Observer::new(51.6, 0.0, 0.0, Some("mid-latitude".into()));

    let passes = find_passes(
        &oracle,
        &observer,
        elements.epoch,
        elements.epoch + Unit::Day * 1.0,
        10.0,
    )
    .unwrap();

    assert!(!passes.is_empty());
    for pass in &passes {
        assert!(pass.duration_minutes > 0.5 && pass.duration_minutes < 15.0);
        let span = (pass.set.time - pass.rise.time).to_unit(Unit::Minute);
        assert!((pass.duration_minutes - span).abs() < 1e-9);
        if let Some(culmination) = pass.culmination {
            assert!(pass.rise.time < culmination.time);
            assert!(culmination.time < pass.set.time);
            assert!(culmination.elevation_deg >= 10.0);
        }
    }
}

#[test]
fn sgp4_region_scan_finds_an_india_transit() {
    let elements = parse_tle(SSO).unwrap();
    let oracle = Sgp4Oracle::new(&elements).unwrap();
    let india = BoundingBox::new(6.0, 37.0, 68.0, 97.0);

    let entries = find_region_entries(
        &oracle,
        &india,
        elements.epoch,
        elements.epoch + Unit::Day * 1.0,
        5.0,
        1.0,
        20,
    )
    .unwrap();

    // A 14.2 rev/day sun-synchronous track sweeps every longitude daily, so
    // a region the width of India is crossed at least once.
    assert!(!entries.is_empty());
    for entry in &entries {
        assert!(india.contains(entry.lat_deg, entry.lon_deg));
    }
}

#[test]
fn results_serialize_for_transport() {
    let elements = parse_tle(SSO).unwrap();
    let params = DerivedParameters::from_elements(&elements).unwrap();

    let json = serde_json::to_string(&params).unwrap();
    assert!(json.contains("\"period_minutes\""));
    assert!(json.contains("\"orbit_class\""));

    let comparison = compare_texts(ISS, ISS).unwrap();
    let json = serde_json::to_string(&comparison).unwrap();
    assert!(json.contains("\"elapsed_days\":0.0"));
}
