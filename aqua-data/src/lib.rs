//! Presentation data for the map and chart front ends.
//!
//! This crate turns catalogue regions into plain serializable series that
//! an external chart or map library can draw directly.

/// Pie and area chart series for the region detail panel.
pub mod charts {
    use aqua_core::region::Region;
    use chrono::Month;
    use log::debug;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use serde::Serialize;

    /// Number of months shown in the rainfall-vs-usage chart.
    pub const OUTLOOK_MONTHS: usize = 6;

    /// One wedge of a pie chart.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Slice {
        pub name: &'static str,
        /// Percentage share
        pub value: u32,
        pub color: &'static str,
    }

    /// Rainfall and usage estimate for one month.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct MonthlyPoint {
        /// Three-letter month name, e.g. "Jan"
        pub month: String,
        /// Rainfall in mm
        pub rainfall: f64,
        /// Usage in cubic meters per capita
        pub usage: f64,
    }

    /// Groundwater vs surface-water share.
    pub fn water_sources(region: &Region) -> Vec<Slice> {
        vec![
            Slice {
                name: "Groundwater",
                value: region.groundwater_pct,
                color: "#1E88E5",
            },
            Slice {
                name: "Surface Water",
                value: region.surface_water_pct,
                color: "#90CAF9",
            },
        ]
    }

    /// Agriculture / industrial / domestic share of withdrawals.
    pub fn usage_split(region: &Region) -> Vec<Slice> {
        vec![
            Slice {
                name: "Agriculture",
                value: region.agriculture_pct,
                color: "#43A047",
            },
            Slice {
                name: "Industrial",
                value: region.industrial_pct,
                color: "#FF8F00",
            },
            Slice {
                name: "Domestic",
                value: region.domestic_pct,
                color: "#1E88E5",
            },
        ]
    }

    /// Illustrative January-June series around the region's annual means.
    ///
    /// Rainfall is the monthly mean scaled by a factor in `[0.8, 1.2)`;
    /// usage is monthly availability scaled by a factor in `[0.9, 1.2)`.
    pub fn monthly_outlook<R: Rng>(region: &Region, rng: &mut R) -> Vec<MonthlyPoint> {
        let monthly_rain = region.average_rainfall as f64 / 12.0;
        let monthly_availability = region.availability_per_capita as f64 / 12.0;
        let mut month = Month::January;
        let mut points = Vec::with_capacity(OUTLOOK_MONTHS);
        for _ in 0..OUTLOOK_MONTHS {
            points.push(MonthlyPoint {
                month: month.name()[..3].to_string(),
                rainfall: monthly_rain * rng.gen_range(0.8..1.2),
                usage: monthly_availability * rng.gen_range(0.9..1.2),
            });
            month = month.succ();
        }
        points
    }

    /// FNV-1a over the region id, stable across platforms and releases.
    fn seed_for(id: &str) -> u64 {
        id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
    }

    /// `monthly_outlook` with a generator seeded from the region id, so a
    /// region always gets the same series.
    pub fn monthly_outlook_seeded(region: &Region) -> Vec<MonthlyPoint> {
        let seed = seed_for(&region.id);
        debug!("monthly outlook for {} with seed {:#x}", region.id, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        monthly_outlook(region, &mut rng)
    }

}

/// Marker, legend and GeoJSON data for the water-stress map.
pub mod map {
    use aqua_core::region::{Region, RegionCatalogue};
    use aqua_core::stress::StressLevel;
    use serde::Serialize;
    use serde_json::{json, Value};

    /// Initial map viewport.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct MapView {
        pub center: (f64, f64),
        pub zoom: u8,
    }

    /// Centred on India.
    pub const DEFAULT_VIEW: MapView = MapView {
        center: (23.5937, 78.9629),
        zoom: 5,
    };

    /// Circle marker styling shared by all regions.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct MarkerStyle {
        pub radius: u32,
        pub stroke_color: &'static str,
        pub weight: u32,
        pub opacity: f64,
        pub fill_opacity: f64,
    }

    pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
        radius: 15,
        stroke_color: "#fff",
        weight: 1,
        opacity: 1.0,
        fill_opacity: 0.8,
    };

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct RegionMarker {
        pub id: String,
        pub label: String,
        pub latitude: f64,
        pub longitude: f64,
        pub stress_level: StressLevel,
        pub fill_color: &'static str,
    }

    impl From<&Region> for RegionMarker {
        fn from(region: &Region) -> Self {
            RegionMarker {
                id: region.id.clone(),
                label: region.name.clone(),
                latitude: region.latitude,
                longitude: region.longitude,
                stress_level: region.stress_level,
                fill_color: region.stress_color(),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct LegendEntry {
        pub label: &'static str,
        pub color: &'static str,
    }

    pub fn markers(catalogue: &RegionCatalogue) -> Vec<RegionMarker> {
        catalogue.regions().iter().map(RegionMarker::from).collect()
    }

    /// Legend rows, least severe first.
    pub fn legend() -> Vec<LegendEntry> {
        StressLevel::ALL
            .iter()
            .map(|level| LegendEntry {
                label: level.legend_label(),
                color: level.color(),
            })
            .collect()
    }

    /// GeoJSON FeatureCollection of region points.
    ///
    /// GeoJSON positions are `[longitude, latitude]`.
    pub fn to_geojson(catalogue: &RegionCatalogue) -> Value {
        let features: Vec<Value> = catalogue
            .regions()
            .iter()
            .map(|region| {
                json!({
                    "type": "Feature",
                    "id": region.id,
                    "geometry": {
                        "type": "Point",
                        "coordinates": [region.longitude, region.latitude],
                    },
                    "properties": {
                        "name": region.name,
                        "stressLevel": region.stress_level,
                        "color": region.stress_color(),
                        "availabilityPerCapita": region.availability_per_capita,
                        "averageRainfall": region.average_rainfall,
                        "groundwaterPct": region.groundwater_pct,
                        "surfaceWaterPct": region.surface_water_pct,
                        "agriculturePct": region.agriculture_pct,
                        "industrialPct": region.industrial_pct,
                        "domesticPct": region.domestic_pct,
                    },
                })
            })
            .collect();
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use aqua_core::region::catalogue;

        #[test]
        fn test_markers() {
            let markers = markers(catalogue());
            assert_eq!(markers.len(), catalogue().len());
            let rajasthan = markers.iter().find(|m| m.id == "IN-RJ").unwrap();
            assert_eq!(rajasthan.label, "Rajasthan");
            assert_eq!(rajasthan.fill_color, "#BF360C");
            assert_eq!(rajasthan.latitude, 27.0238);
        }

        #[test]
        fn test_legend_order() {
            let labels: Vec<&str> = legend().iter().map(|e| e.label).collect();
            assert_eq!(
                labels,
                vec!["Low Stress", "Medium", "High", "Critical", "Emergency"]
            );
        }

        #[test]
        fn test_geojson() {
            let geojson = to_geojson(catalogue());
            assert_eq!(geojson["type"], "FeatureCollection");
            let features = geojson["features"].as_array().unwrap();
            assert_eq!(features.len(), 8);
            let delhi = &features[0];
            assert_eq!(delhi["id"], "IN-DL");
            assert_eq!(delhi["geometry"]["coordinates"][0], 77.1025);
            assert_eq!(delhi["geometry"]["coordinates"][1], 28.7041);
            assert_eq!(delhi["properties"]["stressLevel"], "critical");
        }

        #[test]
        fn test_default_view() {
            assert_eq!(DEFAULT_VIEW.zoom, 5);
            assert_eq!(MARKER_STYLE.radius, 15);
        }
    }
}
