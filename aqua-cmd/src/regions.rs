//! Region listing, region detail and map export.

use crate::OutputFormat;
use aqua_core::region::{tips_for, Region, RegionCatalogue};
use aqua_data::charts::{self, MonthlyPoint, Slice};
use aqua_data::map::{self, LegendEntry, MapView, MarkerStyle, RegionMarker};
use log::info;
use serde::Serialize;
use std::io::Write;

/// Everything the region detail panel shows.
#[derive(Debug, Serialize)]
pub struct RegionDetail<'a> {
    pub region: &'a Region,
    pub stress_label: String,
    pub water_sources: Vec<Slice>,
    pub usage_split: Vec<Slice>,
    pub monthly_outlook: Vec<MonthlyPoint>,
    pub tips: &'static [&'static str],
}

impl<'a> RegionDetail<'a> {
    pub fn new(region: &'a Region) -> Self {
        RegionDetail {
            region,
            stress_label: region.stress_level.display_name(),
            water_sources: charts::water_sources(region),
            usage_split: charts::usage_split(region),
            monthly_outlook: charts::monthly_outlook_seeded(region),
            tips: tips_for(Some(region)),
        }
    }
}

#[derive(Debug, Serialize)]
struct MapPayload {
    view: MapView,
    style: MarkerStyle,
    legend: Vec<LegendEntry>,
    markers: Vec<RegionMarker>,
}

/// Write the catalogue as an aligned table, CSV or JSON.
///
/// CSV output uses the fixture column names so it can be fed back via `--regions`.
pub fn write_regions<W: Write>(
    out: &mut W,
    catalogue: &RegionCatalogue,
    format: OutputFormat,
) -> anyhow::Result<()> {
    info!("Writing {} regions as {:?}", catalogue.len(), format);
    match format {
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<8} {:<16} {:<10} {:>12} {:>10}",
                "ID", "NAME", "STRESS", "M3/CAPITA", "RAIN MM"
            )?;
            for region in catalogue.regions() {
                writeln!(
                    out,
                    "{:<8} {:<16} {:<10} {:>12} {:>10}",
                    region.id,
                    region.name,
                    region.stress_level,
                    region.availability_per_capita,
                    region.average_rainfall
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for region in catalogue.regions() {
                wtr.serialize(region)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, catalogue.regions())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_slices<W: Write>(out: &mut W, title: &str, slices: &[Slice]) -> anyhow::Result<()> {
    let parts: Vec<String> = slices
        .iter()
        .map(|s| format!("{} {}%", s.name, s.value))
        .collect();
    writeln!(out, "{}: {}", title, parts.join(", "))?;
    Ok(())
}

/// Write detail, chart series and tips for the region with `id`.
pub fn write_region_detail<W: Write>(
    out: &mut W,
    catalogue: &RegionCatalogue,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let region = match catalogue.find(id) {
        Some(r) => r,
        None => anyhow::bail!("Unknown region '{}'", id),
    };
    let detail = RegionDetail::new(region);

    if json {
        serde_json::to_writer_pretty(&mut *out, &detail)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{} Region ({})", region.name, region.id)?;
    writeln!(
        out,
        "{} [{}]",
        detail.stress_label,
        region.stress_color()
    )?;
    writeln!(
        out,
        "Water availability: {} m3 per capita per year",
        region.availability_per_capita
    )?;
    writeln!(out, "Average annual rainfall: {} mm", region.average_rainfall)?;
    writeln!(
        out,
        "Coordinates: {:.4}, {:.4}",
        region.latitude, region.longitude
    )?;
    write_slices(out, "Water sources", &detail.water_sources)?;
    write_slices(out, "Water usage", &detail.usage_split)?;
    writeln!(out, "Rainfall vs. usage (6 months):")?;
    for point in &detail.monthly_outlook {
        writeln!(
            out,
            "  {}  rainfall {:>7.1} mm  usage {:>7.1} m3",
            point.month, point.rainfall, point.usage
        )?;
    }
    writeln!(out, "Water conservation tips for {}:", region.name)?;
    for tip in detail.tips {
        writeln!(out, "  - {}", tip)?;
    }
    Ok(())
}

/// Write the map payload, or a GeoJSON FeatureCollection.
pub fn write_map<W: Write>(
    out: &mut W,
    catalogue: &RegionCatalogue,
    geojson: bool,
) -> anyhow::Result<()> {
    if geojson {
        serde_json::to_writer_pretty(&mut *out, &map::to_geojson(catalogue))?;
    } else {
        let payload = MapPayload {
            view: map::DEFAULT_VIEW,
            style: map::MARKER_STYLE,
            legend: map::legend(),
            markers: map::markers(catalogue),
        };
        serde_json::to_writer_pretty(&mut *out, &payload)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_core::region::catalogue;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_regions_table() {
        let text = render(|out| write_regions(out, catalogue(), OutputFormat::Table));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("IN-DL"));
        assert!(lines[1].contains("critical"));
    }

    #[test]
    fn test_regions_csv_reloads() {
        let text = render(|out| write_regions(out, catalogue(), OutputFormat::Csv));
        assert!(text.starts_with("id,name,stress_level,"));
        let reloaded = RegionCatalogue::parse_region_csv(&text).unwrap();
        assert_eq!(&reloaded, catalogue());
    }

    #[test]
    fn test_regions_json() {
        let text = render(|out| write_regions(out, catalogue(), OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 8);
        assert_eq!(value[4]["stress_level"], "emergency");
    }

    #[test]
    fn test_region_detail_text() {
        let text = render(|out| write_region_detail(out, catalogue(), "IN-KA", false));
        assert!(text.starts_with("Karnataka Region (IN-KA)"));
        assert!(text.contains("Medium Water Stress [#1E88E5]"));
        assert!(text.contains("Water sources: Groundwater 50%, Surface Water 50%"));
        assert!(text.contains("Water usage: Agriculture 70%, Industrial 12%, Domestic 18%"));
        assert!(text.contains("  Jun  rainfall"));
        assert!(text.contains("  - Take shorter showers (5 minutes or less)"));
    }

    #[test]
    fn test_region_detail_json() {
        let text = render(|out| write_region_detail(out, catalogue(), "IN-UP", true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["region"]["name"], "Uttar Pradesh");
        assert_eq!(value["monthly_outlook"].as_array().unwrap().len(), 6);
        assert_eq!(value["tips"][0], "Reuse greywater from laundry for toilets");
    }

    #[test]
    fn test_region_detail_unknown() {
        let mut out = Vec::new();
        let err = write_region_detail(&mut out, catalogue(), "XX", false).unwrap_err();
        assert_eq!(err.to_string(), "Unknown region 'XX'");
    }

    #[test]
    fn test_map_payload() {
        let text = render(|out| write_map(out, catalogue(), false));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["view"]["zoom"], 5);
        assert_eq!(value["style"]["fill_opacity"], 0.8);
        assert_eq!(value["legend"].as_array().unwrap().len(), 5);
        assert_eq!(value["markers"][0]["fill_color"], "#FF8F00");
    }

    #[test]
    fn test_map_geojson() {
        let text = render(|out| write_map(out, catalogue(), true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
    }
}
