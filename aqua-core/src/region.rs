use crate::error::{CatalogueError, Result};
use crate::stress::StressLevel;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Embedded CSV data for the built-in regions.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/regions.csv");

static CATALOGUE: OnceLock<RegionCatalogue> = OnceLock::new();

/// A geographic region with its water-stress statistics.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Region {
    /// Region identifier (e.g., "IN-DL" for Delhi)
    pub id: String,
    pub name: String,
    pub stress_level: StressLevel,
    /// Renewable water per person, in cubic meters per year
    pub availability_per_capita: u32,
    pub groundwater_pct: u32,
    pub surface_water_pct: u32,
    /// Average rainfall in mm per year
    pub average_rainfall: u32,
    pub agriculture_pct: u32,
    pub industrial_pct: u32,
    pub domestic_pct: u32,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Region {
    /// `(latitude, longitude)` pair.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn stress_color(&self) -> &'static str {
        self.stress_level.color()
    }

    /// Groundwater plus surface water; 100 for a valid region.
    pub fn source_split_total(&self) -> u64 {
        u64::from(self.groundwater_pct) + u64::from(self.surface_water_pct)
    }

    /// Agriculture plus industrial plus domestic; 100 for a valid region.
    pub fn usage_split_total(&self) -> u64 {
        u64::from(self.agriculture_pct)
            + u64::from(self.industrial_pct)
            + u64::from(self.domestic_pct)
    }

    fn validate(&self) -> Result<()> {
        let sources = self.source_split_total();
        if sources != 100 {
            return Err(CatalogueError::SplitMismatch {
                id: self.id.clone(),
                split: "water source",
                total: sources,
            });
        }
        let usage = self.usage_split_total();
        if usage != 100 {
            return Err(CatalogueError::SplitMismatch {
                id: self.id.clone(),
                split: "water usage",
                total: usage,
            });
        }
        Ok(())
    }
}

/// Immutable, ordered collection of regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCatalogue {
    regions: Vec<Region>,
}

/// Column order expected in region CSV files.
const COLUMNS: [&str; 12] = [
    "id",
    "name",
    "stress_level",
    "availability_per_capita",
    "groundwater_pct",
    "surface_water_pct",
    "average_rainfall",
    "agriculture_pct",
    "industrial_pct",
    "domestic_pct",
    "latitude",
    "longitude",
];

fn field<'r>(record: &'r StringRecord, row: usize, idx: usize) -> Result<&'r str> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or(CatalogueError::MissingField {
            row,
            field: COLUMNS[idx],
        })
}

fn check_header(headers: &StringRecord) -> Result<()> {
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != COLUMNS {
        return Err(CatalogueError::UnexpectedHeader {
            expected: COLUMNS.join(","),
            found: found.join(","),
        });
    }
    Ok(())
}

fn number<T: FromStr>(record: &StringRecord, row: usize, idx: usize) -> Result<T> {
    let raw = field(record, row, idx)?;
    raw.parse::<T>().map_err(|_| CatalogueError::InvalidNumber {
        row,
        field: COLUMNS[idx],
        value: raw.to_string(),
    })
}

impl RegionCatalogue {
    /// Build a catalogue from regions, validating splits and id uniqueness.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        let mut seen = HashSet::new();
        for region in &regions {
            region.validate()?;
            if !seen.insert(region.id.as_str()) {
                return Err(CatalogueError::DuplicateId(region.id.clone()));
            }
        }
        Ok(Self { regions })
    }

    /// Parse a CSV string of region data.
    ///
    /// Expected CSV columns: id, name, stress_level, availability_per_capita,
    /// groundwater_pct, surface_water_pct, average_rainfall, agriculture_pct,
    /// industrial_pct, domestic_pct, latitude, longitude
    pub fn parse_region_csv(csv_object: &str) -> Result<Self> {
        let mut region_list: Vec<Region> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        check_header(rdr.headers()?)?;
        for (idx, row) in rdr.records().enumerate() {
            let record = row?;
            // header is line 1
            let line = idx + 2;
            let stress_level = field(&record, line, 2)?
                .parse::<StressLevel>()
                .map_err(|source| CatalogueError::StressLevel { row: line, source })?;
            let region = Region {
                id: field(&record, line, 0)?.to_string(),
                name: field(&record, line, 1)?.to_string(),
                stress_level,
                availability_per_capita: number(&record, line, 3)?,
                groundwater_pct: number(&record, line, 4)?,
                surface_water_pct: number(&record, line, 5)?,
                average_rainfall: number(&record, line, 6)?,
                agriculture_pct: number(&record, line, 7)?,
                industrial_pct: number(&record, line, 8)?,
                domestic_pct: number(&record, line, 9)?,
                latitude: number(&record, line, 10)?,
                longitude: number(&record, line, 11)?,
            };
            debug!("parsed region {} ({})", region.id, region.stress_level);
            region_list.push(region);
        }
        RegionCatalogue::new(region_list)
    }

    /// Read and parse a region CSV file from disk.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalogue = RegionCatalogue::parse_region_csv(&contents)?;
        info!(
            "Loaded {} regions from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// All regions in catalogue order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Look up a region by id (case-insensitive).
    pub fn find(&self, id: &str) -> Option<&Region> {
        let id = id.trim();
        self.regions.iter().find(|r| r.id.eq_ignore_ascii_case(id))
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.regions.iter().position(|r| r.id.eq_ignore_ascii_case(id))
    }
}

/// The built-in catalogue, parsed from the embedded fixture on first use.
pub fn catalogue() -> &'static RegionCatalogue {
    CATALOGUE.get_or_init(|| match RegionCatalogue::parse_region_csv(CSV_OBJECT) {
        Ok(catalogue) => catalogue,
        Err(e) => panic!("failed to parse embedded region csv: {}", e),
    })
}

/// All built-in regions.
pub fn regions() -> &'static [Region] {
    catalogue().regions()
}

/// Display color for a stress category.
pub fn stress_color(level: StressLevel) -> &'static str {
    level.color()
}

/// Conservation tips for a stress category.
pub fn tips_for_level(level: StressLevel) -> &'static [&'static str] {
    level.tips()
}

/// Tips for the selected region, or the medium-level set when nothing is selected.
pub fn tips_for(region: Option<&Region>) -> &'static [&'static str] {
    region
        .map(|r| r.stress_level)
        .unwrap_or(StressLevel::DEFAULT_TIPS_LEVEL)
        .tips()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,stress_level,availability_per_capita,groundwater_pct,surface_water_pct,average_rainfall,agriculture_pct,industrial_pct,domestic_pct,latitude,longitude\n";

    #[test]
    fn test_builtin_catalogue() {
        let regions = regions();
        assert_eq!(regions.len(), 8);
        assert_eq!(regions[0].id, "IN-DL");
        assert_eq!(regions[0].name, "Delhi");
        assert_eq!(regions[0].stress_level, StressLevel::Critical);
        assert_eq!(regions[0].availability_per_capita, 131);
        assert_eq!(regions[0].coordinates(), (28.7041, 77.1025));
        assert_eq!(regions[7].name, "Tamil Nadu");
    }

    #[test]
    fn test_splits_sum_to_100() {
        for region in regions() {
            assert_eq!(region.source_split_total(), 100, "{}", region.id);
            assert_eq!(region.usage_split_total(), 100, "{}", region.id);
        }
    }

    #[test]
    fn test_find() {
        let kerala = catalogue().find("IN-KL").unwrap();
        assert_eq!(kerala.stress_level, StressLevel::Low);
        assert_eq!(kerala.average_rainfall, 3055);
        assert_eq!(catalogue().find("in-rj").unwrap().name, "Rajasthan");
        assert!(catalogue().find("IN-XX").is_none());
    }

    #[test]
    fn test_stress_color() {
        assert_eq!(stress_color(StressLevel::Critical), "#FF8F00");
        let delhi = catalogue().find("IN-DL").unwrap();
        assert_eq!(delhi.stress_color(), "#FF8F00");
    }

    #[test]
    fn test_tips_for_selected_region() {
        let rajasthan = catalogue().find("IN-RJ").unwrap();
        assert_eq!(tips_for(Some(rajasthan)), tips_for_level(StressLevel::Emergency));
        assert_eq!(
            tips_for(Some(rajasthan))[0],
            "Reduce shower time to 3 minutes maximum"
        );
    }

    #[test]
    fn test_tips_without_selection_default_to_medium() {
        assert_eq!(tips_for(None), tips_for_level(StressLevel::Medium));
    }

    #[test]
    fn test_parse_custom_csv() {
        let csv_data = format!(
            "{HEADER}XX-A,Alpha,low,900,30,70,1500,50,20,30,1.5,2.5\n"
        );
        let catalogue = RegionCatalogue::parse_region_csv(&csv_data).unwrap();
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.regions()[0].name, "Alpha");
        assert_eq!(catalogue.regions()[0].longitude, 2.5);
    }

    #[test]
    fn test_parse_empty_csv() {
        let catalogue = RegionCatalogue::parse_region_csv(HEADER).unwrap();
        assert!(catalogue.is_empty());
    }

    #[test]
    fn test_rejects_bad_split() {
        let csv_data = format!(
            "{HEADER}XX-A,Alpha,low,900,30,60,1500,50,20,30,1.5,2.5\n"
        );
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::SplitMismatch { total: 90, .. }
        ));
    }

    #[test]
    fn test_rejects_oversized_split_share() {
        let csv_data = format!(
            "{HEADER}XX-A,Alpha,low,900,4294967196,200,1500,50,20,30,1.5,2.5\n"
        );
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::SplitMismatch { total: 4_294_967_396, .. }
        ));

        let csv_data = format!(
            "{HEADER}XX-A,Alpha,low,900,30,70,1500,4294967295,4294967295,2,1.5,2.5\n"
        );
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::SplitMismatch { split: "water usage", .. }
        ));
    }

    #[test]
    fn test_rejects_reordered_columns() {
        let swapped = HEADER.replace("latitude,longitude", "longitude,latitude");
        let csv_data = format!("{swapped}XX-A,Alpha,low,900,30,70,1500,50,20,30,2.5,1.5\n");
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        match err {
            CatalogueError::UnexpectedHeader { found, .. } => {
                assert!(found.ends_with("longitude,latitude"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_extra_column() {
        let extended = HEADER.replace("longitude\n", "longitude,population\n");
        let csv_data = format!("{extended}XX-A,Alpha,low,900,30,70,1500,50,20,30,1.5,2.5,100\n");
        assert!(matches!(
            RegionCatalogue::parse_region_csv(&csv_data),
            Err(CatalogueError::UnexpectedHeader { .. })
        ));
        assert!(matches!(
            RegionCatalogue::parse_region_csv(""),
            Err(CatalogueError::UnexpectedHeader { .. })
        ));
    }

    #[test]
    fn test_header_tolerates_whitespace() {
        let spaced = HEADER.replace(",name,", ", name ,");
        let csv_data = format!("{spaced}XX-A,Alpha,low,900,30,70,1500,50,20,30,1.5,2.5\n");
        assert_eq!(RegionCatalogue::parse_region_csv(&csv_data).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_unknown_stress_level() {
        let csv_data = format!(
            "{HEADER}XX-A,Alpha,severe,900,30,70,1500,50,20,30,1.5,2.5\n"
        );
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        assert!(matches!(err, CatalogueError::StressLevel { row: 2, .. }));
    }

    #[test]
    fn test_rejects_invalid_number() {
        let csv_data = format!(
            "{HEADER}XX-A,Alpha,low,lots,30,70,1500,50,20,30,1.5,2.5\n"
        );
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        match err {
            CatalogueError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "availability_per_capita");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_short_row() {
        let csv_data = format!("{HEADER}XX-A,Alpha,low,900,30,70,1500,50,20,30,1.5\n");
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::MissingField { row: 2, field: "longitude" }
        ));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let csv_data = format!(
            "{HEADER}XX-A,Alpha,low,900,30,70,1500,50,20,30,1.5,2.5\nXX-A,Again,high,100,50,50,500,60,20,20,0,0\n"
        );
        let err = RegionCatalogue::parse_region_csv(&csv_data).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateId(id) if id == "XX-A"));
    }
}
