//! Aggregate Queries over the Combined Fire/Climate Data

use crate::loader::load_fire_climate;
use crate::records::FireClimateRecord;
use crate::stats::{mean_of, pearson, quantile};
use crate::DatasetError;
use chrono::NaiveDate;
use input_validator::{normalize_district, Location};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

type Column = fn(&FireClimateRecord) -> Option<f64>;

fn correlation_columns() -> [(&'static str, Column); 9] {
    [
        ("Prep", |r| r.precipitation),
        ("AvgTemp", |r| r.avg_temp),
        ("MaxTemp", |r| r.max_temp),
        ("Humidity", |r| r.humidity),
        ("WindSpeed", |r| r.wind_speed),
        ("Brightness", |r| r.brightness),
        ("Confidence", |r| r.confidence),
        ("FRP", |r| r.frp),
        ("Fire_Count", |r| r.fire_count),
    ]
}

/// Tercile label for district fire risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Per-district fire risk for the map view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictFireRisk {
    pub district: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Mean detection confidence
    pub confidence: Option<f64>,
    /// Mean fire radiative power
    pub frp: Option<f64>,
    /// Total fire count
    pub fire_count: f64,
    /// `(confidence + fire_count + frp) / 3`, missing means counted as zero
    pub fire_risk: f64,
    pub risk_level: RiskLevel,
}

/// Total fires for one district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictTotal {
    pub district: String,
    pub fire_count: f64,
}

/// Total fires for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCount {
    pub year: i32,
    pub fire_count: f64,
}

/// Mean fires for one calendar month across all districts and years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub month: u32,
    pub month_name: String,
    pub fire_count: f64,
}

/// Total fires for one year-month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    /// First day of the month
    pub date: NaiveDate,
    pub fire_count: f64,
}

/// Granularity of a district trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendView {
    Monthly,
    Yearly,
}

/// One bar of a district trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// "MM-YYYY" for monthly, "YYYY" for yearly
    pub label: String,
    pub year: i32,
    pub month: Option<u32>,
    pub fire_count: f64,
}

/// Climate context for one district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictClimateSummary {
    pub district: String,
    pub avg_temp: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub fire_count: f64,
}

/// Correlation of one variable against the two fire metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRow {
    pub variable: String,
    pub fire_count: Option<f64>,
    pub confidence: Option<f64>,
}

/// Share of months with at least one fire, by temperature and humidity bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityGrid {
    /// Average temperature bin edges, `bins + 1` values
    pub temp_edges: Vec<f64>,
    /// Humidity bin edges, `bins + 1` values
    pub humidity_edges: Vec<f64>,
    /// `cells[temp_bin][humidity_bin]`; `None` where no rows fall
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Combined fire/climate rows with the dashboard's aggregate queries
#[derive(Debug, Clone, Default)]
pub struct FireDataset {
    records: Vec<FireClimateRecord>,
}

impl FireDataset {
    /// Wrap already-loaded rows
    pub fn new(records: Vec<FireClimateRecord>) -> Self {
        Self { records }
    }

    /// Load from the combined CSV
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dataset = Self::new(load_fire_climate(path)?);
        info!(
            "Fire dataset ready: {} rows, {} districts",
            dataset.len(),
            dataset.districts().len()
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[FireClimateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn for_district<'a>(&'a self, district: &str) -> impl Iterator<Item = &'a FireClimateRecord> {
        let key = normalize_district(district);
        self.records.iter().filter(move |r| r.district_key() == key)
    }

    /// Sorted unique normalized district names
    pub fn districts(&self) -> Vec<String> {
        self.records
            .iter()
            .map(FireClimateRecord::district_key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Coordinates from the first row of a district that has both
    pub fn locate(&self, district: &str) -> Option<Location> {
        let found = self
            .for_district(district)
            .find_map(|r| r.coordinates().map(|(lat, lon)| (r.district_key(), lat, lon)));

        match found {
            Some((key, lat, lon)) => Some(Location::new(&key, lat, lon)),
            None => {
                debug!("No coordinates for district '{}'", district);
                None
            }
        }
    }

    /// District fire risk with tercile labels
    pub fn district_fire_risk(&self) -> Vec<DistrictFireRisk> {
        #[derive(Default)]
        struct Acc {
            lat: Vec<f64>,
            lon: Vec<f64>,
            confidence: Vec<f64>,
            frp: Vec<f64>,
            fires: f64,
        }

        let mut groups: BTreeMap<String, Acc> = BTreeMap::new();
        for r in &self.records {
            let acc = groups.entry(r.district_key()).or_default();
            acc.lat.extend(r.lat);
            acc.lon.extend(r.lon);
            acc.confidence.extend(r.confidence);
            acc.frp.extend(r.frp);
            acc.fires += r.fires();
        }

        let rows: Vec<_> = groups
            .into_iter()
            .map(|(district, acc)| {
                let confidence = mean_of(acc.confidence);
                let frp = mean_of(acc.frp);
                let fire_risk =
                    (confidence.unwrap_or(0.0) + acc.fires + frp.unwrap_or(0.0)) / 3.0;
                (district, mean_of(acc.lat), mean_of(acc.lon), confidence, frp, acc.fires, fire_risk)
            })
            .collect();

        let mut sorted: Vec<f64> = rows.iter().map(|r| r.6).collect();
        sorted.sort_by(f64::total_cmp);
        let low_edge = quantile(&sorted, 1.0 / 3.0).unwrap_or(0.0);
        let mid_edge = quantile(&sorted, 2.0 / 3.0).unwrap_or(0.0);

        rows.into_iter()
            .map(|(district, lat, lon, confidence, frp, fire_count, fire_risk)| {
                let risk_level = if fire_risk <= low_edge {
                    RiskLevel::Low
                } else if fire_risk <= mid_edge {
                    RiskLevel::Medium
                } else {
                    RiskLevel::High
                };
                DistrictFireRisk {
                    district,
                    lat,
                    lon,
                    confidence,
                    frp,
                    fire_count,
                    fire_risk,
                    risk_level,
                }
            })
            .collect()
    }

    fn totals_by_district(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for r in &self.records {
            *totals.entry(r.district_key()).or_insert(0.0) += r.fires();
        }
        totals
    }

    /// The `limit` districts with the most fires, highest first
    pub fn top_fire_districts(&self, limit: usize) -> Vec<DistrictTotal> {
        let mut totals: Vec<_> = self
            .totals_by_district()
            .into_iter()
            .map(|(district, fire_count)| DistrictTotal {
                district,
                fire_count,
            })
            .collect();
        totals.sort_by(|a, b| b.fire_count.total_cmp(&a.fire_count));
        totals.truncate(limit);
        totals
    }

    /// Total fires per year, ascending
    pub fn annual_fire_counts(&self) -> Vec<AnnualCount> {
        let mut years: BTreeMap<i32, f64> = BTreeMap::new();
        for r in &self.records {
            *years.entry(r.year).or_insert(0.0) += r.fires();
        }
        years
            .into_iter()
            .map(|(year, fire_count)| AnnualCount { year, fire_count })
            .collect()
    }

    /// Mean fires per calendar month over rows with a recorded count
    pub fn monthly_average_fire(&self) -> Vec<MonthlyAverage> {
        let mut months: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for r in &self.records {
            if let Some(count) = r.fire_count {
                months.entry(r.month).or_default().push(count);
            }
        }
        months
            .into_iter()
            .filter_map(|(month, counts)| {
                let name = MONTH_ABBREVIATIONS.get(month.checked_sub(1)? as usize)?;
                Some(MonthlyAverage {
                    month,
                    month_name: name.to_string(),
                    fire_count: mean_of(counts)?,
                })
            })
            .collect()
    }

    /// Total fires per year-month in date order
    pub fn monthly_fire_series(&self) -> Vec<MonthlyCount> {
        let mut series: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for r in &self.records {
            *series.entry((r.year, r.month)).or_insert(0.0) += r.fires();
        }
        series
            .into_iter()
            .filter_map(|((year, month), fire_count)| {
                Some(MonthlyCount {
                    year,
                    month,
                    date: NaiveDate::from_ymd_opt(year, month, 1)?,
                    fire_count,
                })
            })
            .collect()
    }

    /// Fire trend for one district: active months only, or yearly totals
    pub fn district_trend(&self, district: &str, view: TrendView) -> Vec<TrendPoint> {
        match view {
            TrendView::Monthly => {
                let mut points: Vec<_> = self
                    .for_district(district)
                    .filter(|r| r.fires() > 0.0)
                    .map(|r| TrendPoint {
                        label: format!("{:02}-{}", r.month, r.year),
                        year: r.year,
                        month: Some(r.month),
                        fire_count: r.fires(),
                    })
                    .collect();
                points.sort_by_key(|p| (p.year, p.month));
                points
            }
            TrendView::Yearly => {
                let mut years: BTreeMap<i32, f64> = BTreeMap::new();
                for r in self.for_district(district) {
                    *years.entry(r.year).or_insert(0.0) += r.fires();
                }
                years
                    .into_iter()
                    .map(|(year, fire_count)| TrendPoint {
                        label: year.to_string(),
                        year,
                        month: None,
                        fire_count,
                    })
                    .collect()
            }
        }
    }

    /// Climate means and total fires for one district
    pub fn district_climate_summary(&self, district: &str) -> Option<DistrictClimateSummary> {
        let rows: Vec<_> = self.for_district(district).collect();
        if rows.is_empty() {
            return None;
        }

        Some(DistrictClimateSummary {
            district: normalize_district(district),
            avg_temp: mean_of(rows.iter().filter_map(|r| r.avg_temp)),
            humidity: mean_of(rows.iter().filter_map(|r| r.humidity)),
            precipitation: mean_of(rows.iter().filter_map(|r| r.precipitation)),
            wind_speed: mean_of(rows.iter().filter_map(|r| r.wind_speed)),
            fire_count: rows.iter().map(|r| r.fires()).sum(),
        })
    }

    fn correlate(&self, x: Column, y: Column) -> Option<f64> {
        let pairs: Vec<_> = self
            .records
            .iter()
            .filter_map(|r| x(r).zip(y(r)))
            .collect();
        pearson(&pairs)
    }

    /// Pairwise-complete Pearson correlation of each variable with fire
    /// count and confidence, strongest fire-count correlation first
    pub fn climate_fire_correlations(&self) -> Vec<CorrelationRow> {
        let fire_count: Column = |r| r.fire_count;
        let confidence: Column = |r| r.confidence;

        let mut rows: Vec<_> = correlation_columns()
            .into_iter()
            .map(|(name, column)| CorrelationRow {
                variable: name.to_string(),
                fire_count: self.correlate(column, fire_count),
                confidence: self.correlate(column, confidence),
            })
            .collect();

        rows.sort_by(|a, b| match (a.fire_count, b.fire_count) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        rows
    }

    /// Equal-width bins of average temperature and humidity, each cell the
    /// fraction of rows with at least one fire
    pub fn fire_probability_grid(&self, bins: usize) -> Option<ProbabilityGrid> {
        if bins == 0 {
            return None;
        }

        let points: Vec<(f64, f64, bool)> = self
            .records
            .iter()
            .filter_map(|r| Some((r.avg_temp?, r.humidity?, r.fires() > 0.0)))
            .collect();
        if points.is_empty() {
            return None;
        }

        let temp_edges = equal_width_edges(points.iter().map(|p| p.0), bins);
        let humidity_edges = equal_width_edges(points.iter().map(|p| p.1), bins);

        let mut hits = vec![vec![0usize; bins]; bins];
        let mut totals = vec![vec![0usize; bins]; bins];
        for (temp, humidity, fire) in points {
            let i = bin_index(&temp_edges, temp);
            let j = bin_index(&humidity_edges, humidity);
            totals[i][j] += 1;
            if fire {
                hits[i][j] += 1;
            }
        }

        let cells = totals
            .iter()
            .zip(&hits)
            .map(|(total_row, hit_row)| {
                total_row
                    .iter()
                    .zip(hit_row)
                    .map(|(&total, &hit)| (total > 0).then(|| hit as f64 / total as f64))
                    .collect()
            })
            .collect();

        Some(ProbabilityGrid {
            temp_edges,
            humidity_edges,
            cells,
        })
    }
}

fn equal_width_edges(values: impl Iterator<Item = f64>, bins: usize) -> Vec<f64> {
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let width = (max - min) / bins as f64;
    (0..=bins).map(|i| min + width * i as f64).collect()
}

/// Right-closed bins `(a, b]`, the first also holding the minimum
fn bin_index(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    let width = edges[1] - edges[0];
    if width <= 0.0 {
        return 0;
    }
    let upper = ((value - edges[0]) / width).ceil() as i64;
    (upper - 1).clamp(0, bins as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::{write_temp, COMBINED_CSV};

    fn dataset() -> FireDataset {
        let file = write_temp(COMBINED_CSV);
        FireDataset::load(file.path()).unwrap()
    }

    #[test]
    fn test_districts_normalized_sorted() {
        assert_eq!(dataset().districts(), vec!["dang", "kailali", "surkhet"]);
    }

    #[test]
    fn test_locate_skips_missing_coordinates() {
        let loc = dataset().locate("Dang").unwrap();
        assert_eq!(loc.district, "dang");
        assert_eq!((loc.lat, loc.lon), (28.04, 82.30));
    }

    #[test]
    fn test_locate_unknown() {
        assert!(dataset().locate("mustang").is_none());
    }

    #[test]
    fn test_district_fire_risk_terciles() {
        let risk = dataset().district_fire_risk();
        let by_name: BTreeMap<_, _> = risk.iter().map(|r| (r.district.as_str(), r)).collect();

        let kailali = by_name["kailali"];
        assert_eq!(kailali.fire_count, 100.0);
        assert!((kailali.fire_risk - 68.0).abs() < 1e-9);
        assert_eq!(kailali.risk_level, RiskLevel::High);
        assert_eq!(by_name["dang"].risk_level, RiskLevel::Medium);
        assert_eq!(by_name["surkhet"].risk_level, RiskLevel::Low);
        assert_eq!(by_name["dang"].lat, Some(28.04));
    }

    #[test]
    fn test_top_fire_districts() {
        let top = dataset().top_fire_districts(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].district, "kailali");
        assert_eq!(top[0].fire_count, 100.0);
        assert_eq!(top[1].district, "dang");
    }

    #[test]
    fn test_annual_counts() {
        let annual = dataset().annual_fire_counts();
        assert_eq!(
            annual,
            vec![
                AnnualCount { year: 2012, fire_count: 55.0 },
                AnnualCount { year: 2013, fire_count: 80.0 },
            ]
        );
    }

    #[test]
    fn test_monthly_average() {
        let monthly = dataset().monthly_average_fire();
        let march = monthly.iter().find(|m| m.month == 3).unwrap();
        assert_eq!(march.month_name, "Mar");
        assert!((march.fire_count - 110.0 / 3.0).abs() < 1e-9);
        assert_eq!(monthly.len(), 4);
    }

    #[test]
    fn test_monthly_series_in_date_order() {
        let series = dataset().monthly_fire_series();
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2012, 3, 1).unwrap());
        assert_eq!(series[0].fire_count, 50.0);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_district_trend_monthly_active_only() {
        let trend = dataset().district_trend("kailali", TrendView::Monthly);
        let labels: Vec<_> = trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["03-2012", "03-2013"]);
    }

    #[test]
    fn test_district_trend_yearly() {
        let trend = dataset().district_trend("Surkhet", TrendView::Yearly);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "2012");
        assert_eq!(trend[0].fire_count, 5.0);
        assert_eq!(trend[1].fire_count, 0.0);
    }

    #[test]
    fn test_district_climate_summary() {
        let summary = dataset().district_climate_summary("dang").unwrap();
        assert_eq!(summary.fire_count, 30.0);
        assert!((summary.avg_temp.unwrap() - 25.0).abs() < 1e-9);
        assert!(dataset().district_climate_summary("mustang").is_none());
    }

    #[test]
    fn test_correlations_sorted() {
        let rows = dataset().climate_fire_correlations();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].variable, "Fire_Count");
        assert!((rows[0].fire_count.unwrap() - 1.0).abs() < 1e-9);

        let humidity = rows.iter().find(|r| r.variable == "Humidity").unwrap();
        assert!(humidity.fire_count.unwrap() < 0.0);
    }

    #[test]
    fn test_probability_grid() {
        let grid = dataset().fire_probability_grid(2).unwrap();
        assert_eq!(grid.temp_edges.len(), 3);
        assert_eq!(grid.cells.len(), 2);

        let total_cells: usize = grid.cells.iter().flatten().filter(|c| c.is_some()).count();
        assert!(total_cells > 0);
        for value in grid.cells.iter().flatten().flatten() {
            assert!((0.0..=1.0).contains(value));
        }
    }

    #[test]
    fn test_probability_grid_edge_value_in_lower_bin() {
        let row = |humidity: f64, fires: f64| FireClimateRecord {
            district: "dang".to_string(),
            year: 2014,
            month: 4,
            lat: None,
            lon: None,
            precipitation: None,
            avg_temp: Some(25.0),
            max_temp: None,
            humidity: Some(humidity),
            wind_speed: None,
            fire_count: Some(fires),
            confidence: None,
            frp: None,
            brightness: None,
        };
        let dataset = FireDataset::new(vec![row(0.0, 0.0), row(40.0, 3.0), row(100.0, 0.0)]);

        let grid = dataset.fire_probability_grid(5).unwrap();
        assert_eq!(grid.humidity_edges, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(
            grid.cells[0],
            vec![Some(0.0), Some(1.0), None, None, Some(0.0)]
        );
    }

    #[test]
    fn test_bin_index_right_closed() {
        let edges = [0.0, 20.0, 40.0];
        assert_eq!(bin_index(&edges, 0.0), 0);
        assert_eq!(bin_index(&edges, 20.0), 0);
        assert_eq!(bin_index(&edges, 20.5), 1);
        assert_eq!(bin_index(&edges, 40.0), 1);
    }

    #[test]
    fn test_probability_grid_empty() {
        assert!(FireDataset::default().fire_probability_grid(5).is_none());
        assert!(dataset().fire_probability_grid(0).is_none());
    }
}
