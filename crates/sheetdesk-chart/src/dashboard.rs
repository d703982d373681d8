//! Dashboard charts

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sheetdesk_core::{FileSession, Grid};

use crate::chart::{Chart, ChartType};
use crate::detect::detect_chartable_columns_with;
use crate::options::DashboardOptions;
use crate::series::{chart_data, ChartPoint};

/// Charts for one sheet
///
/// Bar charts pair the leading category columns with the leading numeric
/// columns, category-major. A pie chart over the first pair follows. Charts
/// without points are skipped and the plan is cut to `max_charts`.
pub fn dashboard_charts(grid: &Grid, options: &DashboardOptions) -> Vec<Chart> {
    let columns = detect_chartable_columns_with(grid, &options.detection);
    let title = |col: usize| grid.header_cells().get(col).map(ToString::to_string).unwrap_or_default();

    let mut charts = Vec::new();
    for &category in columns.category_columns.iter().take(options.category_columns) {
        for &value in columns.numeric_columns.iter().take(options.value_columns) {
            let data = chart_data(grid, category, value, options.bar_items);
            if !data.is_empty() {
                charts.push(
                    Chart::new(ChartType::Bar, data)
                        .with_title(format!("{} vs {}", title(category), title(value))),
                );
            }
        }
    }

    if let (Some(&category), Some(&value)) =
        (columns.category_columns.first(), columns.numeric_columns.first())
    {
        let data = chart_data(grid, category, value, options.pie_items);
        if !data.is_empty() {
            charts.push(
                Chart::new(ChartType::Pie, data)
                    .with_title(format!("Distribution: {}", title(category))),
            );
        }
    }

    charts.truncate(options.max_charts);
    charts
}

/// Uploads per calendar day (UTC), oldest day first
///
/// Sessions that were never persisted have no upload time and are skipped.
/// Point names are ISO dates.
pub fn uploads_over_time(sessions: &[FileSession]) -> Chart {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for uploaded in sessions.iter().filter_map(|s| s.uploaded_at) {
        *per_day.entry(uploaded.date_naive()).or_default() += 1;
    }

    let data = per_day
        .into_iter()
        .map(|(day, count)| ChartPoint::new(day.format("%Y-%m-%d").to_string(), count as f64))
        .collect();
    Chart::new(ChartType::Line, data).with_title("Files uploaded over time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use sheetdesk_core::{CellValue, Sheets};

    fn sales() -> Grid {
        Grid::from(vec![
            vec!["region".into(), "rep".into(), "units".into(), "price".into()],
            vec!["north".into(), "ann".into(), 3.into(), 10.into()],
            vec!["south".into(), "bo".into(), 1.into(), 20.into()],
            vec!["north".into(), "cy".into(), 2.into(), 5.into()],
        ])
    }

    fn titles(charts: &[Chart]) -> Vec<(ChartType, String)> {
        charts
            .iter()
            .map(|c| (c.chart_type, c.title.clone().unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_dashboard_plan_is_capped() {
        let charts = dashboard_charts(&sales(), &DashboardOptions::default());
        assert_eq!(
            titles(&charts),
            vec![
                (ChartType::Bar, "region vs units".to_string()),
                (ChartType::Bar, "region vs price".to_string()),
                (ChartType::Bar, "rep vs units".to_string()),
                (ChartType::Bar, "rep vs price".to_string()),
            ]
        );
        assert_eq!(
            charts[0].data,
            vec![ChartPoint::new("north", 5.0), ChartPoint::new("south", 1.0)]
        );
    }

    #[test]
    fn test_dashboard_includes_pie_when_room() {
        let options = DashboardOptions {
            category_columns: 1,
            value_columns: 1,
            pie_items: 1,
            ..DashboardOptions::default()
        };
        let charts = dashboard_charts(&sales(), &options);
        assert_eq!(
            titles(&charts),
            vec![
                (ChartType::Bar, "region vs units".to_string()),
                (ChartType::Pie, "Distribution: region".to_string()),
            ]
        );
        assert_eq!(charts[1].data.len(), 1);
    }

    #[test]
    fn test_dashboard_without_numeric_columns() {
        let grid = Grid::from(vec![
            vec![CellValue::text("name")],
            vec![CellValue::text("a")],
        ]);
        assert!(dashboard_charts(&grid, &DashboardOptions::default()).is_empty());
        assert!(dashboard_charts(&Grid::new(), &DashboardOptions::default()).is_empty());
    }

    #[test]
    fn test_uploads_over_time() {
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).single();
        let session = |id: &str, uploaded_at| FileSession {
            id: id.into(),
            file_name: format!("{id}.csv"),
            sheets: Sheets::new(),
            uploaded_at,
        };
        let sessions = vec![
            session("a", at(5, 9)),
            session("b", at(2, 23)),
            session("c", None),
            session("d", at(5, 1)),
        ];

        let chart = uploads_over_time(&sessions);
        assert_eq!(chart.chart_type, ChartType::Line);
        assert_eq!(
            chart.data,
            vec![
                ChartPoint::new("2024-03-02", 1.0),
                ChartPoint::new("2024-03-05", 2.0),
            ]
        );
        assert!(uploads_over_time(&[]).is_empty());
    }
}
