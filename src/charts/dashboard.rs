//! Self-contained HTML dashboard.
//!
//! Embeds the four SVG charts, a KPI card row, and a sortable regional
//! table into a single file with inline CSS and JavaScript, so it works
//! offline and survives being moved around on its own.

use crate::analysis::RegionalRates;
use crate::models::format_count;
use crate::report::SummaryReport;

/// Pre-rendered SVG charts embedded into the dashboard.
pub struct DashboardCharts {
    pub by_category: String,
    pub gender: String,
    pub age: String,
    pub regional: String,
}

/// Renders the complete dashboard document.
pub fn render_dashboard(
    report: &SummaryReport,
    rates: &RegionalRates,
    charts: &DashboardCharts,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{year} Korean Cancer Incidence Dashboard</title>
<style>{css}</style>
</head>
<body>

<h1>{year} Korean Cancer Incidence Dashboard</h1>
<p class="muted">Generated: {generated} | oncostat v{version}</p>

<section class="grid kpis">
{kpis}</section>

<div class="chart-grid">
  <div class="card">{by_category_svg}</div>
  <div class="card">{gender_svg}</div>
  <div class="card">{age_svg}</div>
  <div class="card">{regional_svg}</div>
</div>

<h2>Regional Detail</h2>
<div class="card">
{regional_table}</div>

<script>{js}</script>
</body>
</html>
"#,
        year = report.overview.year,
        css = inline_css(),
        js = inline_javascript(),
        generated = report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        version = html_escape(&report.metadata.tool_version),
        kpis = render_kpi_cards(report),
        by_category_svg = charts.by_category,
        gender_svg = charts.gender,
        age_svg = charts.age,
        regional_svg = charts.regional,
        regional_table = render_regional_table(rates),
    )
}

fn render_kpi_cards(report: &SummaryReport) -> String {
    let top_category = report
        .top_categories
        .first()
        .map(|c| c.label.clone())
        .unwrap_or_default();

    format!(
        r#"  <div class="card">
    <div class="muted">Total Cases</div>
    <div class="big">{total}건</div>
  </div>
  <div class="card">
    <div class="muted">Male / Female</div>
    <div class="big">{male_pct} / {female_pct}</div>
  </div>
  <div class="card">
    <div class="muted">Top Category</div>
    <div class="big">{top_category}</div>
  </div>
  <div class="card">
    <div class="muted">Highest Rate</div>
    <div class="big">{top_region}</div>
    <div class="muted">{top_rate}</div>
  </div>
"#,
        total = format_count(report.overview.total_cases),
        male_pct = report.gender.male_pct,
        female_pct = report.gender.female_pct,
        top_category = html_escape(&top_category),
        top_region = html_escape(&report.region.top_region),
        top_rate = report.region.top_rate_label,
    )
}

fn render_regional_table(rates: &RegionalRates) -> String {
    let rows: String = rates
        .regions
        .iter()
        .map(|r| {
            format!(
                r#"    <tr data-region="{region}" data-count="{count}" data-population="{population}" data-rate="{rate}">
      <td>{region_display}</td>
      <td>{count_display}</td>
      <td>{population_display}</td>
      <td>{rate:.2}</td>
    </tr>
"#,
                region = html_escape(&r.region),
                region_display = html_escape(&r.region),
                count = r.count,
                count_display = format_count(r.count),
                population = r.population,
                population_display = format_count(r.population),
                rate = r.rate_per_100k,
            )
        })
        .collect();

    format!(
        r#"  <table id="regional-table">
    <thead>
      <tr>
        <th class="sortable" data-column="region">Region</th>
        <th class="sortable" data-column="count">Cases</th>
        <th class="sortable" data-column="population">Population</th>
        <th class="sortable" data-column="rate">Rate per 100k</th>
      </tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
"#
    )
}

fn inline_css() -> &'static str {
    r#"
body{font:14px/1.5 system-ui, sans-serif; color:#1f2937; margin:24px; max-width:1400px; background:#f9fafb}
h1{font-size:28px; font-weight:700; margin:16px 0 4px}
h2{font-size:20px; font-weight:600; margin:32px 0 12px}
.muted{color:#6b7280}
.grid{display:grid; gap:16px}
.kpis{grid-template-columns:repeat(auto-fit, minmax(200px, 1fr)); margin-top:16px}
.card{border:1px solid #e5e7eb; border-radius:12px; padding:16px; background:white}
.big{font-size:24px; font-weight:700; margin-top:8px}
.chart-grid{display:grid; grid-template-columns:1fr 1fr; gap:20px; margin-top:24px}
@media (max-width: 900px){.chart-grid{grid-template-columns:1fr}}
table{border-collapse:collapse; width:100%}
th,td{padding:8px 12px; border-bottom:1px solid #f3f4f6; text-align:right}
th:first-child, td:first-child{text-align:left}
th{font-weight:600; background:#f9fafb}
th.sortable{cursor:pointer}
th.sortable.asc::after{content:" \2191"}
th.sortable.desc::after{content:" \2193"}
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function() {
    let sortColumn = 'rate';
    let sortDirection = 'desc';

    function sortTable(column) {
        const tbody = document.querySelector('#regional-table tbody');
        const rows = Array.from(tbody.querySelectorAll('tr'));

        if (sortColumn === column) {
            sortDirection = sortDirection === 'asc' ? 'desc' : 'asc';
        } else {
            sortColumn = column;
            sortDirection = 'desc';
        }

        document.querySelectorAll('th.sortable').forEach(th => {
            th.classList.remove('asc', 'desc');
        });
        const active = document.querySelector(`th[data-column="${column}"]`);
        if (active) {
            active.classList.add(sortDirection);
        }

        rows.sort((a, b) => {
            const aVal = a.dataset[column] || '';
            const bVal = b.dataset[column] || '';
            const aNum = parseFloat(aVal);
            const bNum = parseFloat(bVal);
            if (!isNaN(aNum) && !isNaN(bNum)) {
                return sortDirection === 'asc' ? aNum - bNum : bNum - aNum;
            }
            return sortDirection === 'asc'
                ? aVal.localeCompare(bVal)
                : bVal.localeCompare(aVal);
        });

        rows.forEach(row => tbody.appendChild(row));
    }

    document.addEventListener('DOMContentLoaded', function() {
        document.querySelectorAll('th.sortable').forEach(th => {
            th.addEventListener('click', function() {
                sortTable(this.dataset.column);
            });
        });
    });
})();
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{self, RegionRate};
    use crate::source::reference;

    fn reference_fixture() -> (SummaryReport, RegionalRates) {
        let report = SummaryReport::build(
            &reference::categories(),
            &reference::age_bands(),
            &reference::regions(),
            &reference::population(),
            2020,
        )
        .unwrap();
        let rates =
            analysis::regional_rates(&reference::regions(), &reference::population()).unwrap();
        (report, rates)
    }

    fn empty_charts() -> DashboardCharts {
        DashboardCharts {
            by_category: String::new(),
            gender: String::new(),
            age: String::new(),
            regional: String::new(),
        }
    }

    #[test]
    fn test_dashboard_renders_kpis_and_table() {
        let (report, rates) = reference_fixture();

        let html = render_dashboard(&report, &rates, &empty_charts());

        assert!(html.contains("2020 Korean Cancer Incidence Dashboard"));
        assert!(html.contains("193,482건"));
        assert!(html.contains("52.0% / 48.0%"));
        assert!(html.contains("대장암 (33,158건)"));
        assert_eq!(html.matches("<tr data-region=").count(), 17);
    }

    #[test]
    fn test_dashboard_escapes_region_names() {
        let (report, _) = reference_fixture();
        let rates = RegionalRates {
            regions: vec![RegionRate {
                region: "<script>alert(1)</script>".to_string(),
                count: 1,
                population: 100000,
                rate_per_100k: 1.0,
            }],
            top_by_rate: Vec::new(),
        };

        let html = render_dashboard(&report, &rates, &empty_charts());

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert"));
    }
}
