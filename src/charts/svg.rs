//! Standalone SVG chart builders.
//!
//! Each builder returns a complete, self-contained SVG document as a
//! string. Charts scale through their viewBox, so the same markup works
//! standalone on disk and embedded in the dashboard.

use crate::analysis::{AgeProfile, GenderBreakdown, RegionRate};
use crate::models::{CategoryRecord, format_count};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

const MALE_COLOR: &str = "#4A90E2";
const FEMALE_COLOR: &str = "#E24A90";
const BAR_COLOR: &str = "#4A90E2";
const AXIS_COLOR: &str = "#9ca3af";

/// Grouped male/female bars per cancer category.
pub fn grouped_gender_bars(title: &str, categories: &[CategoryRecord]) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let max = categories
        .iter()
        .map(|r| r.male.max(r.female))
        .max()
        .unwrap_or(1)
        .max(1) as f64;
    let group_w = plot_w / categories.len().max(1) as f64;
    let bar_w = group_w * 0.32;

    let mut body = String::new();
    for (i, record) in categories.iter().enumerate() {
        let group_x = MARGIN_LEFT + i as f64 * group_w;

        for (offset, value, color) in [
            (group_w * 0.14, record.male, MALE_COLOR),
            (group_w * 0.54, record.female, FEMALE_COLOR),
        ] {
            let bar_h = value as f64 / max * plot_h;
            let x = group_x + offset;
            let y = baseline - bar_h;
            body.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" />\n",
                x, y, bar_w, bar_h, color
            ));
            body.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"9\" text-anchor=\"middle\">{}</text>\n",
                x + bar_w / 2.0,
                y - 4.0,
                format_count(value)
            ));
        }

        body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            group_x + group_w / 2.0,
            baseline + 18.0,
            xml_escape(&record.category)
        ));
    }

    body.push_str(&axis_line(MARGIN_LEFT, baseline, WIDTH - MARGIN_RIGHT, baseline));
    body.push_str(&legend_entry(WIDTH - 160.0, MARGIN_TOP - 8.0, MALE_COLOR, "남자"));
    body.push_str(&legend_entry(WIDTH - 90.0, MARGIN_TOP - 8.0, FEMALE_COLOR, "여자"));

    chart_document(title, HEIGHT, &body)
}

/// Donut chart of the male/female split.
pub fn gender_donut(title: &str, breakdown: &GenderBreakdown) -> String {
    let combined = (breakdown.male_total + breakdown.female_total).max(1) as f64;
    let male_frac = breakdown.male_total as f64 / combined;

    let cx = WIDTH / 2.0;
    let cy = MARGIN_TOP + (HEIGHT - MARGIN_TOP) / 2.0;
    let radius = 110.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;

    let mut body = String::new();
    body.push_str(&format!(
        "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{radius}\" fill=\"none\" stroke=\"{FEMALE_COLOR}\" stroke-width=\"52\" />\n"
    ));
    body.push_str(&format!(
        "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{radius}\" fill=\"none\" stroke=\"{MALE_COLOR}\" stroke-width=\"52\" stroke-dasharray=\"{:.2} {:.2}\" transform=\"rotate(-90 {cx:.1} {cy:.1})\" />\n",
        male_frac * circumference,
        circumference
    ));
    body.push_str(&format!(
        "  <text x=\"{cx:.1}\" y=\"{:.1}\" font-size=\"16\" text-anchor=\"middle\" fill=\"{MALE_COLOR}\">남자 {:.1}%</text>\n",
        cy - 8.0,
        breakdown.male_pct
    ));
    body.push_str(&format!(
        "  <text x=\"{cx:.1}\" y=\"{:.1}\" font-size=\"16\" text-anchor=\"middle\" fill=\"{FEMALE_COLOR}\">여자 {:.1}%</text>\n",
        cy + 16.0,
        breakdown.female_pct
    ));

    chart_document(title, HEIGHT, &body)
}

/// Age-band bars with the cumulative case count drawn as a line over them.
pub fn age_bars_with_cumulative(title: &str, profile: &AgeProfile) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let max_count = profile
        .bands
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(1)
        .max(1) as f64;
    let total = profile.total_cases.max(1) as f64;
    let slot_w = plot_w / profile.bands.len().max(1) as f64;
    let bar_w = slot_w * 0.6;

    let mut body = String::new();
    let mut points = Vec::new();

    for (i, (band, cumulative)) in profile.bands.iter().zip(&profile.cumulative).enumerate() {
        let x_center = MARGIN_LEFT + (i as f64 + 0.5) * slot_w;
        let bar_h = band.count as f64 / max_count * plot_h;

        body.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" />\n",
            x_center - bar_w / 2.0,
            baseline - bar_h,
            bar_w,
            bar_h,
            BAR_COLOR
        ));
        body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"9\" text-anchor=\"middle\">{}</text>\n",
            x_center,
            baseline - bar_h - 4.0,
            format_count(band.count)
        ));
        body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"middle\">{}</text>\n",
            x_center,
            baseline + 18.0,
            xml_escape(&band.age_band)
        ));

        let line_y = baseline - *cumulative as f64 / total * plot_h;
        points.push(format!("{:.1},{:.1}", x_center, line_y));
    }

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let first_x = first.split(',').next().unwrap_or("0");
        let last_x = last.split(',').next().unwrap_or("0");
        body.push_str(&format!(
            "  <polygon points=\"{} {},{:.1} {},{:.1}\" fill=\"{}\" fill-opacity=\"0.12\" />\n",
            points.join(" "),
            last_x,
            baseline,
            first_x,
            baseline,
            FEMALE_COLOR
        ));
    }
    body.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" />\n",
        points.join(" "),
        FEMALE_COLOR
    ));
    for point in &points {
        let mut coords = point.split(',');
        let (x, y) = (
            coords.next().unwrap_or("0"),
            coords.next().unwrap_or("0"),
        );
        body.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"3\" fill=\"{}\" />\n",
            x, y, FEMALE_COLOR
        ));
    }

    body.push_str(&axis_line(MARGIN_LEFT, baseline, WIDTH - MARGIN_RIGHT, baseline));
    body.push_str(&legend_entry(WIDTH - 200.0, MARGIN_TOP - 8.0, BAR_COLOR, "발생자수"));
    body.push_str(&legend_entry(WIDTH - 110.0, MARGIN_TOP - 8.0, FEMALE_COLOR, "누적"));

    chart_document(title, HEIGHT, &body)
}

/// Horizontal bars of per-100k incidence rates, one row per region.
/// Rows render in the order given.
pub fn regional_rate_bars(title: &str, rows: &[RegionRate]) -> String {
    const ROW_H: f64 = 24.0;
    const LABEL_W: f64 = 140.0;

    let height = MARGIN_TOP + rows.len() as f64 * ROW_H + 20.0;
    let plot_w = WIDTH - LABEL_W - 90.0;
    let max_rate = rows
        .iter()
        .map(|r| r.rate_per_100k)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut body = String::new();
    for (i, row) in rows.iter().enumerate() {
        let y = MARGIN_TOP + i as f64 * ROW_H;
        let bar_len = row.rate_per_100k / max_rate * plot_w;

        body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\">{}</text>\n",
            LABEL_W - 8.0,
            y + 16.0,
            xml_escape(&row.region)
        ));
        body.push_str(&format!(
            "  <rect x=\"{LABEL_W}\" y=\"{:.1}\" width=\"{:.1}\" height=\"16\" fill=\"{BAR_COLOR}\" />\n",
            y + 4.0,
            bar_len
        ));
        body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\">{:.2}</text>\n",
            LABEL_W + bar_len + 6.0,
            y + 16.0,
            row.rate_per_100k
        ));
    }

    chart_document(title, height, &body)
}

fn chart_document(title: &str, height: f64, body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {height}\" font-family=\"sans-serif\">\n  <rect width=\"{WIDTH}\" height=\"{height}\" fill=\"white\" />\n  <text x=\"{:.1}\" y=\"28\" font-size=\"18\" font-weight=\"bold\" text-anchor=\"middle\">{}</text>\n{}</svg>\n",
        WIDTH / 2.0,
        xml_escape(title),
        body
    )
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"{AXIS_COLOR}\" stroke-width=\"1\" />\n"
    )
}

fn legend_entry(x: f64, y: f64, color: &str, label: &str) -> String {
    format!(
        "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"12\" height=\"12\" fill=\"{color}\" />\n  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{}</text>\n",
        x + 16.0,
        y + 10.0,
        xml_escape(label)
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
