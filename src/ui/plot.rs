use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot};

use crate::color;
use crate::data::aggregate::{DepartmentShare, DepartmentYearRow, Kpis, TermAggregate, YearAggregate};
use crate::data::model::Department;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn year_points(yearly: &[YearAggregate], value: impl Fn(&YearAggregate) -> f64) -> Vec<[f64; 2]> {
    yearly
        .iter()
        .map(|row| [row.year as f64, value(row)])
        .collect()
}

/// Axis formatter that shows integer grid marks as category labels and hides
/// the fractional ones.
fn category_formatter(labels: Vec<String>) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 0.01 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

fn year_formatter(mark: egui_plot::GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    if mark.value.fract().abs() < 0.01 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Trends tab
// ---------------------------------------------------------------------------

/// Retention and satisfaction means by year.
pub fn quality_trend(ui: &mut Ui, yearly: &[YearAggregate]) {
    Plot::new("quality_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Percent")
        .x_axis_formatter(year_formatter)
        .height(300.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(year_points(yearly, |row| row.retention_mean))
                    .name("Retention rate")
                    .color(color::RETENTION)
                    .width(2.5),
            );
            plot_ui.line(
                Line::new(year_points(yearly, |row| row.satisfaction_mean))
                    .name("Student satisfaction")
                    .color(color::SATISFACTION)
                    .width(2.5),
            );
        });
}

/// Total enrollment by year, drawn as a filled area.
pub fn enrollment_trend(ui: &mut Ui, yearly: &[YearAggregate]) {
    Plot::new("enrollment_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Students")
        .x_axis_formatter(year_formatter)
        .height(260.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(year_points(yearly, |row| row.enrolled as f64))
                    .name("Enrolled")
                    .color(color::ENROLLMENT)
                    .fill(0.0)
                    .width(2.0),
            );
        });
}

/// Applications → admitted → enrolled counts by year.
pub fn funnel_trend(ui: &mut Ui, yearly: &[YearAggregate]) {
    Plot::new("funnel_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Students")
        .x_axis_formatter(year_formatter)
        .height(300.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(year_points(yearly, |row| row.applications as f64))
                    .name("Applications")
                    .color(color::APPLICATIONS)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(year_points(yearly, |row| row.admitted as f64))
                    .name("Admitted")
                    .color(color::ADMITTED)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(year_points(yearly, |row| row.enrolled as f64))
                    .name("Enrolled")
                    .color(color::ENROLLMENT)
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Term comparison tab
// ---------------------------------------------------------------------------

/// Grouped bars: retention and satisfaction means per term.
pub fn term_quality_bars(ui: &mut Ui, terms: &[TermAggregate]) {
    let labels: Vec<String> = terms.iter().map(|t| t.term.to_string()).collect();

    let retention: Vec<Bar> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| Bar::new(i as f64 - 0.2, t.retention_mean).width(0.35))
        .collect();
    let satisfaction: Vec<Bar> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| Bar::new(i as f64 + 0.2, t.satisfaction_mean).width(0.35))
        .collect();

    Plot::new("term_quality")
        .legend(Legend::default())
        .y_axis_label("Percent")
        .x_axis_formatter(category_formatter(labels))
        .height(280.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(retention)
                    .name("Retention rate")
                    .color(color::RETENTION),
            );
            plot_ui.bar_chart(
                BarChart::new(satisfaction)
                    .name("Student satisfaction")
                    .color(color::SATISFACTION),
            );
        });
}

/// Enrollment totals per term.
pub fn term_share_bars(ui: &mut Ui, terms: &[TermAggregate]) {
    let labels: Vec<String> = terms.iter().map(|t| t.term.to_string()).collect();
    let palette = color::generate_palette(terms.len().max(1));

    Plot::new("term_share")
        .legend(Legend::default())
        .y_axis_label("Students")
        .x_axis_formatter(category_formatter(labels))
        .height(260.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, term) in terms.iter().enumerate() {
                let bar = Bar::new(i as f64, term.enrolled as f64).width(0.5);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(term.term.label())
                        .color(palette[i]),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Departments tab
// ---------------------------------------------------------------------------

/// Total enrollment per department.
pub fn department_totals(ui: &mut Ui, shares: &[DepartmentShare]) {
    let labels: Vec<String> = shares.iter().map(|s| s.department.to_string()).collect();

    Plot::new("department_totals")
        .legend(Legend::default())
        .y_axis_label("Students")
        .x_axis_formatter(category_formatter(labels))
        .height(280.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, share) in shares.iter().enumerate() {
                let bar = Bar::new(i as f64, share.enrolled as f64).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(share.department.label())
                        .color(color::department_color(share.department)),
                );
            }
        });
}

/// Per-department enrollment by year.
pub fn department_trend_lines(ui: &mut Ui, trend: &[DepartmentYearRow]) {
    Plot::new("department_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Students")
        .x_axis_formatter(year_formatter)
        .height(300.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for dept in Department::ALL {
                let points: Vec<[f64; 2]> = trend
                    .iter()
                    .map(|row| [row.year as f64, row.enrolled[dept.index()] as f64])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(dept.label())
                        .color(color::department_color(dept))
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

/// Horizontal conversion funnel: applications → admitted → enrolled.
pub fn funnel(ui: &mut Ui, kpis: &Kpis) {
    let stages = [
        ("Enrolled", kpis.total_enrolled, color::ENROLLMENT),
        ("Admitted", kpis.total_admitted, color::ADMITTED),
        ("Applications", kpis.total_applications, color::APPLICATIONS),
    ];
    let labels: Vec<String> = stages.iter().map(|(name, _, _)| name.to_string()).collect();

    Plot::new("conversion_funnel")
        .legend(Legend::default())
        .x_axis_label("Students")
        .y_axis_formatter(category_formatter(labels))
        .height(240.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (name, count, fill)) in stages.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(*name)
                        .color(*fill)
                        .horizontal(),
                );
            }
        });
}
