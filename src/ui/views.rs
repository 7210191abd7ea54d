use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::aggregate::{self, DepartmentShare, Trend};
use crate::data::loader;
use crate::data::model::{Dataset, Term};
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Central panel – tab strip, KPI row, tab bodies
// ---------------------------------------------------------------------------

/// Render the central panel: tab strip, the KPI metric row, and the active
/// view. Everything below is recomputed from the filtered view on each frame.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    // Empty filtered view: warn and skip aggregation entirely.
    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No records match the current filters. Adjust your selection.");
        });
        return;
    }

    kpi_row(ui, state);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.tab {
            Tab::Trends => trends_tab(ui, &state.dataset, &state.visible_indices),
            Tab::Terms => terms_tab(ui, &state.dataset, &state.visible_indices),
            Tab::Departments => departments_tab(ui, &state.dataset, &state.visible_indices),
            Tab::Overview => overview_tab(ui, state),
        });
}

/// The four headline metrics with change indicators against the unfiltered
/// dataset.
fn kpi_row(ui: &mut Ui, state: &AppState) {
    let dataset = &state.dataset;
    let all_rows: Vec<usize> = (0..dataset.len()).collect();
    let view = aggregate::kpis(dataset, &state.visible_indices);
    let overall = aggregate::kpis(dataset, &all_rows);
    let deltas = aggregate::kpi_deltas(&view, &overall);

    ui.columns(4, |cols| {
        metric(
            &mut cols[0],
            "Avg retention rate",
            format!("{:.1}%", view.retention_mean),
            Some(delta_pct(deltas.retention)),
        );
        metric(
            &mut cols[1],
            "Avg student satisfaction",
            format!("{:.1}%", view.satisfaction_mean),
            Some(delta_pct(deltas.satisfaction)),
        );
        metric(
            &mut cols[2],
            "Total enrolled",
            format_count(view.total_enrolled),
            Some(delta_count(deltas.enrolled)),
        );
        metric(
            &mut cols[3],
            "Admission rate",
            format!("{:.1}%", view.admission_rate),
            None,
        );
    });
}

// ---------------------------------------------------------------------------
// Tab bodies
// ---------------------------------------------------------------------------

fn trends_tab(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    let yearly = aggregate::by_year(dataset, rows);

    ui.heading("Retention & satisfaction over time");
    plot::quality_trend(ui, &yearly);
    ui.add_space(12.0);

    ui.heading("Enrollment by year");
    plot::enrollment_trend(ui, &yearly);
    ui.add_space(12.0);

    ui.heading("Admission funnel by year");
    plot::funnel_trend(ui, &yearly);
}

fn terms_tab(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    let terms = aggregate::by_term(dataset, rows);

    ui.heading("Quality metrics by term");
    plot::term_quality_bars(ui, &terms);
    ui.add_space(12.0);

    ui.heading("Enrollment by term");
    plot::term_share_bars(ui, &terms);
    ui.add_space(12.0);

    let spring = terms.iter().find(|t| t.term == Term::Spring);
    let fall = terms.iter().find(|t| t.term == Term::Fall);
    match (spring, fall) {
        (Some(spring), Some(fall)) => {
            ui.columns(3, |cols| {
                metric(
                    &mut cols[0],
                    "Spring retention",
                    format!("{:.1}%", spring.retention_mean),
                    None,
                );
                metric(
                    &mut cols[1],
                    "Fall retention",
                    format!("{:.1}%", fall.retention_mean),
                    None,
                );
                let diff = fall.retention_mean - spring.retention_mean;
                metric(
                    &mut cols[2],
                    "Difference (Fall vs Spring)",
                    format!("{diff:+.1}%"),
                    None,
                );
            });
        }
        _ => {
            ui.label("Enable both terms in the filter panel to compare Spring and Fall.");
        }
    }
}

fn departments_tab(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    let shares = aggregate::by_department(dataset, rows);

    ui.heading("Total enrollment by department");
    plot::department_totals(ui, &shares);
    ui.add_space(12.0);

    ui.heading("Department summary");
    department_table(ui, &shares);
    ui.add_space(12.0);

    ui.heading("Department enrollment by year");
    let trend = aggregate::department_trend(dataset, rows);
    plot::department_trend_lines(ui, &trend);

    if let Some((leader, laggard)) = aggregate::leader_and_laggard(&shares) {
        ui.add_space(8.0);
        ui.label(format!(
            "{} leads with {} students ({:.1}% of departmental enrollment); \
             {} has the smallest intake with {} ({:.1}%).",
            leader.department,
            format_count(leader.enrolled),
            leader.share_pct,
            laggard.department,
            format_count(laggard.enrolled),
            laggard.share_pct,
        ));
    }
}

fn overview_tab(ui: &mut Ui, state: &mut AppState) {
    let mut export_clicked = false;
    {
        let dataset = &state.dataset;
        let rows = &state.visible_indices;
        let view = aggregate::kpis(dataset, rows);
        let yearly = aggregate::by_year(dataset, rows);
        let shares = aggregate::by_department(dataset, rows);

        ui.heading("Admission totals");
        ui.columns(3, |cols| {
            metric(
                &mut cols[0],
                "Applications",
                format_count(view.total_applications),
                None,
            );
            metric(&mut cols[1], "Admitted", format_count(view.total_admitted), None);
            metric(&mut cols[2], "Enrolled", format_count(view.total_enrolled), None);
        });
        ui.add_space(8.0);
        ui.columns(3, |cols| {
            metric(
                &mut cols[0],
                "Applications → admission",
                format!("{:.1}%", view.admission_rate),
                None,
            );
            metric(
                &mut cols[1],
                "Admission → enrollment",
                format!("{:.1}%", view.yield_rate),
                None,
            );
            metric(
                &mut cols[2],
                "Applications → enrollment",
                format!("{:.1}%", view.conversion_rate),
                None,
            );
        });
        ui.add_space(12.0);

        ui.heading("Conversion funnel");
        plot::funnel(ui, &view);
        ui.add_space(12.0);

        ui.heading("Executive summary");
        let enrolled: Vec<f64> = yearly.iter().map(|y| y.enrolled as f64).collect();
        let retention: Vec<f64> = yearly.iter().map(|y| y.retention_mean).collect();
        let satisfaction: Vec<f64> = yearly.iter().map(|y| y.satisfaction_mean).collect();
        summary_line(ui, "Enrollment", Trend::classify(&enrolled), "growing steadily");
        summary_line(ui, "Retention", Trend::classify(&retention), "improving continuously");
        summary_line(ui, "Satisfaction", Trend::classify(&satisfaction), "rising steadily");
        if let Some((leader, _)) = aggregate::leader_and_laggard(&shares) {
            ui.label(format!(
                "Top department: {} with {} students.",
                leader.department,
                format_count(leader.enrolled)
            ));
        }
        ui.add_space(12.0);

        ui.heading(format!("Filtered records ({})", rows.len()));
        data_table(ui, dataset, rows);
        ui.add_space(8.0);

        if ui.button("Export filtered data as CSV…").clicked() {
            export_clicked = true;
        }
    }
    if export_clicked {
        panels::export_dialog(state);
    }
}

fn summary_line(ui: &mut Ui, subject: &str, trend: Trend, growing: &str) {
    let wording = match trend {
        Trend::Growing => growing,
        Trend::Fluctuating => "fluctuating",
    };
    ui.label(format!("{subject} is {wording} across the selected years."));
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn department_table(ui: &mut Ui, shares: &[DepartmentShare]) {
    ui.push_id("department_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Department");
                });
                header.col(|ui| {
                    ui.strong("Enrolled");
                });
                header.col(|ui| {
                    ui.strong("Share");
                });
            })
            .body(|mut body| {
                for share in shares {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(share.department.label());
                        });
                        row.col(|ui| {
                            ui.label(format_count(share.enrolled));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.1}%", share.share_pct));
                        });
                    });
                }
            });
    });
}

/// The filtered rows in input-schema column order.
fn data_table(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), loader::REQUIRED_COLUMNS.len())
            .header(20.0, |mut header| {
                for name in loader::REQUIRED_COLUMNS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let record = &dataset.records[rows[row.index()]];
                    row.col(|ui| {
                        ui.label(record.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.term.label());
                    });
                    row.col(|ui| {
                        ui.label(record.applications.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.admitted.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.enrolled.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}", record.retention_rate));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}", record.satisfaction));
                    });
                    for count in record.department_enrolled {
                        row.col(|ui| {
                            ui.label(count.to_string());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// A labelled value with an optional change indicator underneath.
fn metric(ui: &mut Ui, label: &str, value: String, delta: Option<(String, bool)>) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small().weak());
            ui.label(RichText::new(value).heading().strong());
            if let Some((text, positive)) = delta {
                let tint = if positive {
                    color::DELTA_UP
                } else {
                    color::DELTA_DOWN
                };
                ui.label(RichText::new(text).color(tint).small());
            }
        });
    });
}

fn delta_pct(delta: f64) -> (String, bool) {
    (format!("{delta:+.1}%"), delta >= 0.0)
}

fn delta_count(delta: i64) -> (String, bool) {
    (format!("{delta:+}"), delta >= 0)
}

/// Thousands-separated count, matching the dashboard's number style.
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn deltas_carry_their_sign() {
        assert_eq!(delta_pct(1.26), ("+1.3%".to_string(), true));
        assert_eq!(delta_pct(-0.5), ("-0.5%".to_string(), false));
        assert_eq!(delta_count(-40), ("-40".to_string(), false));
        assert_eq!(delta_count(7), ("+7".to_string(), true));
    }
}
