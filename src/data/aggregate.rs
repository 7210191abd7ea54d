use std::collections::BTreeMap;

use super::model::{Dataset, Department, StudentRecord, Term};

// ---------------------------------------------------------------------------
// Scalar KPIs
// ---------------------------------------------------------------------------

/// Percentage ratio with a zero-denominator guard: reports 0 instead of
/// faulting when the denominator is 0.
pub fn ratio_pct(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Scalar summary metrics over a view (a slice of row indices).
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub retention_mean: f64,
    pub satisfaction_mean: f64,
    pub total_applications: u64,
    pub total_admitted: u64,
    pub total_enrolled: u64,
    /// ΣAdmitted / ΣApplications, in percent.
    pub admission_rate: f64,
    /// ΣEnrolled / ΣAdmitted, in percent.
    pub yield_rate: f64,
    /// ΣEnrolled / ΣApplications, in percent.
    pub conversion_rate: f64,
}

/// Compute the scalar KPIs over `rows`. Means report 0 on an empty view; the
/// rendering layer short-circuits before that case is visible to users.
pub fn kpis(dataset: &Dataset, rows: &[usize]) -> Kpis {
    let mut acc = GroupAcc::default();
    for &i in rows {
        acc.push(&dataset.records[i]);
    }
    Kpis {
        retention_mean: acc.retention_mean(),
        satisfaction_mean: acc.satisfaction_mean(),
        total_applications: acc.applications,
        total_admitted: acc.admitted,
        total_enrolled: acc.enrolled,
        admission_rate: ratio_pct(acc.admitted, acc.applications),
        yield_rate: ratio_pct(acc.enrolled, acc.admitted),
        conversion_rate: ratio_pct(acc.enrolled, acc.applications),
    }
}

/// Change indicators: view KPI minus the same KPI over the unfiltered
/// dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiDeltas {
    pub retention: f64,
    pub satisfaction: f64,
    pub enrolled: i64,
}

pub fn kpi_deltas(view: &Kpis, baseline: &Kpis) -> KpiDeltas {
    KpiDeltas {
        retention: view.retention_mean - baseline.retention_mean,
        satisfaction: view.satisfaction_mean - baseline.satisfaction_mean,
        enrolled: view.total_enrolled as i64 - baseline.total_enrolled as i64,
    }
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// Shared accumulator for the year and term groupings.
#[derive(Debug, Default, Clone)]
struct GroupAcc {
    retention_sum: f64,
    satisfaction_sum: f64,
    applications: u64,
    admitted: u64,
    enrolled: u64,
    rows: u64,
}

impl GroupAcc {
    fn push(&mut self, record: &StudentRecord) {
        self.retention_sum += record.retention_rate;
        self.satisfaction_sum += record.satisfaction;
        self.applications += record.applications;
        self.admitted += record.admitted;
        self.enrolled += record.enrolled;
        self.rows += 1;
    }

    fn retention_mean(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.retention_sum / self.rows as f64
        }
    }

    fn satisfaction_mean(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.satisfaction_sum / self.rows as f64
        }
    }
}

/// One grouped row of the by-year aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct YearAggregate {
    pub year: i32,
    pub retention_mean: f64,
    pub satisfaction_mean: f64,
    pub applications: u64,
    pub admitted: u64,
    pub enrolled: u64,
}

/// Group the view by year, ascending.
pub fn by_year(dataset: &Dataset, rows: &[usize]) -> Vec<YearAggregate> {
    let mut groups: BTreeMap<i32, GroupAcc> = BTreeMap::new();
    for &i in rows {
        let record = &dataset.records[i];
        groups.entry(record.year).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(year, acc)| YearAggregate {
            year,
            retention_mean: acc.retention_mean(),
            satisfaction_mean: acc.satisfaction_mean(),
            applications: acc.applications,
            admitted: acc.admitted,
            enrolled: acc.enrolled,
        })
        .collect()
}

/// One grouped row of the by-term aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TermAggregate {
    pub term: Term,
    pub retention_mean: f64,
    pub satisfaction_mean: f64,
    pub applications: u64,
    pub admitted: u64,
    pub enrolled: u64,
}

/// Group the view by term, in first-seen order.
pub fn by_term(dataset: &Dataset, rows: &[usize]) -> Vec<TermAggregate> {
    let mut order: Vec<Term> = Vec::new();
    let mut groups: Vec<GroupAcc> = Vec::new();
    for &i in rows {
        let record = &dataset.records[i];
        let slot = match order.iter().position(|&t| t == record.term) {
            Some(pos) => pos,
            None => {
                order.push(record.term);
                groups.push(GroupAcc::default());
                order.len() - 1
            }
        };
        groups[slot].push(record);
    }
    order
        .into_iter()
        .zip(groups)
        .map(|(term, acc)| TermAggregate {
            term,
            retention_mean: acc.retention_mean(),
            satisfaction_mean: acc.satisfaction_mean(),
            applications: acc.applications,
            admitted: acc.admitted,
            enrolled: acc.enrolled,
        })
        .collect()
}

/// Enrollment total and share for one department.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentShare {
    pub department: Department,
    pub enrolled: u64,
    /// Share of the four-department total, in percent. 0 when the total is 0.
    pub share_pct: f64,
}

/// Sum the four department-enrollment columns independently over the view.
/// Every department appears in the result, including those with zero rows.
pub fn by_department(dataset: &Dataset, rows: &[usize]) -> Vec<DepartmentShare> {
    let mut totals = [0u64; Department::ALL.len()];
    for &i in rows {
        let record = &dataset.records[i];
        for (slot, &count) in totals.iter_mut().zip(record.department_enrolled.iter()) {
            *slot += count;
        }
    }
    let grand_total: u64 = totals.iter().sum();
    Department::ALL
        .into_iter()
        .map(|department| DepartmentShare {
            department,
            enrolled: totals[department.index()],
            share_pct: ratio_pct(totals[department.index()], grand_total),
        })
        .collect()
}

/// Departments with the largest and smallest enrollment over the view.
/// `None` only when `shares` is empty (never the case for [`by_department`]).
pub fn leader_and_laggard(shares: &[DepartmentShare]) -> Option<(&DepartmentShare, &DepartmentShare)> {
    let leader = shares.iter().max_by_key(|s| s.enrolled)?;
    let laggard = shares.iter().min_by_key(|s| s.enrolled)?;
    Some((leader, laggard))
}

/// Per-department enrollment sums grouped by year, ascending. Feeds the
/// department trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentYearRow {
    pub year: i32,
    pub enrolled: [u64; Department::ALL.len()],
}

pub fn department_trend(dataset: &Dataset, rows: &[usize]) -> Vec<DepartmentYearRow> {
    let mut groups: BTreeMap<i32, [u64; Department::ALL.len()]> = BTreeMap::new();
    for &i in rows {
        let record = &dataset.records[i];
        let totals = groups.entry(record.year).or_default();
        for (slot, &count) in totals.iter_mut().zip(record.department_enrolled.iter()) {
            *slot += count;
        }
    }
    groups
        .into_iter()
        .map(|(year, enrolled)| DepartmentYearRow { year, enrolled })
        .collect()
}

// ---------------------------------------------------------------------------
// Trend classifier
// ---------------------------------------------------------------------------

/// Qualitative label for a yearly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Growing,
    Fluctuating,
}

impl Trend {
    /// A monotonically non-decreasing series classifies as `Growing`.
    pub fn classify(series: &[f64]) -> Trend {
        if series.windows(2).all(|pair| pair[1] >= pair[0]) {
            Trend::Growing
        } else {
            Trend::Fluctuating
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::StudentRecord;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// The two-row fixture: 2020 Spring and 2021 Fall.
    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            StudentRecord {
                year: 2020,
                term: Term::Spring,
                applications: 100,
                admitted: 50,
                enrolled: 40,
                retention_rate: 90.0,
                satisfaction: 85.0,
                department_enrolled: [20, 10, 5, 5],
            },
            StudentRecord {
                year: 2021,
                term: Term::Fall,
                applications: 200,
                admitted: 100,
                enrolled: 90,
                retention_rate: 92.0,
                satisfaction: 88.0,
                department_enrolled: [40, 20, 15, 15],
            },
        ])
    }

    fn all_rows(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn scalar_kpis_match_the_reference_scenario() {
        let ds = dataset();
        let rows = all_rows(&ds);
        let k = kpis(&ds, &rows);

        assert!(approx(k.admission_rate, 50.0));
        assert!(approx(k.yield_rate, 130.0 / 150.0 * 100.0));
        assert_eq!(k.total_enrolled, 130);
        assert_eq!(k.total_applications, 300);
        assert_eq!(k.total_admitted, 150);
        assert!(approx(k.retention_mean, 91.0));
        assert!(approx(k.satisfaction_mean, 86.5));
        assert!(k.admission_rate >= 0.0 && k.admission_rate <= 100.0);
        assert!(k.yield_rate >= 0.0 && k.yield_rate <= 100.0);
    }

    #[test]
    fn empty_view_reports_zero_kpis_without_faulting() {
        let ds = dataset();
        let k = kpis(&ds, &[]);
        assert!(approx(k.retention_mean, 0.0));
        assert!(approx(k.satisfaction_mean, 0.0));
        assert!(approx(k.admission_rate, 0.0));
        assert!(approx(k.yield_rate, 0.0));
        assert!(approx(k.conversion_rate, 0.0));
        assert_eq!(k.total_enrolled, 0);
    }

    #[test]
    fn zero_denominator_ratios_report_zero() {
        assert!(approx(ratio_pct(0, 0), 0.0));
        assert!(approx(ratio_pct(5, 0), 0.0));
        assert!(approx(ratio_pct(1, 4), 25.0));
    }

    #[test]
    fn kpi_deltas_compare_view_against_baseline() {
        let ds = dataset();
        let rows = all_rows(&ds);
        let overall = kpis(&ds, &rows);
        let spring_only = kpis(&ds, &[0]);
        let d = kpi_deltas(&spring_only, &overall);
        assert!(approx(d.retention, 90.0 - 91.0));
        assert!(approx(d.satisfaction, 85.0 - 86.5));
        assert_eq!(d.enrolled, 40 - 130);
    }

    #[test]
    fn by_year_is_ascending_and_idempotent() {
        let ds = dataset();
        let rows = vec![1, 0]; // deliberately out of year order
        let first = by_year(&ds, &rows);
        let second = by_year(&ds, &rows);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].year, 2020);
        assert_eq!(first[1].year, 2021);
        assert_eq!(first[1].enrolled, 90);
        assert!(approx(first[0].retention_mean, 90.0));
    }

    #[test]
    fn by_term_preserves_first_seen_order() {
        let ds = dataset();
        let rows = vec![1, 0]; // Fall first
        let terms = by_term(&ds, &rows);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].term, Term::Fall);
        assert_eq!(terms[1].term, Term::Spring);
        assert_eq!(terms[0].enrolled, 90);
        assert!(approx(terms[1].satisfaction_mean, 85.0));
    }

    #[test]
    fn department_breakdown_covers_every_department() {
        let ds = dataset();
        let rows = all_rows(&ds);
        let shares = by_department(&ds, &rows);
        assert_eq!(shares.len(), Department::ALL.len());
        assert_eq!(shares[0].department, Department::Engineering);
        assert_eq!(shares[0].enrolled, 60);

        let dept_total: u64 = shares.iter().map(|s| s.enrolled).sum();
        let k = kpis(&ds, &rows);
        assert!(dept_total <= k.total_enrolled);

        let share_sum: f64 = shares.iter().map(|s| s.share_pct).sum();
        assert!(approx(share_sum, 100.0));
    }

    #[test]
    fn department_breakdown_on_empty_view_is_all_zero() {
        let ds = dataset();
        let shares = by_department(&ds, &[]);
        assert_eq!(shares.len(), Department::ALL.len());
        for share in &shares {
            assert_eq!(share.enrolled, 0);
            assert!(approx(share.share_pct, 0.0));
        }
    }

    #[test]
    fn leader_and_laggard_pick_the_extremes() {
        let ds = dataset();
        let rows = all_rows(&ds);
        let shares = by_department(&ds, &rows);
        let (leader, laggard) = leader_and_laggard(&shares).unwrap();
        assert_eq!(leader.department, Department::Engineering);
        // Arts and Science tie at 20; min_by_key keeps the first.
        assert_eq!(laggard.enrolled, 20);
    }

    #[test]
    fn department_trend_groups_by_ascending_year() {
        let ds = dataset();
        let rows = vec![1, 0];
        let trend = department_trend(&ds, &rows);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 2020);
        assert_eq!(trend[0].enrolled, [20, 10, 5, 5]);
        assert_eq!(trend[1].enrolled, [40, 20, 15, 15]);
    }

    #[test]
    fn trend_classifier_requires_non_decreasing_values() {
        assert_eq!(Trend::classify(&[1.0, 2.0, 2.0, 3.0]), Trend::Growing);
        assert_eq!(Trend::classify(&[1.0, 3.0, 2.0]), Trend::Fluctuating);
        assert_eq!(Trend::classify(&[]), Trend::Growing);
        assert_eq!(Trend::classify(&[5.0]), Trend::Growing);
    }
}
