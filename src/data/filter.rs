use std::collections::BTreeSet;

use super::model::{Dataset, Department, StudentRecord, Term};

// ---------------------------------------------------------------------------
// Year selection – range variant and pick-years variant
// ---------------------------------------------------------------------------

/// The two year-filter flavours the dashboard offers: an inclusive bound pair
/// (slider style) or an explicit set of years (multi-select style). Both are
/// served by the same engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearFilter {
    Range { from: i32, to: i32 },
    Years(BTreeSet<i32>),
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::Range { from, to } => (*from..=*to).contains(&year),
            YearFilter::Years(selected) => selected.contains(&year),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// Filter criteria, combined as a logical AND across dimensions.
///
/// * An empty term set (or an empty year set) selects nothing.
/// * `department: None` places no department constraint; `Some(d)` keeps rows
///   with a positive enrollment count for `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub years: YearFilter,
    pub terms: BTreeSet<Term>,
    pub department: Option<Department>,
}

impl FilterSpec {
    /// The widest filter for a dataset: full year span, every term, no
    /// department constraint.
    pub fn allow_all(dataset: &Dataset) -> Self {
        let (from, to) = dataset.year_span().unwrap_or((0, 0));
        FilterSpec {
            years: YearFilter::Range { from, to },
            terms: Term::ALL.into_iter().collect(),
            department: None,
        }
    }

    pub fn matches(&self, record: &StudentRecord) -> bool {
        if !self.years.matches(record.year) {
            return false;
        }
        if !self.terms.contains(&record.term) {
            return false;
        }
        if let Some(dept) = self.department {
            if record.department_enrolled(dept) == 0 {
                return false;
            }
        }
        true
    }
}

/// Return indices of records passing all active filters, in dataset order.
///
/// An empty result is valid; the caller must short-circuit before aggregating
/// since the ratio KPIs divide by sums over the view.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| spec.matches(record))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, term: Term, eng: u64) -> StudentRecord {
        StudentRecord {
            year,
            term,
            applications: 100,
            admitted: 50,
            enrolled: 40,
            retention_rate: 90.0,
            satisfaction: 85.0,
            department_enrolled: [eng, 10, 5, 5],
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record(2019, Term::Spring, 15),
            record(2019, Term::Fall, 0),
            record(2020, Term::Spring, 12),
            record(2021, Term::Fall, 18),
        ])
    }

    #[test]
    fn every_filtered_row_satisfies_all_predicates() {
        let ds = dataset();
        let spec = FilterSpec {
            years: YearFilter::Range { from: 2019, to: 2020 },
            terms: [Term::Spring].into_iter().collect(),
            department: Some(Department::Engineering),
        };
        let indices = filtered_indices(&ds, &spec);
        assert!(!indices.is_empty());
        for &i in &indices {
            assert!(spec.matches(&ds.records[i]));
        }
        // Subset of the full dataset, in order.
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|&i| i < ds.len()));
    }

    #[test]
    fn year_range_bounds_are_inclusive() {
        let ds = dataset();
        let spec = FilterSpec {
            years: YearFilter::Range { from: 2019, to: 2021 },
            ..FilterSpec::allow_all(&ds)
        };
        assert_eq!(filtered_indices(&ds, &spec).len(), 4);
    }

    #[test]
    fn explicit_year_set_selects_only_members() {
        let ds = dataset();
        let spec = FilterSpec {
            years: YearFilter::Years([2019].into_iter().collect()),
            ..FilterSpec::allow_all(&ds)
        };
        let indices = filtered_indices(&ds, &spec);
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn empty_term_set_selects_nothing() {
        let ds = dataset();
        let spec = FilterSpec {
            terms: BTreeSet::new(),
            ..FilterSpec::allow_all(&ds)
        };
        assert!(filtered_indices(&ds, &spec).is_empty());
    }

    #[test]
    fn department_filter_requires_positive_enrollment() {
        let ds = dataset();
        let spec = FilterSpec {
            department: Some(Department::Engineering),
            ..FilterSpec::allow_all(&ds)
        };
        // Row 1 has zero engineering enrollment and is excluded.
        assert_eq!(filtered_indices(&ds, &spec), vec![0, 2, 3]);
    }

    #[test]
    fn out_of_range_years_yield_an_empty_view() {
        let ds = dataset();
        let spec = FilterSpec {
            years: YearFilter::Range { from: 1990, to: 1995 },
            ..FilterSpec::allow_all(&ds)
        };
        assert!(filtered_indices(&ds, &spec).is_empty());
    }
}
