use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Term – academic period of an observation
// ---------------------------------------------------------------------------

/// Academic term. Serialized exactly as it appears in the CSV (`Spring`,
/// `Fall`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Spring,
    Fall,
}

impl Term {
    pub const ALL: [Term; 2] = [Term::Spring, Term::Fall];

    pub fn label(&self) -> &'static str {
        match self {
            Term::Spring => "Spring",
            Term::Fall => "Fall",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Department – one of the four enrollment columns
// ---------------------------------------------------------------------------

/// Academic department. Each one corresponds to a `<name> Enrolled` column of
/// the source CSV; the discriminant doubles as an index into
/// [`StudentRecord::department_enrolled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    Engineering,
    Business,
    Arts,
    Science,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Engineering,
        Department::Business,
        Department::Arts,
        Department::Science,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Business => "Business",
            Department::Arts => "Arts",
            Department::Science => "Science",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single (Year, Term) observation. Year/Term pairs may repeat across rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub year: i32,
    pub term: Term,
    pub applications: u64,
    pub admitted: u64,
    pub enrolled: u64,
    /// Retention rate in percent, 0–100.
    pub retention_rate: f64,
    /// Student satisfaction in percent, 0–100.
    pub satisfaction: f64,
    /// Enrollment per department, indexed by [`Department::index`].
    pub department_enrolled: [u64; Department::ALL.len()],
}

impl StudentRecord {
    pub fn department_enrolled(&self, dept: Department) -> u64 {
        self.department_enrolled[dept.index()]
    }

    /// Check the admission-funnel and percentage bounds. Returns the violated
    /// constraint as text so the loader can attach a row number.
    pub fn validate(&self) -> Result<(), String> {
        if self.admitted > self.applications {
            return Err(format!(
                "Admitted ({}) exceeds Applications ({})",
                self.admitted, self.applications
            ));
        }
        if self.enrolled > self.admitted {
            return Err(format!(
                "Enrolled ({}) exceeds Admitted ({})",
                self.enrolled, self.admitted
            ));
        }
        if !(0.0..=100.0).contains(&self.retention_rate) {
            return Err(format!(
                "Retention Rate (%) out of range: {}",
                self.retention_rate
            ));
        }
        if !(0.0..=100.0).contains(&self.satisfaction) {
            return Err(format!(
                "Student Satisfaction (%) out of range: {}",
                self.satisfaction
            ));
        }
        let dept_sum: u64 = self.department_enrolled.iter().sum();
        if dept_sum > self.enrolled {
            return Err(format!(
                "department enrollment sum ({dept_sum}) exceeds Enrolled ({})",
                self.enrolled
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after load: filtering and aggregation
/// operate on row indices and never mutate the records.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All observations in file order.
    pub records: Vec<StudentRecord>,
    /// Sorted, de-duplicated years present in the data.
    pub years: Vec<i32>,
}

impl Dataset {
    /// Build the year index from the loaded records.
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        Dataset { records, years }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest year, if any records exist.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        match (self.years.first(), self.years.last()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, term: Term) -> StudentRecord {
        StudentRecord {
            year,
            term,
            applications: 100,
            admitted: 50,
            enrolled: 40,
            retention_rate: 90.0,
            satisfaction: 85.0,
            department_enrolled: [20, 10, 5, 5],
        }
    }

    #[test]
    fn valid_record_passes_validation() {
        assert!(record(2020, Term::Spring).validate().is_ok());
    }

    #[test]
    fn admitted_above_applications_is_rejected() {
        let mut r = record(2020, Term::Spring);
        r.admitted = 150;
        r.enrolled = 120;
        assert!(r.validate().is_err());
    }

    #[test]
    fn enrolled_above_admitted_is_rejected() {
        let mut r = record(2020, Term::Spring);
        r.enrolled = 60;
        assert!(r.validate().is_err());
    }

    #[test]
    fn percentage_bounds_are_enforced() {
        let mut r = record(2020, Term::Spring);
        r.retention_rate = 101.0;
        assert!(r.validate().is_err());

        let mut r = record(2020, Term::Spring);
        r.satisfaction = -0.5;
        assert!(r.validate().is_err());
    }

    #[test]
    fn department_sum_above_enrolled_is_rejected() {
        let mut r = record(2020, Term::Spring);
        r.department_enrolled = [20, 10, 5, 6];
        assert!(r.validate().is_err());
    }

    #[test]
    fn dataset_indexes_sorted_unique_years() {
        let ds = Dataset::from_records(vec![
            record(2021, Term::Fall),
            record(2019, Term::Spring),
            record(2021, Term::Spring),
        ]);
        assert_eq!(ds.years, vec![2019, 2021]);
        assert_eq!(ds.year_span(), Some((2019, 2021)));
        assert_eq!(ds.len(), 3);
    }
}
