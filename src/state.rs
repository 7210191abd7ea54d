use crate::data::filter::{filtered_indices, FilterSpec, YearFilter};
use crate::data::model::{Dataset, Department, Term};

// ---------------------------------------------------------------------------
// View selection
// ---------------------------------------------------------------------------

/// The tabbed views of the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Trends,
    Terms,
    Departments,
    Overview,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Trends, Tab::Terms, Tab::Departments, Tab::Overview];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Trends => "Trends",
            Tab::Terms => "Term Comparison",
            Tab::Departments => "Departments",
            Tab::Overview => "Overview",
        }
    }
}

/// Which year-selection widget drives the year predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearMode {
    Range,
    Pick,
}

/// Status line shown in the top bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, read-only for the process lifetime.
    pub dataset: Dataset,

    /// Current filter criteria.
    pub filters: FilterSpec,

    /// Active year-selection variant.
    pub year_mode: YearMode,

    /// Indices of records passing the current filters (recomputed on every
    /// filter change, never carried across them).
    pub visible_indices: Vec<usize>,

    /// Selected tab of the central panel.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    /// Wrap a freshly loaded dataset with everything selected.
    pub fn new(dataset: Dataset) -> Self {
        let filters = FilterSpec::allow_all(&dataset);
        let visible_indices = filtered_indices(&dataset, &filters);
        Self {
            dataset,
            filters,
            year_mode: YearMode::Range,
            visible_indices,
            tab: Tab::Trends,
            status_message: None,
        }
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.filters);
    }

    /// Switch between the range and pick-years widgets, resetting the year
    /// predicate to "everything" in the new representation.
    pub fn set_year_mode(&mut self, mode: YearMode) {
        if mode == self.year_mode {
            return;
        }
        self.year_mode = mode;
        self.filters.years = match mode {
            YearMode::Range => {
                let (from, to) = self.dataset.year_span().unwrap_or((0, 0));
                YearFilter::Range { from, to }
            }
            YearMode::Pick => YearFilter::Years(self.dataset.years.iter().copied().collect()),
        };
        self.refilter();
    }

    pub fn set_year_range(&mut self, from: i32, to: i32) {
        self.filters.years = YearFilter::Range { from, to };
        self.refilter();
    }

    /// Toggle a year in pick mode; a no-op while a range is active.
    pub fn toggle_year(&mut self, year: i32) {
        if let YearFilter::Years(selected) = &mut self.filters.years {
            if !selected.remove(&year) {
                selected.insert(year);
            }
            self.refilter();
        }
    }

    pub fn toggle_term(&mut self, term: Term) {
        if !self.filters.terms.remove(&term) {
            self.filters.terms.insert(term);
        }
        self.refilter();
    }

    pub fn set_department(&mut self, department: Option<Department>) {
        self.filters.department = department;
        self.refilter();
    }

    /// Restore the widest filter.
    pub fn reset_filters(&mut self) {
        self.filters = FilterSpec::allow_all(&self.dataset);
        self.year_mode = YearMode::Range;
        self.refilter();
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::StudentRecord;

    fn dataset() -> Dataset {
        let record = |year, term| StudentRecord {
            year,
            term,
            applications: 100,
            admitted: 50,
            enrolled: 40,
            retention_rate: 90.0,
            satisfaction: 85.0,
            department_enrolled: [20, 10, 5, 5],
        };
        Dataset::from_records(vec![
            record(2020, Term::Spring),
            record(2020, Term::Fall),
            record(2021, Term::Spring),
        ])
    }

    #[test]
    fn fresh_state_selects_every_record() {
        let state = AppState::new(dataset());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn term_toggle_refilters_immediately() {
        let mut state = AppState::new(dataset());
        state.toggle_term(Term::Fall);
        assert_eq!(state.visible_indices, vec![0, 2]);
        state.toggle_term(Term::Fall);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn switching_year_mode_keeps_everything_selected() {
        let mut state = AppState::new(dataset());
        state.set_year_mode(YearMode::Pick);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        state.toggle_year(2020);
        assert_eq!(state.visible_indices, vec![2]);
    }

    #[test]
    fn reset_restores_the_widest_filter() {
        let mut state = AppState::new(dataset());
        state.set_year_range(2021, 2021);
        state.toggle_term(Term::Spring);
        assert!(state.visible_indices.is_empty());
        state.reset_filters();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }
}
