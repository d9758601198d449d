//! Client-side editing of a work-experience draft.
//!
//! Accomplishments are edited locally and the whole record is sent on save.
//! Validation matches what the edit endpoint rejects with a 400.

use crate::errors::ApiError;
use crate::models::WorkExperience;

impl WorkExperience {
    pub fn add_accomplishment(&mut self, text: impl Into<String>) {
        self.accomplishments.push(text.into());
    }

    /// Replaces the accomplishment at `index`. Returns `false` if out of range.
    pub fn edit_accomplishment(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.accomplishments.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_accomplishment(&mut self, index: usize) -> Option<String> {
        (index < self.accomplishments.len()).then(|| self.accomplishments.remove(index))
    }

    pub fn set_start(&mut self, year: Option<i32>, month: Option<u32>) {
        self.start_year = year;
        self.start_month = month;
    }

    /// `None` for both means the position is current.
    pub fn set_end(&mut self, year: Option<i32>, month: Option<u32>) {
        self.end_year = year;
        self.end_month = month;
    }

    pub fn is_current(&self) -> bool {
        self.end_year.is_none()
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Invalid("Title is required".into()));
        }
        let Some(start_year) = self.start_year else {
            return Err(ApiError::Invalid("Start year is required".into()));
        };
        for month in [self.start_month, self.end_month].into_iter().flatten() {
            if !(1..=12).contains(&month) {
                return Err(ApiError::Invalid(format!("Invalid month: {month}")));
            }
        }
        if self.end_year.is_none() && self.end_month.is_some() {
            return Err(ApiError::Invalid("End month given without end year".into()));
        }
        if let Some(end_year) = self.end_year {
            let start = (start_year, self.start_month.unwrap_or(1));
            let end = (end_year, self.end_month.unwrap_or(12));
            if end < start {
                return Err(ApiError::Invalid("End date is before start date".into()));
            }
        }
        Ok(())
    }

    /// `2019-03 – 2022-11`, `2019 – Present`, or empty when no start year is known.
    pub fn date_range(&self) -> String {
        let Some(start_year) = self.start_year else {
            return String::new();
        };
        let start = format_year_month(start_year, self.start_month);
        let end = match self.end_year {
            Some(year) => format_year_month(year, self.end_month),
            None => "Present".to_string(),
        };
        format!("{start} – {end}")
    }
}

fn format_year_month(year: i32, month: Option<u32>) -> String {
    match month {
        Some(month) => format!("{year}-{month:02}"),
        None => year.to_string(),
    }
}
