//! Date filter entries.
//!
//! Date filters carry entries of the form `YYYY-MM-DD;after` or
//! `YYYY-MM-DD;before`. A set of two entries expresses a range.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;

/// Which side of the date an entry constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    After,
    Before,
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::After => write!(f, "after"),
            DateBound::Before => write!(f, "before"),
        }
    }
}

/// One parsed entry of a `start_date` or `target_date` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilterEntry {
    pub date: Date,
    pub bound: DateBound,
}

impl fmt::Display for DateFilterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.date, self.bound)
    }
}

impl FromStr for DateFilterEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, bound) = s
            .split_once(';')
            .ok_or_else(|| format!("'{s}' is not of the form YYYY-MM-DD;after|before"))?;

        let date: Date = date
            .trim()
            .parse()
            .map_err(|e| format!("'{date}' is not a calendar date: {e}"))?;

        let bound = match bound.trim().to_lowercase().as_str() {
            "after" => DateBound::After,
            "before" => DateBound::Before,
            other => return Err(format!("unknown date bound '{other}'")),
        };

        Ok(DateFilterEntry { date, bound })
    }
}
