//! Grid layout of the plot page.

use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// How plots are arranged into rows.
///
/// `Dynamic(n)` fills rows of `n` columns and grows as plots are added.
/// `Fixed(rows)` gives the column count of every row and caps the number of plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSpec {
    Dynamic(usize),
    Fixed(Vec<usize>),
}

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec::Dynamic(2)
    }
}

impl GridSpec {
    /// Maximum number of plots, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            GridSpec::Dynamic(_) => None,
            GridSpec::Fixed(rows) => Some(rows.iter().sum()),
        }
    }

    pub fn validate(&self) -> Result<(), PlotError> {
        match self {
            GridSpec::Dynamic(0) => Err(PlotError::InvalidGrid),
            _ => Ok(()),
        }
    }

    /// Column count per row for `plots` plots.
    pub fn layout(&self, plots: usize) -> Result<Vec<usize>, PlotError> {
        self.validate()?;
        match self {
            GridSpec::Dynamic(columns) => Ok(vec![*columns; plots.div_ceil(*columns)]),
            GridSpec::Fixed(rows) => {
                if rows.iter().sum::<usize>() < plots {
                    return Err(PlotError::GridCapacity {
                        plots,
                        grid: rows.clone(),
                    });
                }
                Ok(rows.clone())
            }
        }
    }
}

impl From<usize> for GridSpec {
    fn from(columns: usize) -> Self {
        GridSpec::Dynamic(columns)
    }
}

impl From<Vec<usize>> for GridSpec {
    fn from(rows: Vec<usize>) -> Self {
        GridSpec::Fixed(rows)
    }
}

impl<const N: usize> From<[usize; N]> for GridSpec {
    fn from(rows: [usize; N]) -> Self {
        GridSpec::Fixed(rows.to_vec())
    }
}
