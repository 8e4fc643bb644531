use std::path::Path;

use thiserror::Error;

use crate::color::{BACKGROUND, Rgb};
use crate::ring::WHEEL_SIZE;

/// Errors raised while loading or checking the color wheel table. All of
/// them are fatal at startup: no trial may run against a defective wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    #[error("cannot read color wheel asset {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("color wheel asset is not a JSON array of RGB triples: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("color wheel must hold exactly {WHEEL_SIZE} rows, found {0}")]
    WrongLength(usize),
    #[error("color wheel rows {0} and {1} are identical, reverse lookup would be ambiguous")]
    DuplicateRow(usize, usize),
    #[error("color wheel row {0} equals the background gray")]
    BackgroundRow(usize),
}

/// The 360-row response wheel: one RGB triple per hue step, in ring order.
///
/// Construction checks the two properties scoring depends on. Every row is
/// distinct, so an exact reverse lookup names at most one hue, and no row
/// equals [`BACKGROUND`], so a background sample can never be mistaken for
/// a wheel color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorWheel {
    rows: Vec<Rgb>,
}

impl ColorWheel {
    pub fn from_rows(rows: Vec<Rgb>) -> Result<Self, WheelError> {
        if rows.len() != WHEEL_SIZE as usize {
            return Err(WheelError::WrongLength(rows.len()));
        }
        for (i, row) in rows.iter().enumerate() {
            if *row == BACKGROUND {
                return Err(WheelError::BackgroundRow(i));
            }
            for (j, other) in rows.iter().enumerate().skip(i + 1) {
                if row == other {
                    return Err(WheelError::DuplicateRow(i, j));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Reads the JSON asset shipped with the experiment, a 360-element
    /// array of `[r, g, b]` rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WheelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| WheelError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let rows: Vec<Rgb> = serde_json::from_slice(&bytes)?;
        Self::from_rows(rows)
    }

    /// Color at a ring position. Indexes wrap around the ring, which is what
    /// rotated wheel drawing relies on.
    pub fn color(&self, index: u16) -> Rgb {
        self.rows[(index % WHEEL_SIZE) as usize]
    }

    /// Exact-match reverse lookup of a sampled color. `None` means the
    /// triple appears nowhere in the table.
    pub fn position_of(&self, color: Rgb) -> Option<u16> {
        self.rows.iter().position(|row| *row == color).map(|i| i as u16)
    }

    /// Rows in ring order, for collaborators that rasterize the wheel.
    pub fn rows(&self) -> &[Rgb] {
        &self.rows
    }
}
