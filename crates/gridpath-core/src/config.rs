//! Grid configuration handed over by a presentation layer.

use crate::error::GridError;

/// Dimensions of a square grid.
///
/// `cell_width` is a pixel size that the core only uses to derive each
/// cell's `x`/`y` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of rows, which is also the number of columns.
    pub rows: i32,
    pub cell_width: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cell_width: 20,
        }
    }
}

impl GridConfig {
    /// Config for a grid of `rows × rows` cells.
    pub const fn new(rows: i32, cell_width: i32) -> Self {
        Self { rows, cell_width }
    }

    /// Config for a window of `window_width` pixels split into `rows`
    /// rows; the cell width is the integer quotient.
    pub fn for_window(rows: i32, window_width: i32) -> Result<Self, GridError> {
        if rows < 1 {
            return Err(GridError::InvalidConfig(format!(
                "rows must be at least 1, got {rows}"
            )));
        }
        let cfg = Self::new(rows, window_width / rows);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that both dimensions are at least 1 and that the last cell's
    /// pixel offset fits in an `i32`.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows < 1 {
            return Err(GridError::InvalidConfig(format!(
                "rows must be at least 1, got {}",
                self.rows
            )));
        }
        if self.cell_width < 1 {
            return Err(GridError::InvalidConfig(format!(
                "cell width must be at least 1, got {}",
                self.cell_width
            )));
        }
        if (self.rows - 1).checked_mul(self.cell_width).is_none() {
            return Err(GridError::InvalidConfig(format!(
                "{} rows of {} px overflow pixel coordinates",
                self.rows, self.cell_width
            )));
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = GridConfig::new(25, 32);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"rows": 12}"#).unwrap();
        assert_eq!(cfg.rows, 12);
        assert_eq!(cfg.cell_width, GridConfig::default().cell_width);
    }
}
