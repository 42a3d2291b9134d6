use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic style of a cell. Colours and fonts belong to the renderer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Title,
    SectionHeader,
    Cell,
    Centered,
    Success,
    /// Compliance failures and `MISSING` markers.
    Failure,
    Warning,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub value: String,
    pub style: CellStyle,
}

/// Sparse, positioned cells for one month's report.
///
/// Rows and columns are zero-based. Ordered maps keep repeated builds
/// identical, including their serialized form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportGrid {
    pub sheet_name: String,
    pub column_widths: Vec<u16>,
    rows: BTreeMap<usize, BTreeMap<usize, GridCell>>,
}

impl ReportGrid {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            column_widths: Vec::new(),
            rows: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>, style: CellStyle) {
        self.rows.entry(row).or_default().insert(
            col,
            GridCell {
                value: value.into(),
                style,
            },
        );
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Number of rows, counting trailing-blank rows up to the last populated one.
    pub fn row_count(&self) -> usize {
        self.rows.keys().next_back().map(|r| r + 1).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        let populated = self
            .rows
            .values()
            .filter_map(|r| r.keys().next_back())
            .max()
            .map(|c| c + 1)
            .unwrap_or(0);
        populated.max(self.column_widths.len())
    }

    /// Populated cells of one row, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, &GridCell)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|r| r.iter().map(|(c, cell)| (*c, cell)))
    }

    /// Row index of the first cell in column 0 whose value equals `text`.
    pub fn find_row(&self, text: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|(_, cols)| cols.get(&0).map(|c| c.value == text).unwrap_or(false))
            .map(|(r, _)| *r)
    }

    /// Dense view with `None` for blank positions, used by renderers.
    pub fn to_matrix(&self) -> Vec<Vec<Option<&GridCell>>> {
        let cols = self.column_count();
        (0..self.row_count())
            .map(|r| (0..cols).map(|c| self.get(r, c)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_grid_dimensions() {
        let mut grid = ReportGrid::new("03-2024");
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);

        grid.set(0, 0, "Title", CellStyle::Title);
        grid.set(4, 2, "MISSING", CellStyle::Failure);

        assert_eq!(grid.row_count(), 5);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.get(4, 2).map(|c| c.style), Some(CellStyle::Failure));
        assert!(grid.get(2, 0).is_none());
        assert_eq!(grid.find_row("Title"), Some(0));

        let matrix = grid.to_matrix();
        assert_eq!(matrix.len(), 5);
        assert!(matrix[1].iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut grid = ReportGrid::new("03-2024");
        grid.column_widths = vec![30, 18];
        grid.set(1, 1, "Y", CellStyle::Success);

        let text = serde_json::to_string(&grid).unwrap();
        let back: ReportGrid = serde_json::from_str(&text).unwrap();
        assert_eq!(back, grid);
    }
}
