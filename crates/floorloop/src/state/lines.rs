//! Editable line table: the rows the user types or pastes.

use shared::{LineRow, ObjectId, Segment};

use crate::paste::parse_tab_separated;

/// Rows added by one paste
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasteReport {
    pub added: Vec<ObjectId>,
    pub skipped: usize,
}

/// Ordered table of endpoint rows
#[derive(Debug, Clone, Default)]
pub struct LineTableState {
    pub rows: Vec<LineRow>,
}

impl LineTableState {
    /// Append a row and return its ID
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ObjectId {
        let id = uuid::Uuid::new_v4().to_string();
        self.rows.push(LineRow::new(id.clone(), x1, y1, x2, y2));
        id
    }

    /// Remove a row by ID
    pub fn remove_line(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Append every parseable row of tab-separated text
    pub fn paste(&mut self, text: &str) -> PasteReport {
        let summary = parse_tab_separated(text);
        let added = summary
            .segments
            .iter()
            .map(|s| self.add_line(s.start.x, s.start.y, s.end.x, s.end.y))
            .collect::<Vec<_>>();
        tracing::info!("Pasted {} lines ({} skipped)", added.len(), summary.skipped);
        PasteReport {
            added,
            skipped: summary.skipped,
        }
    }

    pub fn get(&self, id: &str) -> Option<&LineRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// All rows as segments, placeholders included
    pub fn segments(&self) -> Vec<Segment> {
        self.rows.iter().map(LineRow::to_segment).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of non-placeholder rows
    pub fn valid_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_valid()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut t = LineTableState::default();
        let a = t.add_line(0.0, 0.0, 1.0, 0.0);
        let b = t.add_line(1.0, 0.0, 1.0, 1.0);
        assert_ne!(a, b);
        assert_eq!(t.len(), 2);
        assert!(t.remove_line(&a));
        assert!(!t.remove_line(&a));
        assert_eq!(t.len(), 1);
        assert!(t.get(&b).is_some());
    }

    #[test]
    fn test_valid_count_ignores_placeholders() {
        let mut t = LineTableState::default();
        t.add_line(0.0, 0.0, 0.0, 0.0);
        t.add_line(0.0, 0.0, 2.0, 0.0);
        assert_eq!(t.len(), 2);
        assert_eq!(t.valid_count(), 1);
        assert_eq!(t.segments().len(), 2);
    }

    #[test]
    fn test_paste_appends_rows() {
        let mut t = LineTableState::default();
        t.add_line(5.0, 5.0, 6.0, 6.0);
        let report = t.paste("0\t0\t10\t0\nbad\n10\t0\t10\t10");
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(t.len(), 3);
        assert_eq!(t.rows[1].x2, 10.0);
    }

    #[test]
    fn test_clear() {
        let mut t = LineTableState::default();
        t.add_line(0.0, 0.0, 1.0, 1.0);
        t.clear();
        assert!(t.is_empty());
    }
}
