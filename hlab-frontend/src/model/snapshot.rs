use chrono::{DateTime, Local};

/// Last known state of a single backend read. Replaced on every result.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshot<T> {
    Loading,
    Ready { payload: T, at: DateTime<Local> },
    Failed { reason: String, at: DateTime<Local> },
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Snapshot::Loading
    }
}

impl<T> Snapshot<T> {
    pub fn from_result(result: Result<T, String>) -> Self {
        let at = Local::now();
        match result {
            Ok(payload) => Snapshot::Ready { payload, at },
            Err(reason) => Snapshot::Failed { reason, at },
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Snapshot::Ready { payload, .. } => Some(payload),
            Snapshot::Loading | Snapshot::Failed { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Snapshot::Failed { reason, .. } => Some(reason),
            Snapshot::Loading | Snapshot::Ready { .. } => None,
        }
    }

    pub fn at(&self) -> Option<&DateTime<Local>> {
        match self {
            Snapshot::Ready { at, .. } | Snapshot::Failed { at, .. } => Some(at),
            Snapshot::Loading => None,
        }
    }
}

/// Selectable rows backed by a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<T> {
    pub rows: Snapshot<Vec<T>>,
    pub cursor: usize,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Snapshot::default(),
            cursor: 0,
        }
    }
}

impl<T> Table<T> {
    pub fn len(&self) -> usize {
        self.rows.payload().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selected(&self) -> Option<&T> {
        self.rows.payload().and_then(|rows| rows.get(self.cursor))
    }

    pub fn replace(&mut self, result: Result<Vec<T>, String>) {
        self.rows = Snapshot::from_result(result);
        self.cursor = self.cursor.min(self.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.len() {
            self.cursor += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replace_clamps_cursor_to_new_rows() {
        let mut table = Table::default();
        table.replace(Ok(vec![1, 2, 3]));
        table.select_last();
        assert_eq!(table.selected(), Some(&3));

        table.replace(Ok(vec![1]));
        assert_eq!(table.cursor, 0);
        assert_eq!(table.selected(), Some(&1));
    }

    #[test]
    fn failed_replace_keeps_no_rows() {
        let mut table: Table<u8> = Table::default();
        table.replace(Err("db down".to_owned()));

        assert!(table.is_empty());
        assert_eq!(table.rows.reason(), Some("db down"));
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn select_next_stops_at_end() {
        let mut table = Table::default();
        table.replace(Ok(vec!['a', 'b']));

        table.select_next();
        table.select_next();
        assert_eq!(table.cursor, 1);

        table.select_previous();
        table.select_previous();
        assert_eq!(table.cursor, 0);
    }
}
