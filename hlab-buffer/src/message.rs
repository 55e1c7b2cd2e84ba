#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BufferMessage {
    Modification(usize, TextModification),
    MoveCursor(usize, CursorDirection),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TextModification {
    DeleteCharBeforeCursor,
    DeleteCharOnCursor,
    DeleteLine,
    Insert(String),
    InsertLineBreak,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CursorDirection {
    Bottom,
    Down,
    Left,
    LineEnd,
    LineStart,
    Right,
    Top,
    Up,
}
