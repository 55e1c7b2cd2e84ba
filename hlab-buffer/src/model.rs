#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBuffer {
    pub cursor: Cursor,
    pub lines: Vec<BufferLine>,
    pub multiline: bool,
}

impl TextBuffer {
    pub fn new(multiline: bool) -> Self {
        Self {
            multiline,
            ..Default::default()
        }
    }

    pub fn with_content(content: &str, multiline: bool) -> Self {
        let mut buffer = Self::new(multiline);
        buffer.set_content(content);
        buffer
    }

    /// Replaces all lines and moves the cursor to the start. Single line
    /// buffers join line breaks with a space.
    pub fn set_content(&mut self, content: &str) {
        self.lines = if self.multiline {
            content.lines().map(BufferLine::from).collect()
        } else {
            let joined = content.lines().collect::<Vec<_>>().join(" ");
            vec![BufferLine::from(joined.as_str())]
        };

        self.cursor = Cursor::default();
    }

    pub fn content(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.content.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cursor {
    pub horizontal_index: CursorPosition,
    pub vertical_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CursorPosition {
    Absolute { current: usize, expanded: usize },
    End,
}

impl Default for CursorPosition {
    fn default() -> Self {
        CursorPosition::Absolute {
            current: 0,
            expanded: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BufferLine {
    pub content: String,
}

impl BufferLine {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or(self.content.len())
    }
}

impl From<&str> for BufferLine {
    fn from(value: &str) -> Self {
        Self {
            content: value.to_owned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn content_round_trips_lines() {
        let buffer = TextBuffer::with_content("#!/bin/bash\necho hi", true);

        assert_eq!(buffer.lines.len(), 2);
        assert_eq!(buffer.content(), "#!/bin/bash\necho hi");
    }

    #[test]
    fn single_line_buffer_joins_line_breaks() {
        let buffer = TextBuffer::with_content("a\nb", false);

        assert_eq!(buffer.lines.len(), 1);
        assert_eq!(buffer.content(), "a b");
    }

    #[test]
    fn whitespace_only_is_blank() {
        let buffer = TextBuffer::with_content("  \n\t", true);
        assert!(buffer.is_blank());
        assert!(TextBuffer::new(false).is_blank());
    }

    #[test]
    fn byte_index_respects_multibyte_chars() {
        let line = BufferLine::from("äbc");
        assert_eq!(line.byte_index(1), 2);
        assert_eq!(line.byte_index(10), 4);
    }
}
