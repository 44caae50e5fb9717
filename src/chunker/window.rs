use crate::config::ConfigError;

/// One overlapping slice of the document, sent to the oracle for boundary
/// hints. Offsets are byte offsets into the original text, always on UTF-8
/// character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn text<'a>(&self, full_text: &'a str) -> &'a str {
        &full_text[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Slice `text` into overlapping windows of `size` bytes with consecutive
/// stride `size - overlap`. The final window is clipped to the end of the
/// text and may be shorter; iteration stops once a window reaches the end.
///
/// Rejects `size == 0` and `overlap >= size` up front: a non-advancing
/// stride would loop forever.
pub fn chunk(text: &str, size: usize, overlap: usize) -> Result<Vec<Window>, ConfigError> {
    if size == 0 {
        return Err(ConfigError::ZeroChunkSize);
    }
    if overlap >= size {
        return Err(ConfigError::OverlapTooLarge { size, overlap });
    }

    let mut windows = Vec::new();
    if text.is_empty() {
        return Ok(windows);
    }

    let stride = size - overlap;
    let mut start = 0;
    loop {
        let end = ceil_char_boundary(text, (start + size).min(text.len()));
        windows.push(Window { start, end });
        if end >= text.len() {
            break;
        }
        // Snapping forward guarantees the window always advances even when
        // the stride lands inside a multi-byte character.
        start = ceil_char_boundary(text, start + stride);
    }

    Ok(windows)
}

/// Smallest char boundary at or after `index`, clamped to the text length.
fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
