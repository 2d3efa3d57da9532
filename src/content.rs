//! Line-indexed view of a file's decoded text.

/// Terminator that followed a line in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// Final line without a trailing newline.
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    ending: LineEnding,
}

/// Ordered sequence of text lines, mutable only by whole-line replacement.
///
/// Line count and ordering never change after construction; terminators are
/// kept per line so [`render`](Self::render) reproduces untouched input
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndexedContent {
    lines: Vec<Line>,
}

impl LineIndexedContent {
    /// Split decoded text into lines, remembering each terminator.
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut rest = text;

        while let Some(idx) = rest.find('\n') {
            let raw = &rest[..idx];
            let line = match raw.strip_suffix('\r') {
                Some(stripped) => Line {
                    text: stripped.to_string(),
                    ending: LineEnding::CrLf,
                },
                None => Line {
                    text: raw.to_string(),
                    ending: LineEnding::Lf,
                },
            };
            lines.push(line);
            rest = &rest[idx + 1..];
        }

        if !rest.is_empty() {
            lines.push(Line {
                text: rest.to_string(),
                ending: LineEnding::None,
            });
        }

        Self { lines }
    }

    /// Wrap an already-split line sequence.
    ///
    /// Lines are joined with `\n` on render, with no newline after the last one.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<Line> = lines
            .into_iter()
            .map(|text| Line {
                text: text.into(),
                ending: LineEnding::Lf,
            })
            .collect();
        if let Some(last) = lines.last_mut() {
            last.ending = LineEnding::None;
        }
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the line at a 0-based index, without its terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.text.as_str())
    }

    pub fn line_ending(&self, index: usize) -> Option<LineEnding> {
        self.lines.get(index).map(|l| l.ending)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Replace the text of one line, keeping its terminator.
    ///
    /// Returns the previous text, or `None` (and changes nothing) when the
    /// index is out of range. Embedded newlines would split the line, so
    /// such replacements are refused as well.
    pub fn replace_line(&mut self, index: usize, text: String) -> Option<String> {
        if text.contains('\n') {
            return None;
        }
        let line = self.lines.get_mut(index)?;
        Some(std::mem::replace(&mut line.text, text))
    }

    /// Reassemble the full text.
    pub fn render(&self) -> String {
        let len = self
            .lines
            .iter()
            .map(|l| l.text.len() + l.ending.as_str().len())
            .sum();
        let mut out = String::with_capacity(len);
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.ending.as_str());
        }
        out
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_iter().map(|l| l.text).collect()
    }
}
