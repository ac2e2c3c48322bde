//! Minimal indented XML output.

/// Escape text for element content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds a document line by line, indenting two spaces per level.
#[derive(Debug, Default)]
pub struct XmlWriter {
    lines: Vec<String>,
    open: Vec<String>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&self) -> String {
        "  ".repeat(self.open.len())
    }

    /// Open `<tag>`; children go one level deeper until [`XmlWriter::end`].
    pub fn start(&mut self, tag: &str) -> &mut Self {
        self.lines.push(format!("{}<{}>", self.indent(), tag));
        self.open.push(tag.to_string());
        self
    }

    /// Close the innermost open element.
    pub fn end(&mut self) -> &mut Self {
        if let Some(tag) = self.open.pop() {
            self.lines.push(format!("{}</{}>", self.indent(), tag));
        }
        self
    }

    /// `<tag>text</tag>` on one line.
    pub fn text(&mut self, tag: &str, text: &str) -> &mut Self {
        self.lines
            .push(format!("{}<{}>{}</{}>", self.indent(), tag, escape(text), tag));
        self
    }

    /// A wrapper element holding one `<item>` per value. Empty lists render
    /// as `<tag />`.
    pub fn list<S: AsRef<str>>(&mut self, tag: &str, item: &str, values: &[S]) -> &mut Self {
        if values.is_empty() {
            self.lines.push(format!("{}<{} />", self.indent(), tag));
            return self;
        }
        self.start(tag);
        for value in values {
            self.text(item, value.as_ref());
        }
        self.end()
    }

    /// Close everything still open and return the document.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.end();
        }
        self.lines.join("\n")
    }
}
