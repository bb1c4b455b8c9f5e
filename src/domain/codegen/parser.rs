//! Splits a raw generated-text blob into named files.

use indexmap::IndexMap;

/// Marker lines that delimit one file inside generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMarkers {
    /// A line starting with this text opens a block. The rest of the line,
    /// trimmed, is the filename.
    pub begin: String,
    /// A line equal to this text (ignoring trailing whitespace) closes a block.
    pub end: String,
}

impl BlockMarkers {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Markdown-style fences: "```filename: app.py" ... "```".
    pub fn fenced() -> Self {
        Self::new("```filename:", "```")
    }
}

impl Default for BlockMarkers {
    fn default() -> Self {
        Self::new("begin-block:", "end-block")
    }
}

/// Turns generated text into an ordered filename -> content mapping.
///
/// Rules:
/// - content is the lines strictly between the markers, joined with `\n`
/// - a begin marker flushes any block still open
/// - a block still open at end of input is flushed, not dropped
/// - an end marker with no open block is ignored
/// - text outside blocks is discarded
/// - a repeated filename replaces the earlier entry and takes the later position
#[derive(Debug, Clone, Default)]
pub struct CodeBlockParser {
    markers: BlockMarkers,
}

impl CodeBlockParser {
    pub fn new(markers: BlockMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &BlockMarkers {
        &self.markers
    }

    pub fn parse(&self, raw: &str) -> IndexMap<String, String> {
        let mut files = IndexMap::new();
        let mut open: Option<(String, Vec<&str>)> = None;

        for line in raw.lines() {
            if let Some(filename) = self.begin_filename(line) {
                if let Some((name, lines)) = open.take() {
                    insert_latest(&mut files, name, lines);
                }
                open = Some((filename.to_string(), Vec::new()));
            } else if line.trim_end() == self.markers.end {
                if let Some((name, lines)) = open.take() {
                    insert_latest(&mut files, name, lines);
                }
            } else if let Some((_, lines)) = open.as_mut() {
                lines.push(line);
            }
        }

        if let Some((name, lines)) = open {
            insert_latest(&mut files, name, lines);
        }

        files
    }

    fn begin_filename<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.strip_prefix(self.markers.begin.as_str())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

fn insert_latest(files: &mut IndexMap<String, String>, name: String, lines: Vec<&str>) {
    files.shift_remove(&name);
    files.insert(name, lines.join("\n"));
}
