use std::collections::HashSet;

/// Normalize a single line under the equality policy.
///
/// Two lines are considered the same when their trimmed, lowercased forms are
/// equal. Leading/trailing whitespace and letter case never count as a
/// difference.
#[must_use]
pub fn normalize_line(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Compare two lines under the equality policy.
#[must_use]
pub fn lines_equal(a: &str, b: &str) -> bool {
    normalize_line(a) == normalize_line(b)
}

/// A text body split into lines.
///
/// Line endings are canonicalized before splitting: `\r\n` and lone `\r`
/// both become `\n`. A single trailing line feed terminates the last line and
/// does not open an extra empty one, so `"a\nb\n"` and `"a\nb"` are the same
/// two-line document. Empty interior lines are kept as zero-length entries.
/// Line content is stored raw, without trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    /// Raw line contents, in order.
    lines: Vec<String>,
}

impl TextDocument {
    /// Split `text` into a document. The empty string yields zero lines.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let canonical = text.replace("\r\n", "\n").replace('\r', "\n");
        let body = canonical.strip_suffix('\n').unwrap_or(&canonical);
        let lines = body.split('\n').map(str::to_owned).collect();

        Self { lines }
    }

    /// All lines in document order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line at zero-based `index`, if present.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// True for a zero-line document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whole-document normalized form: every line normalized, joined by `\n`.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.lines
            .iter()
            .map(|line| normalize_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Set of normalized lines, used for membership tests.
    #[must_use]
    pub fn line_set(&self) -> LineSet {
        LineSet::from_lines(&self.lines)
    }
}

/// Normalized lines of one document, for membership queries.
#[derive(Debug, Clone, Default)]
pub struct LineSet {
    /// Distinct normalized lines.
    members: HashSet<String>,
    /// Distinct non-empty normalized lines in first-seen order.
    ///
    /// Substring scans walk this instead of the hash set so that results never
    /// depend on hash iteration order.
    ordered: Vec<String>,
}

impl LineSet {
    /// Build a set from raw lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut members = HashSet::with_capacity(lines.len());
        let mut ordered = Vec::with_capacity(lines.len());

        for line in lines {
            let normalized = normalize_line(line.as_ref());
            if members.insert(normalized.clone()) && !normalized.is_empty() {
                ordered.push(normalized);
            }
        }

        Self { members, ordered }
    }

    /// Exact membership of `line` under the equality policy.
    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.members.contains(&normalize_line(line))
    }

    /// Exact membership of an already normalized line.
    #[must_use]
    pub fn contains_normalized(&self, normalized: &str) -> bool {
        self.members.contains(normalized)
    }

    /// True if some non-empty member contains `normalized` or is contained by it.
    ///
    /// Empty strings never match here; they only take part in exact matching.
    #[must_use]
    pub fn overlaps_normalized(&self, normalized: &str) -> bool {
        if normalized.is_empty() {
            return false;
        }
        self.ordered
            .iter()
            .any(|member| member.contains(normalized) || normalized.contains(member.as_str()))
    }

    /// Number of distinct normalized lines (including the empty line, if any).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the source document had no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
