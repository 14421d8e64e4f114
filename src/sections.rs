use crate::prelude::*;

// `conda search --info` output is a series of blocks, one per resolved
// package version:
//
//   numpy 1.24.2 py310h8e6c178_0
//   -----------------------------
//   file name   : numpy-1.24.2-py310h8e6c178_0.conda
//   ...
//   subdir      : win-64
//   dependencies:
//     - python >=3.10,<3.11.0a0
//
//   scipy 1.10.0 ...
//
// There is no machine-readable framing: a header is any non-empty line whose
// *next* line is nothing but dashes. We scan with a two-state machine over a
// line cursor. While inside a section, seeing a separator two lines ahead
// means the line immediately ahead is the next header, which closes the
// current section. Body lines are stored trimmed with blanks dropped.
//
// Note the closing rule drops the body line sitting right before the next
// header. In practice that line is the blank between blocks, and keeping the
// rule exact keeps us bit-for-bit compatible with what conda emits.

const NO_MATCH_MARKER: &str = "No match found for:";

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-+$").unwrap());

fn is_separator(line: &str) -> bool {
    SEPARATOR.is_match(line.trim())
}

/// One per-version metadata block, with the header and separator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    lines: Vec<String>,
}

impl Section {
    #[cfg(test)]
    pub fn from_lines(lines: Vec<String>) -> Section {
        Section { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Platform tokens from `subdir` lines, truncated at the first hyphen
    /// ("win-64" -> "win"). Empty when the block carries no subdir at all.
    pub fn subdirs(&self) -> HashSet<&str> {
        self.lines
            .iter()
            .filter(|line| line.starts_with("subdir"))
            .filter_map(|line| line.split_once(':'))
            .map(|(_, value)| value.trim().split('-').next().unwrap_or("").trim())
            .collect()
    }

    /// Package names from the block's `dependencies:` list: the first word of
    /// each `- `-prefixed line, stopping at the first line that isn't one.
    pub fn dependency_tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        let mut collecting = false;
        for line in &self.lines {
            if line.starts_with("dependencies:") {
                collecting = true;
                continue;
            }
            if collecting {
                match line.strip_prefix("- ") {
                    Some(rest) => {
                        tokens.push(rest.trim().split_whitespace().next().unwrap_or(""))
                    }
                    None => break,
                }
            }
        }
        tokens
    }
}

enum State {
    Scanning,
    InSection(Vec<String>),
}

/// Split one platform's raw query output into the sections whose header names
/// the queried package. Sections come back in document order, never split or
/// merged; blocks for other packages are skipped without collecting them.
pub fn split_sections(raw: &str, name: &str) -> Vec<Section> {
    let lines: Vec<&str> = raw.trim().lines().collect();
    if lines.len() < 2 {
        return Vec::new();
    }
    if lines[1].contains(NO_MATCH_MARKER) {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut state = State::Scanning;
    let mut i = 0;
    while i < lines.len() {
        state = match state {
            State::Scanning => {
                let header = !lines[i].trim().is_empty()
                    && i + 1 < lines.len()
                    && is_separator(lines[i + 1]);
                if header
                    && lines[i].trim().split_whitespace().next() == Some(name)
                {
                    // body starts past the separator
                    i += 2;
                    State::InSection(Vec::new())
                } else {
                    i += 1;
                    State::Scanning
                }
            }
            State::InSection(mut body) => {
                if i + 2 < lines.len() && is_separator(lines[i + 2]) {
                    // next header is one line ahead; close here
                    sections.push(Section { lines: body });
                    i += 1;
                    State::Scanning
                } else {
                    let trimmed = lines[i].trim();
                    if !trimmed.is_empty() {
                        body.push(trimmed.to_owned());
                    }
                    i += 1;
                    State::InSection(body)
                }
            }
        };
    }
    if let State::InSection(body) = state {
        sections.push(Section { lines: body });
    }
    sections
}
