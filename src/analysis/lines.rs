//! The line-structured body text shared by the extractor and the summarizer.
//!
//! The extractor emits a sequence of [`NormalizedLine`]s and stores them as
//! newline-joined marked strings (`## Heading`, `- bullet`, plain text). The
//! summarizer reads them back with [`NormalizedLine::parse`]. Both directions
//! go through this module so the marker convention exists in one place.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Heading levels the extractor emits (`h2`–`h4`).
pub const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 2..=4;

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•]|\d+[.)])\s+(.*)$").expect("valid bullet regex"));

/// One line of normalized body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedLine {
    Plain(String),
    Heading { level: u8, text: String },
    Bullet(String),
}

impl NormalizedLine {
    /// Parse one line of marked text.
    ///
    /// `##`, `###` or `####` followed by a space is a heading. `-`, `*`, `•`,
    /// `N.` or `N)` followed by whitespace is a bullet. Anything else,
    /// including `#` and `#####`, is plain text. Input is trimmed first.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        let hashes = line.bytes().take_while(|b| *b == b'#').count();
        if let Some(level) = u8::try_from(hashes).ok().filter(|l| HEADING_LEVELS.contains(l)) {
            if let Some(rest) = line[hashes..].strip_prefix(' ') {
                let text = rest.trim();
                if !text.is_empty() {
                    return Self::Heading {
                        level,
                        text: text.to_string(),
                    };
                }
            }
        }

        if let Some(caps) = BULLET_RE.captures(line) {
            let text = caps[1].trim();
            if !text.is_empty() {
                return Self::Bullet(text.to_string());
            }
        }

        Self::Plain(line.to_string())
    }

    /// The line's text with any marker removed.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bullet(text) => text,
            Self::Heading { text, .. } => text,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading { .. })
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Self::Bullet(_))
    }
}

impl fmt::Display for NormalizedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(text) => f.write_str(text),
            Self::Heading { level, text } => {
                write!(f, "{} {}", "#".repeat(*level as usize), text)
            }
            Self::Bullet(text) => write!(f, "- {text}"),
        }
    }
}

/// Join lines into the newline-separated body text stored on an article.
pub fn render_lines(lines: &[NormalizedLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split body text into parsed, non-empty lines.
pub fn parse_lines(text: &str) -> Vec<NormalizedLine> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(NormalizedLine::parse)
        .collect()
}
