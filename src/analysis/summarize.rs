//! Extractive summarization of normalized post bodies.
//!
//! [`summarize`] parses the body once into an [`AnalyzedText`] and hands it to
//! five independent extractors:
//!
//! | Extractor | Output | Cap |
//! |-----------|--------|-----|
//! | [`summary_text`] | intro + second sentence, one example, one metric | 1000 chars |
//! | [`key_points`] | bullets, then headings, then example/metric sentences | 8 |
//! | [`data_points`] | sentences carrying quantitative results | 5 |
//! | [`examples`] | example lines with up to two lines of context | 3 |
//! | [`takeaways`] | bullets under a conclusion, else action sentences | 5 |
//!
//! Every extractor scans in document order and keeps the first matches.

use crate::analysis::lines::{NormalizedLine, parse_lines};
use crate::models::SummaryBundle;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::iter;

pub const SUMMARY_MAX_CHARS: usize = 1000;
pub const MAX_KEY_POINTS: usize = 8;
pub const MAX_DATA_POINTS: usize = 5;
pub const MAX_EXAMPLES: usize = 3;
pub const MAX_TAKEAWAYS: usize = 5;

static TRAILING_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());

static SUMMARY_EXAMPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)for example|e\.g\.|example|case study|case in point").unwrap());

static EXAMPLE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)for example|e\.g\.|example|case study:?|case in point|such as|use case:")
        .unwrap()
});

static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\d+(?:\.\d+)?\s?%",
        r"|\b\d+(?:\.\d+)?\s*(?:ms|milliseconds?|seconds?|secs?|minutes?|mins?|hours?|days?|weeks?|months?|x)\s+(?:faster|slower|less|more|fewer|quicker|sooner)\b",
        r"|\b\d[\d,]*(?:\.\d+)?\s*(?:k|m|b|thousand|million|billion)?\+?\s+(?:users|customers|companies|teams|events|requests|experiments|queries|engineers|developers)\b",
        r"|\b(?:improve[sd]?|improving|reduce[sd]?|reducing|increase[sd]?|increasing|decrease[sd]?|decreasing|boost(?:s|ed|ing)?)\b",
    ))
    .unwrap()
});

static DATA_POINT_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // percentage change
        r"(?i)\d+(?:\.\d+)?\s?%\s+(?:increase|decrease|improvement|reduction|lift|growth|drop|gain|faster|slower|more|less|fewer)\b|\b(?:increase|decrease|improvement|reduction|lift|growth|drop|gain)\s+of\s+\d+(?:\.\d+)?\s?%",
        // count with magnitude + domain noun
        r"(?i)\b\d+(?:\.\d+)?\s*(?:k|m|b|thousand|million|billion|trillion)\+?\s+(?:users|customers|companies|teams|events|requests|experiments|queries|rows|records|developers|engineers|sessions|flags)\b",
        // reduced/improved ... by N%
        r"(?i)\b(?:reduced|improved|increased|decreased|cut|boosted|lowered|raised|dropped)\b(?:\s+\S+){0,3}?\s+by\s+\d+(?:\.\d+)?\s?%",
        // time duration comparative
        r"(?i)\b\d+(?:\.\d+)?\s*(?:ms|milliseconds?|seconds?|minutes?|hours?|days?|weeks?|months?)\s+(?:faster|slower|quicker|sooner|less|shorter|longer|earlier)\b",
        // from N to N
        r"(?i)\bfrom\s+\$?\d[\d,.]*\s*\S*\s+to\s+\$?\d",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static CONCLUSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)conclusion|takeaway|summary|key insight|lesson learned|in summary").unwrap()
});

static ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bshould\b|\bmust\b|recommend|best practice|important to|key is to|make sure")
        .unwrap()
});

/// A sentence and the line it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    /// Index into [`AnalyzedText::lines`].
    pub line: usize,
    pub from_heading: bool,
}

/// Body text parsed once for all extractors.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedText {
    pub lines: Vec<NormalizedLine>,
    pub sentences: Vec<Sentence>,
}

impl AnalyzedText {
    pub fn new(body_text: &str) -> Self {
        let cleaned = body_text.replace('\u{a0}', " ");
        let cleaned = TRAILING_WS_RE.replace_all(&cleaned, "\n");

        let lines = parse_lines(&cleaned);
        let sentences = lines
            .iter()
            .enumerate()
            .flat_map(|(idx, line)| {
                split_sentences(line.text())
                    .into_iter()
                    .map(move |text| Sentence {
                        text,
                        line: idx,
                        from_heading: line.is_heading(),
                    })
            })
            .collect();

        Self { lines, sentences }
    }

    fn body_sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter().filter(|s| !s.from_heading)
    }

    fn first_example_sentence(&self) -> Option<&str> {
        self.body_sentences()
            .map(|s| s.text.as_str())
            .find(|s| SUMMARY_EXAMPLE_RE.is_match(s))
    }

    fn first_metric_sentence(&self) -> Option<&str> {
        self.body_sentences()
            .map(|s| s.text.as_str())
            .find(|s| METRIC_RE.is_match(s))
    }
}

/// Summarize a post body.
pub fn summarize(body_text: &str, title: &str) -> SummaryBundle {
    let text = AnalyzedText::new(body_text);
    let bundle = SummaryBundle {
        summary: summary_text(&text, title),
        key_points: key_points(&text),
        data_points: data_points(&text),
        examples: examples(&text),
        takeaways: takeaways(&text),
    };
    tracing::debug!(
        key_points = bundle.key_points.len(),
        data_points = bundle.data_points.len(),
        examples = bundle.examples.len(),
        takeaways = bundle.takeaways.len(),
        "Summarized post"
    );
    bundle
}

/// Intro and second sentence, then one example and one metric sentence.
pub fn summary_text(text: &AnalyzedText, title: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut selected: Vec<&str> = Vec::new();

    let mut long_sentences = text
        .body_sentences()
        .map(|s| s.text.as_str())
        .filter(|s| char_len(s) > 40);

    if let Some(intro) = long_sentences.next() {
        selected.push(intro);
        parts.push(intro.to_string());
        if let Some(second) = long_sentences.find(|s| *s != intro) {
            selected.push(second);
            parts.push(second.to_string());
        }
    }

    if let Some(example) = text
        .body_sentences()
        .map(|s| s.text.as_str())
        .find(|s| !selected.contains(s) && SUMMARY_EXAMPLE_RE.is_match(s))
    {
        selected.push(example);
        parts.push(format!("Example: {example}"));
    }

    if let Some(metric) = text
        .body_sentences()
        .map(|s| s.text.as_str())
        .find(|s| !selected.contains(s) && METRIC_RE.is_match(s))
    {
        parts.push(metric.to_string());
    }

    if parts.is_empty() {
        return format!("Article about {title}");
    }
    truncate_chars(&parts.join(" "), SUMMARY_MAX_CHARS)
}

/// Bullets, then headings, then the example and metric sentences.
pub fn key_points(text: &AnalyzedText) -> Vec<String> {
    let bullets = text
        .lines
        .iter()
        .filter(|l| l.is_bullet())
        .map(|l| l.text().to_string())
        // 15, not 25: short metric bullets like "Latency dropped 40%" must survive
        .filter(|t| (15..=180).contains(&char_len(t)));

    let headings = text
        .lines
        .iter()
        .filter(|l| l.is_heading())
        .map(|l| l.text().to_string())
        .filter(|t| (15..=120).contains(&char_len(t)));

    let fallbacks = text
        .first_example_sentence()
        .map(|s| format!("Example: {s}"))
        .into_iter()
        .chain(text.first_metric_sentence().map(str::to_string));

    bullets
        .chain(headings)
        .chain(fallbacks)
        .unique_by(|p| p.to_lowercase())
        .take(MAX_KEY_POINTS)
        .collect()
}

/// Sentences reporting quantitative results.
pub fn data_points(text: &AnalyzedText) -> Vec<String> {
    text.sentences
        .iter()
        .map(|s| s.text.as_str())
        .filter(|s| char_len(s) < 200 && DATA_POINT_RES.iter().any(|re| re.is_match(s)))
        .unique()
        .take(MAX_DATA_POINTS)
        .map(str::to_string)
        .collect()
}

/// Example lines joined with up to two following non-heading lines.
///
/// The window starts at the first sentence of the matching line that carries
/// the indicator, so preceding unrelated sentences are not included.
pub fn examples(text: &AnalyzedText) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for (idx, line) in text.lines.iter().enumerate() {
        if found.len() >= MAX_EXAMPLES {
            break;
        }
        if !EXAMPLE_LINE_RE.is_match(line.text()) {
            continue;
        }

        let anchor = text
            .sentences
            .iter()
            .filter(|s| s.line == idx)
            .skip_while(|s| !EXAMPLE_LINE_RE.is_match(&s.text))
            .map(|s| s.text.as_str())
            .join(" ");
        let anchor = if anchor.is_empty() {
            line.text().to_string()
        } else {
            anchor
        };

        let window = iter::once(anchor.as_str())
            .chain(
                text.lines
                    .iter()
                    .skip(idx + 1)
                    .take(2)
                    .filter(|l| !l.is_heading())
                    .map(NormalizedLine::text),
            )
            .join(" ");

        if (50..=300).contains(&char_len(&window)) && !found.contains(&window) {
            found.push(window);
        }
    }
    found
}

/// Bullets under a conclusion-style section, topped up with action sentences.
pub fn takeaways(text: &AnalyzedText) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut in_conclusion = false;

    for line in &text.lines {
        if found.len() >= MAX_TAKEAWAYS {
            break;
        }
        if CONCLUSION_RE.is_match(line.text()) {
            in_conclusion = true;
            continue;
        }
        if line.is_heading() {
            in_conclusion = false;
            continue;
        }
        if in_conclusion && line.is_bullet() {
            let t = line.text();
            if (30..=200).contains(&char_len(t)) && !found.iter().any(|f| f == t) {
                found.push(t.to_string());
            }
        }
    }

    if found.len() < 3 {
        for sentence in &text.sentences {
            if found.len() >= MAX_TAKEAWAYS {
                break;
            }
            let s = sentence.text.as_str();
            if (40..=200).contains(&char_len(s))
                && ACTION_RE.is_match(s)
                && !found.iter().any(|f| f == s)
            {
                found.push(s.to_string());
            }
        }
    }
    found
}

/// Split after `.`, `!` or `?` when followed by whitespace, keeping the
/// punctuation and dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                let piece = text[start..idx + c.len_utf8()].trim();
                if !piece.is_empty() {
                    sentences.push(piece.to_string());
                }
                start = next_idx;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, max: usize) -> String {
    if char_len(s) <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect::<String>().trim_end().to_string()
    }
}
