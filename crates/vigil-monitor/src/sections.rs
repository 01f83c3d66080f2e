//! Turns a free-form assessment into [`Assessment`] fields.
//!
//! A header line names one of the known labels, possibly behind a list
//! bullet or number and wrapped in markdown emphasis or heading markers,
//! followed by `:` or `-`. Its value
//! runs until the next header. Text with no header at all becomes the
//! summary.

use vigil_core::entities::Assessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Summary,
    PotentialImpact,
    Relevance,
    Severity,
    RecommendedActions,
}

const LABELS: [(&str, Field); 5] = [
    ("summary", Field::Summary),
    ("potential impact", Field::PotentialImpact),
    ("relevance", Field::Relevance),
    ("severity", Field::Severity),
    ("recommended actions", Field::RecommendedActions),
];

/// Parse assessment text. Never fails; unknown content is ignored.
#[must_use]
pub fn parse_sections(text: &str) -> Assessment {
    let normalized = text.replace('\r', "");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Assessment::default();
    }

    let mut sections: Vec<(Field, Vec<&str>)> = Vec::new();
    for line in normalized.lines() {
        if let Some((field, rest)) = header(line) {
            sections.push((field, vec![rest]));
        } else if let Some((_, body)) = sections.last_mut() {
            body.push(line);
        }
    }

    if sections.is_empty() {
        return Assessment {
            summary: normalized.to_string(),
            ..Assessment::default()
        };
    }

    let mut assessment = Assessment::default();
    for (field, body) in sections {
        let value = clean(&body.join("\n"));
        match field {
            Field::Summary => assessment.summary = value,
            Field::PotentialImpact => assessment.potential_impact = value,
            Field::Relevance => assessment.relevance = collapse_fractions(&value),
            Field::Severity => assessment.severity = value,
            Field::RecommendedActions => assessment.recommended_actions = value,
        }
    }
    assessment
}

/// Recognise a header line, returning its field and the text after the
/// separator.
fn header(line: &str) -> Option<(Field, &str)> {
    let rest = strip_list_marker(line)
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '#'));
    LABELS.iter().find_map(|&(label, field)| {
        let head = rest.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let after = rest[label.len()..]
            .trim_start_matches(['*', '_'])
            .trim_start_matches([' ', '\t']);
        after
            .strip_prefix(':')
            .or_else(|| after.strip_prefix('-'))
            .map(|value| (field, value))
    })
}

/// Drop a leading `-`, `+` or `•` bullet, or a `1.` / `1)` item number.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix(['-', '+', '•']) {
        return rest;
    }
    let numbered = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if numbered.len() < line.len() {
        if let Some(rest) = numbered.strip_prefix(['.', ')']) {
            return rest;
        }
    }
    line
}

fn clean(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | ':' | '-' | '#'))
        .to_string()
}

/// Replace each `digit / digit` with its numerator ("4/5" becomes "4").
fn collapse_fractions(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            if let Some(end) = fraction_end(&chars, i + 1) {
                out.push(c);
                i = end;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

/// If `chars[start..]` is `\s*/\s*\d`, the index just past the digit.
fn fraction_end(chars: &[char], start: usize) -> Option<usize> {
    let skip_ws = |mut j: usize| {
        while chars.get(j).is_some_and(|c| c.is_whitespace()) {
            j += 1;
        }
        j
    };
    let slash = skip_ws(start);
    if chars.get(slash) != Some(&'/') {
        return None;
    }
    let digit = skip_ws(slash + 1);
    chars
        .get(digit)
        .filter(|c| c.is_ascii_digit())
        .map(|_| digit + 1)
}
