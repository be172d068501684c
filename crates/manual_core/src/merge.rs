//! Positional join of raw search and statistics records into [`Item`]s.

use std::collections::HashSet;

use manual_logging::{manual_debug, manual_warn};

use crate::{Item, RawSearchRecord, RawStatsRecord, VideoId};

/// Duration text used when no usable duration code is available.
pub const FALLBACK_DURATION: &str = "0:00";

/// Closed codepoint intervals of the supported script (Japanese).
pub const TARGET_SCRIPT_RANGES: &[(char, char)] = &[
    ('\u{3000}', '\u{303F}'), // CJK symbols and punctuation
    ('\u{3040}', '\u{309F}'), // Hiragana
    ('\u{30A0}', '\u{30FF}'), // Katakana
    ('\u{FF00}', '\u{FF9F}'), // Full-width and half-width forms
    ('\u{4E00}', '\u{9FAF}'), // CJK unified ideographs
    ('\u{3400}', '\u{4DBF}'), // CJK extension A
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub items: Vec<Item>,
    /// Records dropped because the title has no character of the target script.
    pub filtered_out: usize,
    /// Records dropped because their id was already seen earlier in the page.
    pub duplicates: usize,
    /// Retained items without a positionally aligned statistics record.
    pub missing_stats: usize,
    /// Statistics records beyond the end of the search records.
    pub surplus_stats: usize,
    /// Retained items whose view count or duration failed to parse.
    pub malformed_stats: usize,
}

/// Merges search records with statistics records aligned by position.
///
/// Precondition: `stats[i]` describes `search[i]`. Alignment uses the raw
/// index, before any filtering. Missing or malformed statistics fall back to a
/// zero view count and [`FALLBACK_DURATION`] for that item only.
pub fn merge_records(search: &[RawSearchRecord], stats: &[RawStatsRecord]) -> MergeOutcome {
    let mut outcome = MergeOutcome {
        surplus_stats: stats.len().saturating_sub(search.len()),
        ..MergeOutcome::default()
    };
    if search.len() != stats.len() {
        manual_warn!(
            "search/stats length mismatch: search={} stats={}; aligning by position",
            search.len(),
            stats.len()
        );
    }

    let mut seen = HashSet::with_capacity(search.len());
    for (index, record) in search.iter().enumerate() {
        if !has_target_script(&record.title) {
            outcome.filtered_out += 1;
            continue;
        }
        if !seen.insert(record.id.as_str()) {
            manual_warn!("dropping duplicate video id {} at index {}", record.id, index);
            outcome.duplicates += 1;
            continue;
        }

        let (view_metric, duration_text) = match stats.get(index) {
            Some(entry) => {
                let views = parse_view_metric(entry.view_count_text.as_deref());
                let duration = entry.duration_code.as_deref().and_then(normalize_duration);
                if views.is_none() || duration.is_none() {
                    manual_debug!(
                        "malformed stats for {}: views={:?} duration={:?}",
                        record.id,
                        entry.view_count_text,
                        entry.duration_code
                    );
                    outcome.malformed_stats += 1;
                }
                (
                    views.unwrap_or(0),
                    duration.unwrap_or_else(|| FALLBACK_DURATION.to_string()),
                )
            }
            None => {
                outcome.missing_stats += 1;
                (0, FALLBACK_DURATION.to_string())
            }
        };

        outcome.items.push(Item {
            id: VideoId::new(record.id.clone()),
            title: record.title.clone(),
            view_metric,
            duration_text,
            thumbnail_ref: record.thumbnail_ref.clone(),
        });
    }

    outcome
}

/// True if `title` contains at least one character of [`TARGET_SCRIPT_RANGES`].
pub fn has_target_script(title: &str) -> bool {
    title.chars().any(|c| {
        TARGET_SCRIPT_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c))
    })
}

fn parse_view_metric(text: Option<&str>) -> Option<u64> {
    text.map(str::trim)?.parse::<u64>().ok()
}

/// Decodes an ISO-8601 duration such as `PT1H2M3S` into `1:02:03`.
///
/// Days fold into hours. Without hours the result is `M:SS`. Returns `None`
/// for anything that is not a well-formed `P[nD][T[nH][nM][nS]]` code.
pub fn normalize_duration(code: &str) -> Option<String> {
    let rest = code.trim().strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return None;
            }
            (date, time)
        }
        None => (rest, ""),
    };
    if date_part.is_empty() && time_part.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    for (_, value) in parse_components(date_part, &['D'])? {
        total = total.checked_add(value.checked_mul(86_400)?)?;
    }
    for (unit, value) in parse_components(time_part, &['H', 'M', 'S'])? {
        let scale = match unit {
            'H' => 3_600,
            'M' => 60,
            _ => 1,
        };
        total = total.checked_add(value.checked_mul(scale)?)?;
    }

    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    Some(if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    })
}

/// Splits `12H3M` into `[('H', 12), ('M', 3)]`, enforcing unit order.
fn parse_components(part: &str, units: &[char]) -> Option<Vec<(char, u64)>> {
    let mut components = Vec::new();
    let mut next_unit = 0;
    let mut digits = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let position = units[next_unit..].iter().position(|&u| u == c)?;
        if digits.is_empty() {
            return None;
        }
        components.push((c, digits.parse::<u64>().ok()?));
        digits.clear();
        next_unit += position + 1;
    }
    if !digits.is_empty() {
        return None;
    }
    Some(components)
}
