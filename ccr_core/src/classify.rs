//! Rule-based tagging of event text with voice-part and group codes.

use bitmask_enum::bitmask;
use once_cell::sync::Lazy;
use regex::Regex;

/// The event text fields a rule may be matched against.
#[bitmask]
pub enum FieldBitmask {
    Summary,
    Location,
    Description,
}

/// One classification rule: a pattern, the codes it contributes when the
/// pattern matches, and the fields it applies to.
pub struct Rule {
    symbols: &'static [&'static str],
    pattern: Regex,
    fields: FieldBitmask,
}

impl Rule {
    fn new(symbols: &'static [&'static str], pattern: &str, fields: FieldBitmask) -> Self {
        Self {
            symbols,
            pattern: Regex::new(pattern).unwrap(),
            fields,
        }
    }
}

/// The rule table, in priority order. Built once, immutable afterwards.
///
/// The keywords are the Polish voice-part and group names used in the
/// choir's calendar entries.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(&["S"], "sopran", FieldBitmask::all()),
        Rule::new(&["A"], "alt", FieldBitmask::all()),
        Rule::new(&["T"], "tenor", FieldBitmask::all()),
        Rule::new(&["B"], "bas", FieldBitmask::all()),
        Rule::new(&["Z"], "zarzad|zarząd", FieldBitmask::all()),
        Rule::new(&["t"], "tutti", FieldBitmask::all()),
    ]
});

/// Tag one event from its joined text fields.
///
/// Fields are scanned in order summary, location, description; within each
/// field every rule runs in priority order against the lower-cased text.
/// Each code is assigned at most once, by the first rule and field that
/// match, and the returned order is the assignment order.
pub fn classify(summary: &str, location: &str, description: &str) -> Vec<&'static str> {
    classify_with(&RULES, summary, location, description)
}

fn classify_with(
    rules: &[Rule],
    summary: &str,
    location: &str,
    description: &str,
) -> Vec<&'static str> {
    let fields = [
        (FieldBitmask::Summary, summary),
        (FieldBitmask::Location, location),
        (FieldBitmask::Description, description),
    ];
    let mut assigned: Vec<&'static str> = Vec::new();
    for (field, text) in fields {
        if text.is_empty() {
            continue;
        }
        let text = text.to_lowercase();
        for rule in rules {
            let remaining: Vec<&'static str> = rule
                .symbols
                .iter()
                .copied()
                .filter(|symbol| !assigned.contains(symbol))
                .collect();
            if remaining.is_empty() || !rule.fields.contains(field) {
                continue;
            }
            if rule.pattern.is_match(&text) {
                assigned.extend(remaining);
            }
        }
    }
    assigned
}
