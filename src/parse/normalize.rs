use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Matches one `( ... )` group, capturing its contents.
pub fn parenthetical_group() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").expect("regex should be valid"))
}

/// Collapses every whitespace run into one space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s.trim(), " ").into_owned()
}

pub fn strip_parenthetical_groups<'a>(s: &'a str, pattern: &Regex) -> Cow<'a, str> {
    pattern.replace_all(s, "")
}

/// "3,50 €" -> "3.50". Also drops whitespace and any leftover `( ... )` note.
pub fn normalize_decimal(s: &str) -> String {
    static CURRENCY: OnceLock<Regex> = OnceLock::new();
    let currency = CURRENCY.get_or_init(|| Regex::new(r"[\p{Sc}\s]").expect("regex should be valid"));
    let s = currency.replace_all(s, "").replace(',', ".");
    strip_parenthetical_groups(&s, parenthetical_group()).into_owned()
}

/// Display name of a meal cell: no attribute groups, no nutrition suffix,
/// single spaces, no space before a comma and no trailing comma.
///
/// Whitespace is collapsed first so a group wrapped over several lines is
/// stripped like any other. Everything from the first `Kcal` on is dropped;
/// cutting at a later one would leave a `Kcal` for the next pass to find.
pub fn sanitize_meal_name(raw: &str) -> String {
    let name = collapse_whitespace(raw);
    let name = strip_parenthetical_groups(&name, parenthetical_group());
    let name = match name.find("Kcal") {
        Some(idx) => &name[..idx],
        None => &name,
    };
    collapse_whitespace(name)
        .replace(" ,", ",")
        .trim_end_matches([',', ' '])
        .to_owned()
}
