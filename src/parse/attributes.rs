use super::normalize::parenthetical_group;

/// Collects the codes of every `( ... )` group in a cell, e.g.
/// "Suppe (1, 3, 9a) (V)" -> `["1", "3", "9a", "V"]`.
///
/// Whitespace is dropped before matching, so codes never contain spaces.
pub fn parse_attributes(raw: &str, delimiter: char, uppercase: bool) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let separator = delimiter.to_string();
    let joined = parenthetical_group()
        .captures_iter(&compact)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(separator.as_str());
    joined
        .split(|c| c == delimiter || c == '(' || c == ')')
        .filter(|code| !code.is_empty())
        .map(|code| {
            if uppercase {
                code.to_uppercase()
            } else {
                code.to_owned()
            }
        })
        .collect()
}
