// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
//! Positional field splitting shared by every section grammar. Most
//! sections accept either whitespace or comma as a separator (spec.md §6),
//! so a line is split on any run of whitespace and/or commas.

/// Splits a line's body into trimmed, non-empty fields.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits off the leading keyword from the rest of an inline-directive line,
/// e.g. `"set_beam_defaults 10 20"` -> `("set_beam_defaults", "10 20")`.
pub fn split_keyword(line: &str) -> (&str, &str) {
    match line.find(|c: char| c.is_whitespace()) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    }
}

pub fn parse_f32(token: &str) -> Option<f32> {
    token.parse::<f32>().ok()
}

pub fn parse_i32(token: &str) -> Option<i32> {
    token.parse::<i32>().ok()
}

pub fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_and_whitespace() {
        assert_eq!(
            split_fields("0, 0,0, 0"),
            vec!["0".to_string(), "0".to_string(), "0".to_string(), "0".to_string()]
        );
    }

    #[test]
    fn splits_keyword_from_payload() {
        assert_eq!(
            split_keyword("set_beam_defaults 10 20 30"),
            ("set_beam_defaults", "10 20 30")
        );
        assert_eq!(split_keyword("nodes"), ("nodes", ""));
    }

    #[test]
    fn parses_legacy_booleans() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
