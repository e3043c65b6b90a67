use crate::render::html_escape;

/// Escape `text` and wrap every occurrence of each phrase in `<span>`.
///
/// Longer phrases claim text first; a shorter phrase never wraps anything
/// inside (or overlapping) a range already claimed, so "game engine" and
/// "game" produce one span, not nested ones. Empty phrases are ignored.
pub fn wrap_highlights(text: &str, highlights: &[String]) -> String {
    let mut ordered: Vec<&str> = highlights
        .iter()
        .map(|h| h.as_str())
        .filter(|h| !h.is_empty())
        .collect();
    // stable: equal lengths keep their given order
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    for phrase in ordered {
        for (start, m) in text.match_indices(phrase) {
            let end = start + m.len();
            let overlaps = claimed.iter().any(|&(s, e)| start < e && s < end);
            if !overlaps {
                claimed.push((start, end));
            }
        }
    }
    claimed.sort_unstable();

    let mut out = String::with_capacity(text.len() + claimed.len() * 13);
    let mut cursor = 0;
    for (start, end) in claimed {
        out.push_str(&html_escape(&text[cursor..start]));
        out.push_str("<span>");
        out.push_str(&html_escape(&text[start..end]));
        out.push_str("</span>");
        cursor = end;
    }
    out.push_str(&html_escape(&text[cursor..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn longer_phrase_wins_over_contained_phrase() {
        let out = wrap_highlights("Built a game engine", &phrases(&["game engine", "game"]));
        assert_eq!(out, "Built a <span>game engine</span>");
        assert_eq!(out.matches("<span>").count(), 1);
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let out = wrap_highlights("Built a game engine", &phrases(&["game", "game engine"]));
        assert_eq!(out, "Built a <span>game engine</span>");
    }

    #[test]
    fn every_occurrence_is_wrapped() {
        let out = wrap_highlights("Rust and more Rust", &phrases(&["Rust"]));
        assert_eq!(out, "<span>Rust</span> and more <span>Rust</span>");
    }

    #[test]
    fn shorter_phrase_still_wraps_outside_claimed_ranges() {
        let out = wrap_highlights(
            "a game engine for a game",
            &phrases(&["game engine", "game"]),
        );
        assert_eq!(out, "a <span>game engine</span> for a <span>game</span>");
    }

    #[test]
    fn text_is_escaped() {
        let out = wrap_highlights("C++ <3 & co", &phrases(&["<3"]));
        assert_eq!(out, "C++ <span>&lt;3</span> &amp; co");
    }

    #[test]
    fn no_highlights_returns_escaped_text() {
        assert_eq!(wrap_highlights("plain", &[]), "plain");
        assert_eq!(wrap_highlights("plain", &phrases(&[""])), "plain");
    }
}
