//! Greedy word wrapping against a rendered-width measure.

/// Packs the whitespace separated words of `text` into lines whose measured
/// width stays within `max_width`.
///
/// Words are joined with single spaces. A word that is wider than
/// `max_width` on its own still gets a line to itself, it is never split.
/// Empty or all-whitespace input gives no lines.
pub fn wrap_text<M>(text: &str, measure: M, max_width: u32) -> Vec<String>
where
    M: Fn(&str) -> u32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
