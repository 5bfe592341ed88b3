//! Splitting strings into runs of one repeated character

/// Split `s` into maximal runs of a single repeated character.
///
/// The runs borrow from `s`, keep their order and concatenate back to `s`.
/// An empty input yields no runs.
///
/// ```
/// use alnedit_core::split_blocks;
///
/// assert_eq!(split_blocks("MMIDD"), vec!["MM", "I", "DD"]);
/// ```
pub fn split_blocks(s: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut chars = s.char_indices();
    let Some((_, mut current)) = chars.next() else {
        return blocks;
    };

    let mut start = 0;
    for (idx, c) in chars {
        if c != current {
            blocks.push(&s[start..idx]);
            start = idx;
            current = c;
        }
    }
    blocks.push(&s[start..]);

    blocks
}
