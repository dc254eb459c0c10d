//! Small shared helpers.

#[cfg(test)]
mod tests;

/// Trim the module path off a type name, leaving the final segment.
///
/// Factory type names come from `stringify!` and may carry a full path
/// (`themes::MidnightTheme`); log lines and listings only want the last
/// segment. Path separators inside generic arguments are left alone.
pub fn short_type_name(full: &str) -> &str {
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in full.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ':' if depth == 0 && full[..idx].ends_with(':') => start = idx + 1,
            _ => {}
        }
    }
    &full[start..]
}
