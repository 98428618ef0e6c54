//! Width-budgeted truncation for compact cells.

/// Default display-width budget.
pub const DEFAULT_TRUNCATE_BUDGET: usize = 20;

/// Appended when text is cut.
pub const ELLIPSIS: &str = "...";

/// Display width of one character: CJK unified ideographs count 1.0,
/// everything else 0.5.
pub fn char_width(c: char) -> f64 {
    if ('\u{4e00}'..='\u{9fff}').contains(&c) {
        1.0
    } else {
        0.5
    }
}

/// Display width of a string.
pub fn display_width(text: &str) -> f64 {
    text.chars().map(char_width).sum()
}

/// Shortens `text` to fit `budget` width units.
///
/// Text of at most `budget` characters is returned as is. Otherwise the
/// text is walked as alternating word and whitespace runs, accumulating
/// width until the next run would exceed the budget; an ellipsis marks the
/// cut. A first run that alone exceeds the budget is hard-cut to `budget`
/// characters.
///
/// # Example
///
/// ```
/// use sysprompt_lib::table::truncate;
///
/// assert_eq!(truncate("short", 20), "short");
/// assert_eq!(truncate(&"中".repeat(21), 20), format!("{}...", "中".repeat(20)));
/// ```
pub fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let limit = budget as f64;
    let mut width = 0.0;
    let mut truncated = String::new();

    for run in runs(text) {
        let run_width = display_width(run);
        if width + run_width > limit {
            if width == 0.0 {
                let head: String = run.chars().take(budget).collect();
                return format!("{head}{ELLIPSIS}");
            }
            truncated.push_str(ELLIPSIS);
            break;
        }
        width += run_width;
        truncated.push_str(run);
    }

    truncated
}

/// Splits text into maximal runs of whitespace / non-whitespace.
fn runs(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let ws = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != ws)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}
