//! Message template rendering
//!
//! Templates carry positional placeholders (`{0}`, `{1}`, ...) that are
//! substituted with rule parameters when a rule fails. Unknown placeholders
//! are left verbatim so a typo in an override message stays visible instead
//! of silently disappearing.

/// Renders a template by substituting `{n}` placeholders from `args`.
#[must_use]
pub fn render(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find('}') {
            Some(close) => {
                let placeholder = &after[1..close];
                match placeholder.parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str(&after[..=close]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(after);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Compact display form for a parameter value inside a message.
///
/// Numbers drop a trailing `.0` so `{"min": 5}` renders as `5`, not `5.0`;
/// strings render without quotes.
#[must_use]
pub fn display_param(param: &serde_json::Value) -> String {
    match param {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    return format!("{}", f as i64);
                }
            }
            n.to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_substitutes_positional_args() {
        assert_eq!(
            render("between {0} and {1}", &["2", "5"]),
            "between 2 and 5"
        );
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        assert_eq!(render("at least {0} and {9}", &["3"]), "at least 3 and {9}");
        assert_eq!(render("literal {brace}", &[]), "literal {brace}");
    }

    #[test]
    fn test_render_unclosed_brace_is_verbatim() {
        assert_eq!(render("oops {0", &["3"]), "oops {0");
    }

    #[test]
    fn test_display_param() {
        assert_eq!(display_param(&json!(5)), "5");
        assert_eq!(display_param(&json!(5.0)), "5");
        assert_eq!(display_param(&json!(2.5)), "2.5");
        assert_eq!(display_param(&json!("abc")), "abc");
    }
}
