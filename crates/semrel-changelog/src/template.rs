//! `{{name}}` placeholder templates.

use crate::{RenderError, RenderResult};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Expands `{{name}}` placeholders in `template`.
///
/// Whitespace inside the braces is ignored, so `{{ version }}` and
/// `{{version}}` are the same placeholder.
///
/// # Errors
///
/// Returns an error if a placeholder is not closed or names a value missing
/// from `values`.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> RenderResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);

        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            return Err(RenderError::UnclosedPlaceholder {
                template: template.to_string(),
                position: offset + start,
            });
        };

        let name = after_open[..end].trim();
        let value = values
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(*value))
            .ok_or_else(|| RenderError::UnknownPlaceholder {
                template: template.to_string(),
                name: name.to_string(),
            })?;
        output.push_str(value);

        let consumed = start + OPEN.len() + end + CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }
    output.push_str(rest);

    Ok(output)
}
