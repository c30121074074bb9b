//! Pulling a JSON document out of chatty model output.

use hokusai_error::{StoryError, StoryErrorKind};

/// Extract the JSON document from a model reply.
///
/// Models wrap JSON in markdown fences or surround it with commentary. The
/// search order is:
/// 1. The body of the first fenced code block (with or without a language tag)
/// 2. The first balanced `{...}` or `[...]`, whichever opens earlier
///
/// # Errors
///
/// Returns [`StoryErrorKind::Parse`] when the reply holds no JSON-looking text.
///
/// # Examples
///
/// ```
/// use hokusai_models::extract_json;
///
/// let reply = "Sure! Here is your story:\n```json\n{\"panels\": []}\n```\nEnjoy.";
/// assert_eq!(extract_json(reply).unwrap(), "{\"panels\": []}");
///
/// let inline = "Story: {\"panels\": [{\"caption\": \"a }\"}]} -- end";
/// assert_eq!(extract_json(inline).unwrap(), "{\"panels\": [{\"caption\": \"a }\"}]}");
/// ```
#[track_caller]
pub fn extract_json(reply: &str) -> Result<String, StoryError> {
    if let Some(body) = fenced_block(reply) {
        if body.starts_with('{') || body.starts_with('[') {
            return Ok(body.to_string());
        }
    }

    let opener = reply.find(['{', '[']);
    let found = opener.and_then(|start| {
        let close = if reply[start..].starts_with('{') { '}' } else { ']' };
        balanced(&reply[start..], close)
    });

    match found {
        Some(json) => Ok(json.to_string()),
        None => {
            tracing::error!(reply_length = reply.len(), "No JSON found in model reply");
            Err(StoryError::new(StoryErrorKind::Parse(format!(
                "No JSON found in model reply ({} bytes)",
                reply.len()
            ))))
        }
    }
}

/// Body of the first fenced block, trimmed. An unterminated fence runs to the
/// end of the reply, which is what a truncated completion looks like.
fn fenced_block(reply: &str) -> Option<&str> {
    let fence = reply.find("```")?;
    let after = &reply[fence + 3..];
    // Skip the info string ("json", "JSON", ...) up to the first newline
    let body_start = after.find('\n').map(|n| n + 1).unwrap_or(0);
    let body = &after[body_start..];
    let body = match body.find("```") {
        Some(end) => &body[..end],
        None => body,
    };
    Some(body.trim())
}

/// Prefix of `text` (which starts with an opener) up to its matching `close`,
/// ignoring delimiters inside string literals.
fn balanced(text: &str, close: char) -> Option<&str> {
    let open = text.chars().next()?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
