//! String-level JSON escaping for a hand-templated `generateContent` body.
//!
//! Compatibility helpers only. `LlmClient` serializes requests with serde;
//! these functions are kept so tests can check the structured body against
//! the string-templated one.

/// Escapes `text` for a double-quoted JSON literal. Backslashes go first so
/// the later substitutions are not escaped twice. Carriage returns are dropped.
#[allow(dead_code)]
pub fn escape_json(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

/// Reverses [`escape_json`] for the characters it escapes.
#[allow(dead_code)]
pub fn unescape_json(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// The request body as produced by string templating.
#[allow(dead_code)]
pub fn render_templated_request(prompt: &str, temperature: f32) -> String {
    format!(
        r#"{{
  "generationConfig": {{
    "temperature": {temperature}
  }},
  "contents": [
    {{
      "parts": [
        {{
          "text": "{}"
        }}
      ]
    }}
  ]
}}"#,
        escape_json(prompt)
    )
}
