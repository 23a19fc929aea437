//! Version template formatting.
//!
//! Templates use named placeholders, e.g. `"/v{major}_{minor}"` or
//! `"{major}.{minor}"`. Literal braces are written `{{` and `}}`.
//! A placeholder may carry a width spec (`{minor:02}`, `{major:3d}`).

use crate::versioning::error::VersioningError;
use crate::versioning::version::ApiVersion;

/// Render `template` for `version`.
pub fn format_version(template: &str, version: ApiVersion) -> Result<String, VersioningError> {
    let mut out = String::with_capacity(template.len() + 4);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    if c == '{' {
                        return Err(malformed(template, "nested `{` inside placeholder"));
                    }
                    field.push(c);
                }
                if !closed {
                    return Err(malformed(template, "unterminated placeholder"));
                }
                render_field(template, &field, version, &mut out)?;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(malformed(template, "single `}` encountered")),
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Check a template without rendering a meaningful version.
pub fn validate_template(template: &str) -> Result<(), VersioningError> {
    format_version(template, ApiVersion::default()).map(|_| ())
}

fn render_field(
    template: &str,
    field: &str,
    version: ApiVersion,
    out: &mut String,
) -> Result<(), VersioningError> {
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };

    let value = match name {
        "major" => version.major,
        "minor" => version.minor,
        other => {
            return Err(VersioningError::UnknownPlaceholder {
                placeholder: other.to_string(),
                template: template.to_string(),
            })
        }
    };

    match spec {
        None | Some("") => out.push_str(&value.to_string()),
        Some(spec) => {
            let spec = spec.strip_suffix('d').unwrap_or(spec);
            let zero_pad = spec.starts_with('0');
            let width: usize = if spec.is_empty() {
                0
            } else {
                spec.parse()
                    .map_err(|_| malformed(template, &format!("unsupported format spec `{spec}`")))?
            };
            if zero_pad {
                out.push_str(&format!("{value:0width$}"));
            } else {
                out.push_str(&format!("{value:>width$}"));
            }
        }
    }
    Ok(())
}

fn malformed(template: &str, reason: &str) -> VersioningError {
    VersioningError::MalformedTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
