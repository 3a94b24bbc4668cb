/// Failure to turn a template into a concrete prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("template references '{name}' but no value was supplied")]
    MissingVariable { name: String },
    #[error("unbalanced brace at byte {position}")]
    Malformed { position: usize },
}

/// Substitutes `{name}` placeholders; `{{` and `}}` are literal braces.
pub(super) fn render_template<'a, F>(template: &str, lookup: F) -> Result<String, RenderError>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    rendered.push('{');
                    continue;
                }

                let mut end = None;
                for (index, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            end = Some(index);
                            break;
                        }
                        '{' => return Err(RenderError::Malformed { position: index }),
                        _ => {}
                    }
                }

                let end = end.ok_or(RenderError::Malformed { position })?;
                let name = template[position + 1..end].trim();
                if name.is_empty() {
                    return Err(RenderError::Malformed { position });
                }

                let value = lookup(name).ok_or_else(|| RenderError::MissingVariable {
                    name: name.to_string(),
                })?;
                rendered.push_str(value);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    rendered.push('}');
                } else {
                    return Err(RenderError::Malformed { position });
                }
            }
            other => rendered.push(other),
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "who" => Some("world"),
            "empty" => Some(""),
            _ => None,
        }
    }

    #[test]
    fn substitutes_named_placeholders() {
        let rendered = render_template("hello {who}!{empty}", lookup).expect("renders");
        assert_eq!(rendered, "hello world!");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let rendered =
            render_template("{{\"score\": {who}}}", lookup).expect("renders escaped braces");
        assert_eq!(rendered, "{\"score\": world}");
    }

    #[test]
    fn missing_variable_is_reported_by_name() {
        let error = render_template("{who} and {nobody}", lookup).expect_err("missing");
        assert_eq!(
            error,
            RenderError::MissingVariable {
                name: "nobody".to_string()
            }
        );
    }

    #[test]
    fn unbalanced_braces_are_malformed() {
        assert!(matches!(
            render_template("open {who", lookup),
            Err(RenderError::Malformed { position: 5 })
        ));
        assert!(matches!(
            render_template("stray } brace", lookup),
            Err(RenderError::Malformed { position: 6 })
        ));
        assert!(matches!(
            render_template("empty {} name", lookup),
            Err(RenderError::Malformed { .. })
        ));
    }

    #[test]
    fn multibyte_text_survives_rendering() {
        let rendered = render_template("Değerlendirme (1–5): {who}", lookup).expect("renders");
        assert_eq!(rendered, "Değerlendirme (1–5): world");
    }
}
