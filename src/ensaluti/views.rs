//! HTML page rendering.
//!
//! Each page is an embedded template with `{{placeholder}}` substitution
//! and `{{#key}}...{{/key}}` sections that render only when the key has a
//! value. Values are HTML-escaped. Templates are resolved at compile time,
//! so a missing template file fails the build instead of a request.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Signup,
    Signin,
    SigninSuccess,
}

impl View {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Signup => "signup",
            Self::Signin => "signin",
            Self::SigninSuccess => "signin_success",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Home => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/home.html")),
            Self::Signup => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/signup.html"))
            }
            Self::Signin => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/signin.html"))
            }
            Self::SigninSuccess => include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/templates/signin_success.html"
            )),
        }
    }
}

/// Data bag handed to [`render`]. Unset values make their sections
/// disappear; referencing an unset value as a placeholder is an error.
#[derive(Debug, Default)]
pub struct ViewData {
    pub error: Option<String>,
    pub username: Option<String>,
}

impl ViewData {
    #[must_use]
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_username(name: impl Into<String>) -> Self {
        Self {
            username: Some(name.into()),
            ..Self::default()
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "error" => self.error.as_deref(),
            "username" => self.username.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unbound placeholder: {0}")]
    UnboundPlaceholder(String),
    #[error("unterminated tag")]
    UnterminatedTag,
    #[error("unterminated section: {0}")]
    UnterminatedSection(String),
}

pub fn render(view: View, data: &ViewData) -> Result<String, RenderError> {
    render_source(view.source(), data)
}

fn render_source(source: &str, data: &ViewData) -> Result<String, RenderError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);

        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(RenderError::UnterminatedTag);
        };

        let tag = after[..end].trim();
        let tail = &after[end + 2..];

        if let Some(key) = tag.strip_prefix('#') {
            let close = format!("{{{{/{key}}}}}");
            let Some(close_at) = tail.find(&close) else {
                return Err(RenderError::UnterminatedSection(key.to_string()));
            };

            if data.lookup(key).is_some() {
                out.push_str(&render_source(&tail[..close_at], data)?);
            }

            rest = &tail[close_at + close.len()..];
        } else {
            let value = data
                .lookup(tag)
                .ok_or_else(|| RenderError::UnboundPlaceholder(tag.to_string()))?;
            out.push_str(&escape(value));
            rest = tail;
        }
    }

    out.push_str(rest);

    Ok(out)
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
