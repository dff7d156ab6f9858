//! Discourse export parsing.
//!
//! Two export shapes are accepted and normalized into one post list:
//! a bare JSON array of posts, or a topic object carrying
//! `post_stream.posts`. Anything else is rejected.
//!
//! Shape is decided first; fields are then read one post at a time and
//! never reject a post. Scalar ids and slugs are rendered as text.

use serde_json::{Map, Value};
use tutor_core::{AppError, AppResult};

/// A single forum post. Every field is optional in exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoursePost {
    /// Rendered post body (HTML)
    pub cooked: Option<String>,

    pub topic_slug: Option<String>,
    pub topic_id: Option<String>,
    pub post_number: Option<String>,
}

impl DiscoursePost {
    /// Read the fields of one post object. Absent and `null` fields are `None`.
    pub fn from_object(post: &Map<String, Value>) -> Self {
        Self {
            cooked: field_text(post, "cooked"),
            topic_slug: field_text(post, "topic_slug"),
            topic_id: field_text(post, "topic_id"),
            post_number: field_text(post, "post_number"),
        }
    }

    /// Post body HTML, empty when absent.
    pub fn body(&self) -> &str {
        self.cooked.as_deref().unwrap_or("")
    }

    /// Forum URL of this post: `<base>/t/<slug>/<topic id>/<post number>`.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/t/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.topic_slug.as_deref().unwrap_or("unknown"),
            self.topic_id.as_deref().unwrap_or("0"),
            self.post_number.as_deref().unwrap_or("1")
        )
    }
}

/// The accepted export shapes.
#[derive(Debug)]
enum DiscourseExport {
    /// `[post, post, ...]`
    Posts(Vec<Value>),
    /// `{"post_stream": {"posts": [...]}, ...}`
    Topic(Vec<Value>),
}

impl DiscourseExport {
    fn classify(value: Value) -> AppResult<Self> {
        match value {
            Value::Array(items) => Ok(Self::Posts(items)),
            Value::Object(mut topic) => match topic.remove("post_stream") {
                Some(Value::Object(mut stream)) => match stream.remove("posts") {
                    Some(Value::Array(posts)) => Ok(Self::Topic(posts)),
                    _ => Err(unsupported_shape("object with post_stream but no posts list")),
                },
                _ => Err(unsupported_shape("object without post_stream")),
            },
            other => Err(unsupported_shape(shape_name(&other))),
        }
    }

    fn into_items(self) -> Vec<Value> {
        match self {
            Self::Posts(items) | Self::Topic(items) => items,
        }
    }
}

/// Parse a Discourse export file into its posts.
pub fn parse_export(contents: &str) -> AppResult<Vec<DiscoursePost>> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| AppError::Ingest(format!("invalid JSON: {}", e)))?;

    DiscourseExport::classify(value)?
        .into_items()
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(post) => Ok(DiscoursePost::from_object(post)),
            other => Err(AppError::Ingest(format!(
                "post {} is a {}, expected an object",
                i,
                shape_name(other)
            ))),
        })
        .collect()
}

fn unsupported_shape(found: &str) -> AppError {
    AppError::Ingest(format!(
        "unsupported discourse export shape ({}): expected a list of posts or an object with post_stream.posts",
        found
    ))
}

/// Field value as text; strings verbatim, other values in JSON notation.
fn field_text(post: &Map<String, Value>, key: &str) -> Option<String> {
    match post.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
