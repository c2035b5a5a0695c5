//! Building `x-callback-url` command references.
//!
//! A command is a verb plus an ordered list of parameters. The builder turns
//! it into `bear://x-callback-url/<verb>?k=v&...` with every value
//! percent-encoded and the API token, when configured, appended last.

use std::borrow::Cow;
use std::fmt;

/// URL scheme registered by Bear.
pub const BEAR_SCHEME: &str = "bear";

/// Host segment shared by every x-callback-url action.
pub const CALLBACK_HOST: &str = "x-callback-url";

/// Action verbs understood by the target application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    /// Used for both full replace and append, selected by the `mode` param.
    AddText,
    OpenNote,
    Trash,
    Archive,
    DeleteTag,
}

impl Verb {
    /// Path segment for this verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::AddText => "add-text",
            Self::OpenNote => "open-note",
            Self::Trash => "trash",
            Self::Archive => "archive",
            Self::DeleteTag => "delete-tag",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    /// Serialized as `yes` / `no`.
    Flag(bool),
}

impl ParamValue {
    fn as_wire(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Flag(true) => Cow::Borrowed("yes"),
            Self::Flag(false) => Cow::Borrowed("no"),
        }
    }
}

/// A verb with its ordered parameters, ready to be built into a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCommand {
    verb: Verb,
    params: Vec<(&'static str, ParamValue)>,
}

impl ActionCommand {
    /// Start a command with no parameters.
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            params: Vec::new(),
        }
    }

    /// Add a text parameter.
    pub fn text(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, ParamValue::Text(value.into())));
        self
    }

    /// Add a text parameter only when a value is present.
    pub fn opt_text<S: Into<String>>(self, key: &'static str, value: Option<S>) -> Self {
        match value {
            Some(value) => self.text(key, value),
            None => self,
        }
    }

    /// Add a yes/no parameter.
    pub fn flag(mut self, key: &'static str, value: bool) -> Self {
        self.params.push((key, ParamValue::Flag(value)));
        self
    }

    /// The command verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> &[(&'static str, ParamValue)] {
        &self.params
    }

    /// Value of the first parameter named `key`.
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Flatten tag names into Bear's inline form: `#a #b`.
///
/// Returns `None` for an empty list so the parameter is omitted.
pub fn flatten_tags<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    Some(
        tags.iter()
            .map(|t| format!("#{}", t.as_ref()))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Builds encoded command references.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    token: Option<String>,
}

impl fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CommandBuilder {
    /// Create a builder for the Bear scheme. Empty tokens are ignored.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Build the encoded reference for `command`.
    ///
    /// The token is appended to every command regardless of verb.
    pub fn build(&self, command: &ActionCommand) -> String {
        let mut reference = format!("{BEAR_SCHEME}://{CALLBACK_HOST}/{}", command.verb());

        let token = self
            .token
            .as_deref()
            .map(|t| ("token", Cow::Borrowed(t)));
        let pairs = command
            .params()
            .iter()
            .map(|(key, value)| (*key, value.as_wire()))
            .chain(token);

        for (i, (key, value)) in pairs.enumerate() {
            reference.push(if i == 0 { '?' } else { '&' });
            reference.push_str(key);
            reference.push('=');
            reference.push_str(&urlencoding::encode(&value));
        }
        reference
    }
}

/// Copy of `reference` with any `token` parameter value masked, for logging.
pub fn redact_token(reference: &str) -> Cow<'_, str> {
    let Some((base, query)) = reference.split_once('?') else {
        return Cow::Borrowed(reference);
    };
    if !query.split('&').any(|pair| pair.starts_with("token=")) {
        return Cow::Borrowed(reference);
    }
    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("token=") {
                "token=***"
            } else {
                pair
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    Cow::Owned(format!("{base}?{query}"))
}
