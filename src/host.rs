//! Collaborator interfaces supplied by the host application.
//!
//! The engines never draw anything themselves. They hand option lists to a
//! [`Selector`], ask a [`Prompt`] for free text and report through a
//! [`Notifier`]. Dismissal is a normal `Ok(None)`, not an error.

use anyhow::Result;

/// One entry offered to the user by a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption<T> {
    /// Primary label
    pub name: String,
    /// Secondary label
    pub description: String,
    /// Heading the option is listed under
    pub group: Option<String>,
    /// Icon identifier understood by the host
    pub icon: Option<String>,
    /// Accent color understood by the host
    pub color: Option<String>,
    /// Value handed back when the option is chosen
    pub result: T,
}

impl<T> SelectorOption<T> {
    /// Create an option with just a label and a payload.
    pub fn new(name: impl Into<String>, result: T) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            group: None,
            icon: None,
            color: None,
            result,
        }
    }

    /// Set the secondary label.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the group heading.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    /// Set the accent color.
    #[must_use]
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }
}

/// Lets the user pick one option out of a list.
pub trait Selector {
    /// Show `options` under `title` and wait for a choice.
    ///
    /// Returns `Ok(None)` when the user dismisses the selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be displayed.
    fn show<T>(&mut self, title: &str, options: Vec<SelectorOption<T>>) -> Result<Option<T>>;
}

impl<S: Selector + ?Sized> Selector for &mut S {
    fn show<T>(&mut self, title: &str, options: Vec<SelectorOption<T>>) -> Result<Option<T>> {
        (**self).show(title, options)
    }
}

/// Asks the user for a line of text.
pub trait Prompt {
    /// Open a prompt seeded with `initial` and wait for a submission.
    ///
    /// Returns `Ok(None)` when the user dismisses the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be displayed.
    fn open(&mut self, title: &str, initial: &str) -> Result<Option<String>>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn open(&mut self, title: &str, initial: &str) -> Result<Option<String>> {
        (**self).open(title, initial)
    }
}

/// Fire-and-forget user notices.
pub trait Notifier {
    /// Report something that happened.
    fn info(&self, message: &str);
    /// Report something that went wrong.
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Trim a prompt submission, treating whitespace-only input as no input.
#[must_use]
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
