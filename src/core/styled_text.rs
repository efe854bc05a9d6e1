//! Text values carrying optional ANSI styling
//!
//! Styling is kept beside the text rather than baked into it: a
//! [`StyledText`] always hands back its original text through
//! [`StyledText::plain`], and only produces escape sequences when a caller
//! explicitly asks for [`StyledText::styled`] or `render(true)`.

use super::style::{make_colors_prefix, StyleCode, RESET_CODE};
use std::borrow::Cow;
use std::fmt;
use std::ops::Add;

/// Plain text paired with zero or more style codes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    plain: String,
    codes: Vec<StyleCode>,
}

impl StyledText {
    /// # Example
    ///
    /// ```
    /// use styled_logger::{StyleCode, StyledText};
    ///
    /// let text = StyledText::new("X", [StyleCode::BOLD, StyleCode::RED]);
    /// assert_eq!(text.plain(), "X");
    /// assert_eq!(text.styled(), "\x1b[1;31mX\x1b[0m");
    /// ```
    pub fn new(text: impl Into<String>, codes: impl IntoIterator<Item = StyleCode>) -> Self {
        Self {
            plain: text.into(),
            codes: codes.into_iter().collect(),
        }
    }

    /// Unstyled text
    pub fn unstyled(text: impl Into<String>) -> Self {
        Self::new(text, [])
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn codes(&self) -> &[StyleCode] {
        &self.codes
    }

    pub fn is_styled(&self) -> bool {
        !self.codes.is_empty()
    }

    /// `prefix(codes) + text + reset`, or the bare text when there are no codes
    pub fn styled(&self) -> String {
        self.render(true).into_owned()
    }

    /// Styled rendering when `colored`, plain text otherwise
    pub fn render(&self, colored: bool) -> Cow<'_, str> {
        if !colored || self.codes.is_empty() {
            return Cow::Borrowed(&self.plain);
        }
        Cow::Owned(format!(
            "{}{}{}",
            make_colors_prefix(&self.codes),
            self.plain,
            RESET_CODE
        ))
    }

    /// Fill each `{}` in this text with the next argument
    ///
    /// Literal parts of the template keep this text's codes, while each
    /// argument keeps its own segments and styles. `{{` and `}}` stand for
    /// literal braces. A `{}` with no argument left is kept as-is and
    /// surplus arguments are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use styled_logger::{StyleCode, StyledText};
    ///
    /// let message = StyledText::unstyled("took {}")
    ///     .format([StyledText::new("12s", [StyleCode::GREEN]).into()]);
    /// assert_eq!(message.plain(), "took 12s");
    /// assert_eq!(message.render(true), "took \x1b[32m12s\x1b[0m");
    /// ```
    pub fn format(&self, args: impl IntoIterator<Item = LogMessage>) -> LogMessage {
        let mut args = args.into_iter();
        let mut message = LogMessage::new();
        let mut literal = String::new();
        let mut chars = self.plain.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, chars.peek()) {
                ('{', Some('{')) | ('}', Some('}')) => {
                    chars.next();
                    literal.push(c);
                }
                ('{', Some('}')) => {
                    chars.next();
                    match args.next() {
                        Some(arg) => {
                            if !literal.is_empty() {
                                let text = std::mem::take(&mut literal);
                                message.push(Self::new(text, self.codes.clone()));
                            }
                            message = message + arg;
                        }
                        None => literal.push_str("{}"),
                    }
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            message.push(Self::new(literal, self.codes.clone()));
        }
        message
    }

    pub(crate) fn map_text(&self, f: impl FnOnce(&str) -> String) -> Self {
        Self {
            plain: f(&self.plain),
            codes: self.codes.clone(),
        }
    }
}

/// Writes the plain text; styled output always goes through [`StyledText::render`].
impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::unstyled(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::unstyled(text)
    }
}

/// A log message: an ordered run of independently styled fragments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogMessage {
    segments: Vec<StyledText>,
}

impl LogMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[StyledText] {
        &self.segments
    }

    pub fn is_styled(&self) -> bool {
        self.segments.iter().any(StyledText::is_styled)
    }

    pub fn push(&mut self, segment: impl Into<StyledText>) {
        self.segments.push(segment.into());
    }

    pub fn plain(&self) -> String {
        self.segments.iter().map(StyledText::plain).collect()
    }

    pub fn render(&self, colored: bool) -> String {
        self.segments.iter().map(|s| s.render(colored)).collect()
    }

    pub(crate) fn map_text(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            segments: self.segments.iter().map(|s| s.map_text(&f)).collect(),
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(segment.plain())?;
        }
        Ok(())
    }
}

impl From<StyledText> for LogMessage {
    fn from(segment: StyledText) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        StyledText::from(text).into()
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        StyledText::from(text).into()
    }
}

impl From<&String> for LogMessage {
    fn from(text: &String) -> Self {
        StyledText::from(text.as_str()).into()
    }
}

impl<T: Into<LogMessage>> Add<T> for LogMessage {
    type Output = LogMessage;

    fn add(mut self, rhs: T) -> LogMessage {
        self.segments.extend(rhs.into().segments);
        self
    }
}

impl<T: Into<LogMessage>> Add<T> for StyledText {
    type Output = LogMessage;

    fn add(self, rhs: T) -> LogMessage {
        LogMessage::from(self) + rhs
    }
}
