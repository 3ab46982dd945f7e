// ABOUTME: Typed slide content and its construction-time validation
// ABOUTME: One variant per content kind, each with its own payload

use crate::errors::{DeckError, Result};
use std::fmt;
use std::str::FromStr;

/// The kind of a [`Content`] item, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Text,
    BulletList,
    NumberedList,
    Code,
    Image,
    Equation,
    Table,
    Diagram,
    Media,
    Markdown,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::BulletList => "bullet_list",
            ContentType::NumberedList => "numbered_list",
            ContentType::Code => "code",
            ContentType::Image => "image",
            ContentType::Equation => "equation",
            ContentType::Table => "table",
            ContentType::Diagram => "diagram",
            ContentType::Media => "media",
            ContentType::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a media item is played as video or audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl FromStr for MediaKind {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            other => Err(DeckError::validation(
                "media_type",
                format!("must be either 'video' or 'audio', got {:?}", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    code: String,
    language: String,
}

impl CodeBlock {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    url: String,
    caption: Option<String>,
}

impl Image {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

/// An equation with an optional symbol legend, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    equation: String,
    description: Vec<(String, String)>,
}

impl Equation {
    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn description(&self) -> &[(String, String)] {
        &self.description
    }
}

/// A table whose rows all have as many cells as there are headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    url: String,
    kind: MediaKind,
}

impl Media {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// One piece of slide content. Immutable once constructed; the constructors
/// enforce the payload constraints of each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    BulletList(Vec<String>),
    NumberedList(Vec<String>),
    Code(CodeBlock),
    Image(Image),
    Equation(Equation),
    Table(Table),
    Diagram(String),
    Media(Media),
    Markdown(String),
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeckError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn collect_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn bullet_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Content::BulletList(collect_strings(items))
    }

    pub fn numbered_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Content::NumberedList(collect_strings(items))
    }

    pub fn code(code: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        let code = code.into();
        let language = language.into();
        require_non_empty("code", &code)?;
        if language.chars().any(char::is_whitespace) {
            return Err(DeckError::validation(
                "language",
                format!("{:?} must not contain whitespace", language),
            ));
        }
        Ok(Content::Code(CodeBlock { code, language }))
    }

    pub fn image(url: impl Into<String>, caption: Option<&str>) -> Result<Self> {
        let url = url.into();
        require_non_empty("url", &url)?;
        Ok(Content::Image(Image {
            url,
            caption: caption.filter(|c| !c.is_empty()).map(str::to_string),
        }))
    }

    pub fn equation(equation: impl Into<String>) -> Result<Self> {
        Self::equation_with_legend(equation, Vec::<(String, String)>::new())
    }

    /// Equation with a legend mapping each symbol to its meaning.
    pub fn equation_with_legend<I, K, V>(equation: impl Into<String>, description: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let equation = equation.into();
        require_non_empty("equation", &equation)?;
        let description: Vec<(String, String)> = description
            .into_iter()
            .map(|(symbol, meaning)| (symbol.into(), meaning.into()))
            .collect();
        if description.iter().any(|(symbol, _)| symbol.trim().is_empty()) {
            return Err(DeckError::validation(
                "description",
                "legend symbols must not be empty",
            ));
        }
        for (i, (symbol, _)) in description.iter().enumerate() {
            if description[..i].iter().any(|(earlier, _)| earlier == symbol) {
                return Err(DeckError::validation(
                    "description",
                    format!("legend symbol {:?} appears more than once", symbol),
                ));
            }
        }
        Ok(Content::Equation(Equation {
            equation,
            description,
        }))
    }

    pub fn table<H, HS, R, RI, RS>(headers: H, rows: R) -> Result<Self>
    where
        H: IntoIterator<Item = HS>,
        HS: Into<String>,
        R: IntoIterator<Item = RI>,
        RI: IntoIterator<Item = RS>,
        RS: Into<String>,
    {
        let headers = collect_strings(headers);
        if headers.is_empty() {
            return Err(DeckError::validation("headers", "a table needs at least one header"));
        }
        let rows: Vec<Vec<String>> = rows.into_iter().map(collect_strings).collect();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(DeckError::validation(
                "rows",
                format!(
                    "row {} has {} cells but there are {} headers",
                    index,
                    row.len(),
                    headers.len()
                ),
            ));
        }
        Ok(Content::Table(Table { headers, rows }))
    }

    pub fn diagram(source: impl Into<String>) -> Self {
        Content::Diagram(source.into())
    }

    pub fn media(url: impl Into<String>, kind: MediaKind) -> Result<Self> {
        let url = url.into();
        require_non_empty("url", &url)?;
        Ok(Content::Media(Media { url, kind }))
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Content::Markdown(source.into())
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Text(_) => ContentType::Text,
            Content::BulletList(_) => ContentType::BulletList,
            Content::NumberedList(_) => ContentType::NumberedList,
            Content::Code(_) => ContentType::Code,
            Content::Image(_) => ContentType::Image,
            Content::Equation(_) => ContentType::Equation,
            Content::Table(_) => ContentType::Table,
            Content::Diagram(_) => ContentType::Diagram,
            Content::Media(_) => ContentType::Media,
            Content::Markdown(_) => ContentType::Markdown,
        }
    }
}
