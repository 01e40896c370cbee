use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use time::Date;

use super::sanitize;
use crate::error::{Error, ErrorKind};
use crate::show::Title;

/// Catalog classification of an episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum EpisodeKind {
    #[default]
    Normal,
    Special,
    Credit,
    Trailer,
    Parody,
    Other,
}
impl EpisodeKind {
    /// Single-letter code used by `H(...)` tests.
    ///
    /// `U` (unknown) is reserved for episodes the catalog could not classify;
    /// since every [`EpisodeKind`] is known, it is never produced here.
    pub fn code(&self) -> char {
        match self {
            EpisodeKind::Normal => 'E',
            EpisodeKind::Special => 'S',
            EpisodeKind::Credit => 'C',
            EpisodeKind::Trailer => 'T',
            EpisodeKind::Parody => 'P',
            EpisodeKind::Other => 'O',
        }
    }

    /// Letter prepended to episode numbers in synthesized names. Normal
    /// episodes have no prefix.
    pub fn number_prefix(&self) -> &'static str {
        match self {
            EpisodeKind::Normal => "",
            EpisodeKind::Special => "S",
            EpisodeKind::Credit => "C",
            EpisodeKind::Trailer => "T",
            EpisodeKind::Parody => "P",
            EpisodeKind::Other => "O",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeKind::Normal => "Normal",
            EpisodeKind::Special => "Special",
            EpisodeKind::Credit => "Credit",
            EpisodeKind::Trailer => "Trailer",
            EpisodeKind::Parody => "Parody",
            EpisodeKind::Other => "Other",
        }
    }
}
impl FromStr for EpisodeKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "e" | "normal" | "episode" => Self::Normal,
            "s" | "special" => Self::Special,
            "c" | "credit" | "credits" => Self::Credit,
            "t" | "trailer" => Self::Trailer,
            "p" | "parody" => Self::Parody,
            "o" | "other" => Self::Other,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "episode kind",
                value: s.to_string(),
            }),
        })
    }
}
impl TryFrom<String> for EpisodeKind {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl From<EpisodeKind> for String {
    fn from(value: EpisodeKind) -> Self {
        value.as_str().to_string()
    }
}
impl Display for EpisodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A single catalog episode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeView {
    pub id: u64,
    /// Catalog ID of the show this episode belongs to
    pub show_id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: EpisodeKind,
    /// Number within its kind (special 3 is `S3`, not the third episode overall)
    pub number: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub air_date: Option<Date>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub titles: Vec<Title>,
}
impl EpisodeView {
    pub fn new(id: u64, show_id: u64, kind: EpisodeKind, number: u32) -> Self {
        Self {
            id,
            show_id,
            kind,
            number,
            air_date: None,
            titles: vec![],
        }
    }

    pub fn with_air_date(mut self, air_date: impl Into<Option<Date>>) -> Self {
        self.air_date = air_date.into();
        self
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.titles.push(title);
        self
    }

    /// Returns the first title in the given language, if any.
    pub fn title(&self, language: &str) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.language.eq_ignore_ascii_case(language) && !t.value.trim().is_empty())
            .map(|t| t.value.as_str())
    }
}
