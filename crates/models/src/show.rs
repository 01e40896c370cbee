use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use time::Date;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Broadcast format of a show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum ShowKind {
    #[default]
    Unknown,
    Tv,
    Ova,
    Movie,
    TvSpecial,
    Web,
    Other,
}
impl ShowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowKind::Unknown => "unknown",
            ShowKind::Tv => "TV",
            ShowKind::Ova => "OVA",
            ShowKind::Movie => "Movie",
            ShowKind::TvSpecial => "TV Special",
            ShowKind::Web => "Web",
            ShowKind::Other => "Other",
        }
    }
}
impl FromStr for ShowKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "" | "unknown" => Self::Unknown,
            "tv" | "tvseries" => Self::Tv,
            "ova" => Self::Ova,
            "movie" => Self::Movie,
            "tvspecial" | "special" => Self::TvSpecial,
            "web" | "ona" => Self::Web,
            "other" => Self::Other,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "show kind",
                value: s.to_string(),
            }),
        })
    }
}
impl TryFrom<String> for ShowKind {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl From<ShowKind> for String {
    fn from(value: ShowKind) -> Self {
        value.as_str().to_string()
    }
}
impl Display for ShowKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// How the catalog classifies a title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TitleKind {
    /// The single primary title (usually romanized)
    Main,
    /// An official title in some language
    Official,
    #[default]
    Synonym,
    Short,
}

/// A language-tagged title.
///
/// Languages are catalog codes: `en`, `ja`, and `x-jat` for romanized
/// Japanese.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Title {
    pub language: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: TitleKind,
    pub value: String,
}
impl Title {
    pub fn new(language: impl Into<String>, kind: TitleKind, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            kind,
            value: value.into(),
        }
    }
}

/// A catalog show (the "anime" record).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowView {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ShowKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub air_date: Option<Date>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub titles: Vec<Title>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episode_count_normal: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episode_count_special: u32,
}
impl ShowView {
    pub fn new(id: u64, kind: ShowKind) -> Self {
        Self {
            id,
            kind,
            air_date: None,
            titles: vec![],
            episode_count_normal: 0,
            episode_count_special: 0,
        }
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.titles.push(title);
        self
    }

    pub fn with_air_date(mut self, air_date: impl Into<Option<Date>>) -> Self {
        self.air_date = air_date.into();
        self
    }

    pub fn with_episode_counts(mut self, normal: u32, special: u32) -> Self {
        self.episode_count_normal = normal;
        self.episode_count_special = special;
        self
    }

    /// Year the show started airing, or `0` when the air date is unknown.
    pub fn year(&self) -> i32 {
        self.air_date.map(|d| d.year()).unwrap_or(0)
    }

    /// The main title, regardless of language.
    pub fn main_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.kind == TitleKind::Main && !t.value.trim().is_empty())
            .map(|t| t.value.as_str())
    }

    /// The official title in the given language.
    pub fn official_title(&self, language: &str) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| {
                t.kind == TitleKind::Official && t.language.eq_ignore_ascii_case(language) && !t.value.trim().is_empty()
            })
            .map(|t| t.value.as_str())
    }
}

/// A local grouping of one show's episodes, carrying the name the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesView {
    pub id: u64,
    pub show_id: u64,
    /// Preferred title, used as the fallback placement sub-folder
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::date;

    #[rstest]
    #[case("TV", ShowKind::Tv)]
    #[case("TV Special", ShowKind::TvSpecial)]
    #[case("tv-special", ShowKind::TvSpecial)]
    #[case("Movie", ShowKind::Movie)]
    #[case("unknown", ShowKind::Unknown)]
    fn test_parse_kind(#[case] input: &str, #[case] expected: ShowKind) {
        assert_eq!(input.parse::<ShowKind>().unwrap(), expected);
    }

    #[test]
    fn test_titles() {
        let show = ShowView::new(1, ShowKind::Tv)
            .with_title(Title::new("x-jat", TitleKind::Main, "Shingeki no Kyojin"))
            .with_title(Title::new("en", TitleKind::Official, "Attack on Titan"))
            .with_title(Title::new("en", TitleKind::Synonym, "AoT"));
        assert_eq!(show.main_title(), Some("Shingeki no Kyojin"));
        assert_eq!(show.official_title("en"), Some("Attack on Titan"));
        assert_eq!(show.official_title("ja"), None);
    }

    #[test]
    fn test_year() {
        let show = ShowView::new(1, ShowKind::Tv);
        assert_eq!(show.year(), 0);
        assert_eq!(show.with_air_date(date!(2013 - 04 - 07)).year(), 2013);
    }
}
