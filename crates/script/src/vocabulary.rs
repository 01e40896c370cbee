//! The fixed words of the script language: `%`-prefixed placeholder tokens
//! usable inside `ADD` templates and `I(...)` tests, and the action keywords.

use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Marks a placeholder inside an `ADD` template.
pub const TOKEN_PREFIX: char = '%';

/// A placeholder substituted with file, episode, or show data.
///
/// Token names are case-sensitive: `%ed2` and `%ED2` are the lower- and
/// upper-case forms of the same hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Main show title (usually romanized)
    ShowTitleMain,
    /// Official Japanese show title
    ShowTitleKanji,
    /// Official English show title
    ShowTitleEnglish,
    /// Romanized episode title
    EpisodeTitleRomaji,
    /// English episode title
    EpisodeTitleEnglish,
    EpisodeNumber,
    /// Number of normal episodes in the show
    EpisodeCount,
    GroupShortName,
    GroupLongName,
    HashLower,
    HashUpper,
    ChecksumLower,
    ChecksumUpper,
    FileVersion,
    Source,
    Resolution,
    VideoCodec,
    AudioCodec,
    BitDepth,
    DubLanguages,
    SubLanguages,
    Year,
    ShowKind,
    FileId,
    ShowId,
    EpisodeId,
    GroupId,
    /// Release group's file name, without extension
    OriginalFileName,
    Censored,
    Deprecated,
}
impl Token {
    pub const ALL: [Token; 30] = [
        Token::ShowTitleMain,
        Token::ShowTitleKanji,
        Token::ShowTitleEnglish,
        Token::EpisodeTitleRomaji,
        Token::EpisodeTitleEnglish,
        Token::EpisodeNumber,
        Token::EpisodeCount,
        Token::GroupShortName,
        Token::GroupLongName,
        Token::HashLower,
        Token::HashUpper,
        Token::ChecksumLower,
        Token::ChecksumUpper,
        Token::FileVersion,
        Token::Source,
        Token::Resolution,
        Token::VideoCodec,
        Token::AudioCodec,
        Token::BitDepth,
        Token::DubLanguages,
        Token::SubLanguages,
        Token::Year,
        Token::ShowKind,
        Token::FileId,
        Token::ShowId,
        Token::EpisodeId,
        Token::GroupId,
        Token::OriginalFileName,
        Token::Censored,
        Token::Deprecated,
    ];

    /// The token's name as written after the `%` sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::ShowTitleMain => "ann",
            Token::ShowTitleKanji => "kan",
            Token::ShowTitleEnglish => "eng",
            Token::EpisodeTitleRomaji => "epn",
            Token::EpisodeTitleEnglish => "epr",
            Token::EpisodeNumber => "enr",
            Token::EpisodeCount => "eps",
            Token::GroupShortName => "grp",
            Token::GroupLongName => "grl",
            Token::HashLower => "ed2",
            Token::HashUpper => "ED2",
            Token::ChecksumLower => "crc",
            Token::ChecksumUpper => "CRC",
            Token::FileVersion => "ver",
            Token::Source => "src",
            Token::Resolution => "res",
            Token::VideoCodec => "vid",
            Token::AudioCodec => "aud",
            Token::BitDepth => "bit",
            Token::DubLanguages => "dub",
            Token::SubLanguages => "sub",
            Token::Year => "yea",
            Token::ShowKind => "typ",
            Token::FileId => "fid",
            Token::ShowId => "aid",
            Token::EpisodeId => "eid",
            Token::GroupId => "gid",
            Token::OriginalFileName => "sna",
            Token::Censored => "cen",
            Token::Deprecated => "dep",
        }
    }

    /// The placeholder as it appears inside a template, e.g. `%ann`.
    pub fn placeholder(&self) -> String {
        format!("{TOKEN_PREFIX}{}", self.as_str())
    }
}
impl FromStr for Token {
    type Err = Error;

    /// Accepts the token name with or without its leading `%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix(TOKEN_PREFIX).unwrap_or(name);
        Token::ALL
            .iter()
            .find(|t| t.as_str() == name)
            .copied()
            .ok_or_else(|| exn::Exn::from(ErrorKind::InvalidArgument(format!("unknown token `{s}`"))))
    }
}
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{TOKEN_PREFIX}{}", self.as_str())
    }
}

/// What a script line does once its condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Add,
    Replace,
    /// Abort the whole run for this file.
    Fail,
}
impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Add => "ADD",
            Keyword::Replace => "REPLACE",
            Keyword::Fail => "FAIL",
        }
    }

    /// Matches the keyword at the start of an action, case-insensitively,
    /// returning the keyword and the remaining argument text.
    pub fn split(action: &str) -> Option<(Keyword, &str)> {
        let action = action.trim_start();
        [Keyword::Add, Keyword::Replace, Keyword::Fail].into_iter().find_map(|keyword| {
            let word = keyword.as_str();
            let head = action.get(..word.len())?;
            let rest = &action[word.len()..];
            let boundary = rest.is_empty() || rest.starts_with(char::is_whitespace);
            (head.eq_ignore_ascii_case(word) && boundary).then_some((keyword, rest))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_token_names_are_unique() {
        for (i, a) in Token::ALL.iter().enumerate() {
            for b in &Token::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[rstest]
    #[case("ann", Token::ShowTitleMain)]
    #[case("%ann", Token::ShowTitleMain)]
    #[case(" eng ", Token::ShowTitleEnglish)]
    #[case("ed2", Token::HashLower)]
    #[case("ED2", Token::HashUpper)]
    #[case("CRC", Token::ChecksumUpper)]
    fn test_parse_token(#[case] input: &str, #[case] expected: Token) {
        assert_eq!(input.parse::<Token>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_token() {
        assert!("nope".parse::<Token>().is_err());
        assert!("ANN".parse::<Token>().is_err());
    }

    #[rstest]
    #[case("ADD '%ann'", Some((Keyword::Add, " '%ann'")))]
    #[case("add 'x'", Some((Keyword::Add, " 'x'")))]
    #[case("REPLACE ' ' '_'", Some((Keyword::Replace, " ' ' '_'")))]
    #[case("FAIL", Some((Keyword::Fail, "")))]
    #[case("ADDITION 'x'", None)]
    #[case("RENAME 'x'", None)]
    fn test_split_keyword(#[case] action: &str, #[case] expected: Option<(Keyword, &str)>) {
        assert_eq!(Keyword::split(action), expected);
    }
}
