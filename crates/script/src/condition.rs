//! Single-letter tests: the `A(5)` in `IF A(5) DO ...`.
//!
//! Each letter is one [`Test`] variant, evaluated against a [`RenameContext`]
//! by a single `match`. Arguments share one small operator grammar:
//!
//! ```text
//! argument := ["!"] [">" | ">=" | "<" | "<="] value
//! ```
//!
//! A leading `!` negates equality. When a relational operator follows, the
//! `!` carries no meaning and is ignored. Tests that only support equality
//! (`A`, `G`, `D`, `S`, `R`, `T`, `H`, `I`, `M`, `N`) read the relational
//! characters as part of the value, which then fails to match.
//!
//! Evaluation never fails: any error (unparseable argument, data the file
//! does not have) makes the test `false`.

use crate::context::RenameContext;
use crate::error::{ErrorKind, Result};
use crate::vocabulary::Token;
use exn::OptionExt;
use shelf_models::{ShowKind, Source};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// The closed set of test letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Test {
    /// `A`: show ID
    ShowId,
    /// `G`: release group ID (`unknown` is `0`)
    GroupId,
    /// `D`: audio (dub) language
    AudioLanguage,
    /// `S`: subtitle language (`none` means no subtitles)
    SubtitleLanguage,
    /// `F`: file version
    FileVersion,
    /// `Z`: video bit depth
    BitDepth,
    /// `W`: video width
    VideoWidth,
    /// `U`: video height
    VideoHeight,
    /// `R`: release source medium
    Source,
    /// `T`: show kind
    ShowKind,
    /// `Y`: year the show started airing
    Year,
    /// `E`: number of the first episode
    EpisodeNumber,
    /// `H`: kind code of the first episode
    EpisodeKind,
    /// `X`: normal episode count of the show
    EpisodeCount,
    /// `I`: token existence
    HasToken,
    /// `M`: manually linked file
    ManuallyLinked,
    /// `N`: file has linked episodes
    HasEpisodes,
    /// `C`: video codec (reserved)
    VideoCodec,
    /// `J`: audio codec (reserved)
    AudioCodec,
}
impl Test {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            'A' => Test::ShowId,
            'G' => Test::GroupId,
            'D' => Test::AudioLanguage,
            'S' => Test::SubtitleLanguage,
            'F' => Test::FileVersion,
            'Z' => Test::BitDepth,
            'W' => Test::VideoWidth,
            'U' => Test::VideoHeight,
            'R' => Test::Source,
            'T' => Test::ShowKind,
            'Y' => Test::Year,
            'E' => Test::EpisodeNumber,
            'H' => Test::EpisodeKind,
            'X' => Test::EpisodeCount,
            'I' => Test::HasToken,
            'M' => Test::ManuallyLinked,
            'N' => Test::HasEpisodes,
            'C' => Test::VideoCodec,
            'J' => Test::AudioCodec,
            _ => return None,
        })
    }

    pub fn letter(&self) -> char {
        match self {
            Test::ShowId => 'A',
            Test::GroupId => 'G',
            Test::AudioLanguage => 'D',
            Test::SubtitleLanguage => 'S',
            Test::FileVersion => 'F',
            Test::BitDepth => 'Z',
            Test::VideoWidth => 'W',
            Test::VideoHeight => 'U',
            Test::Source => 'R',
            Test::ShowKind => 'T',
            Test::Year => 'Y',
            Test::EpisodeNumber => 'E',
            Test::EpisodeKind => 'H',
            Test::EpisodeCount => 'X',
            Test::HasToken => 'I',
            Test::ManuallyLinked => 'M',
            Test::HasEpisodes => 'N',
            Test::VideoCodec => 'C',
            Test::AudioCodec => 'J',
        }
    }
}

/// How an argument's value is compared with the file's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

/// A test argument split into its operator and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument<'a> {
    pub operator: Operator,
    pub value: &'a str,
}
impl<'a> Argument<'a> {
    /// Parses the full operator grammar: `!`, then at most one of `>`, `>=`,
    /// `<`, `<=`.
    pub fn relational(raw: &'a str) -> Self {
        let (negated, rest) = Self::strip_negation(raw);
        let (operator, rest) = if let Some(rest) = rest.strip_prefix('>') {
            match rest.strip_prefix('=') {
                Some(rest) => (Operator::GreaterOrEqual, rest),
                None => (Operator::Greater, rest),
            }
        } else if let Some(rest) = rest.strip_prefix('<') {
            match rest.strip_prefix('=') {
                Some(rest) => (Operator::LessOrEqual, rest),
                None => (Operator::Less, rest),
            }
        } else if negated {
            (Operator::NotEqual, rest)
        } else {
            (Operator::Equal, rest)
        };
        Self { operator, value: rest.trim() }
    }

    /// Parses only the leading `!`.
    pub fn equality(raw: &'a str) -> Self {
        let (negated, rest) = Self::strip_negation(raw);
        let operator = if negated { Operator::NotEqual } else { Operator::Equal };
        Self { operator, value: rest.trim() }
    }

    fn strip_negation(raw: &str) -> (bool, &str) {
        let raw = raw.trim();
        match raw.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, raw),
        }
    }

    pub fn number<T: FromStr>(&self) -> Result<T> {
        self.value.parse().ok().ok_or_raise(|| ErrorKind::InvalidArgument(self.value.to_string()))
    }

    /// Orders `actual` against `expected` according to the operator.
    pub fn compare<T: Ord>(&self, actual: T, expected: T) -> bool {
        match self.operator {
            Operator::Equal => actual == expected,
            Operator::NotEqual => actual != expected,
            Operator::Greater => actual > expected,
            Operator::GreaterOrEqual => actual >= expected,
            Operator::Less => actual < expected,
            Operator::LessOrEqual => actual <= expected,
        }
    }

    /// Applies negation to the outcome of an equality check. Relational
    /// operators never reach here from equality-only tests, since their
    /// arguments are parsed with [`equality`](Self::equality).
    pub fn holds(&self, matched: bool) -> bool {
        match self.operator {
            Operator::NotEqual => !matched,
            _ => matched,
        }
    }

    /// Compares the file's value with the argument's numeric value.
    fn compare_number<T: FromStr + Ord>(&self, actual: T) -> Result<bool> {
        let expected = self.number()?;
        Ok(self.compare(actual, expected))
    }
}

/// One parsed `<letter>(<argument>)` test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub test: Test,
    pub argument: String,
}
impl Condition {
    pub fn new(test: Test, argument: impl Into<String>) -> Self {
        Self {
            test,
            argument: argument.into(),
        }
    }

    /// Evaluates the test, turning every failure into `false`.
    pub fn evaluate(&self, ctx: &RenameContext<'_>) -> bool {
        match self.try_evaluate(ctx) {
            Ok(result) => result,
            Err(e) => {
                tracing::trace!(condition = %self, error = ?e, "test could not be evaluated; treating as false");
                false
            },
        }
    }

    fn try_evaluate(&self, ctx: &RenameContext<'_>) -> Result<bool> {
        let raw = self.argument.as_str();
        let file = ctx.file;
        match self.test {
            Test::ShowId => {
                let arg = Argument::equality(raw);
                let expected: u64 = arg.number()?;
                Ok(arg.holds(ctx.show.id == expected))
            },
            Test::GroupId => {
                let arg = Argument::equality(raw);
                let expected: u64 = match arg.value.eq_ignore_ascii_case("unknown") {
                    true => 0,
                    false => arg.number()?,
                };
                let actual = file.catalog.as_ref().map(|c| c.group_id()).unwrap_or(0);
                Ok(arg.holds(actual == expected))
            },
            Test::AudioLanguage => {
                let arg = Argument::equality(raw);
                let catalog = file.catalog.as_ref().ok_or_raise(|| ErrorKind::MissingData("catalog file"))?;
                let found = catalog.audio_languages.iter().any(|l| l.trim().eq_ignore_ascii_case(arg.value));
                Ok(arg.holds(found))
            },
            Test::SubtitleLanguage => {
                let arg = Argument::equality(raw);
                let tracks = file.subtitle_tracks();
                let found = match arg.value.eq_ignore_ascii_case("none") {
                    true => tracks.is_empty(),
                    false => tracks.iter().any(|l| l.trim().eq_ignore_ascii_case(arg.value)),
                };
                Ok(arg.holds(found))
            },
            Test::FileVersion => {
                let catalog = file.catalog.as_ref().ok_or_raise(|| ErrorKind::MissingData("catalog file"))?;
                Argument::relational(raw).compare_number(catalog.version)
            },
            Test::BitDepth => {
                let depth = file
                    .video
                    .as_ref()
                    .and_then(|v| v.bit_depth)
                    .ok_or_raise(|| ErrorKind::MissingData("video bit depth"))?;
                Argument::relational(raw).compare_number(depth)
            },
            Test::VideoWidth => {
                let video = file.video.as_ref().ok_or_raise(|| ErrorKind::MissingData("video stream"))?;
                Argument::relational(raw).compare_number(video.width)
            },
            Test::VideoHeight => {
                let video = file.video.as_ref().ok_or_raise(|| ErrorKind::MissingData("video stream"))?;
                Argument::relational(raw).compare_number(video.height)
            },
            Test::Source => {
                let arg = Argument::equality(raw);
                let expected: Source =
                    arg.value.parse().ok().ok_or_raise(|| ErrorKind::InvalidArgument(arg.value.to_string()))?;
                let actual = file.catalog.as_ref().map(|c| c.source).unwrap_or_default();
                Ok(arg.holds(actual == expected))
            },
            Test::ShowKind => {
                let arg = Argument::equality(raw);
                let expected: ShowKind =
                    arg.value.parse().ok().ok_or_raise(|| ErrorKind::InvalidArgument(arg.value.to_string()))?;
                Ok(arg.holds(ctx.show.kind == expected))
            },
            Test::Year => Argument::relational(raw).compare_number(ctx.show.year()),
            Test::EpisodeNumber => {
                let episode = ctx.first_episode().ok_or_raise(|| ErrorKind::MissingData("episode"))?;
                Argument::relational(raw).compare_number(episode.number)
            },
            Test::EpisodeKind => {
                let arg = Argument::equality(raw);
                let episode = ctx.first_episode().ok_or_raise(|| ErrorKind::MissingData("episode"))?;
                let mut chars = arg.value.chars();
                let expected = match (chars.next(), chars.next()) {
                    (Some(c), None) if "ESCPTOU".contains(c.to_ascii_uppercase()) => c.to_ascii_uppercase(),
                    _ => exn::bail!(ErrorKind::InvalidArgument(arg.value.to_string())),
                };
                Ok(arg.holds(episode.kind.code() == expected))
            },
            Test::EpisodeCount => Argument::relational(raw).compare_number(ctx.show.episode_count_normal),
            Test::HasToken => {
                let arg = Argument::equality(raw);
                let token: Token = arg.value.parse()?;
                Ok(arg.holds(is_present(token, ctx)))
            },
            Test::ManuallyLinked => {
                let arg = Argument::equality(raw);
                let manual = file.manually_linked || (file.catalog.is_none() && !ctx.episodes.is_empty());
                Ok(arg.holds(manual))
            },
            Test::HasEpisodes => Ok(Argument::equality(raw).holds(!ctx.episodes.is_empty())),
            // Reserved letters; kept so existing scripts still parse.
            Test::VideoCodec | Test::AudioCodec => Ok(false),
        }
    }
}
impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}({})", self.test.letter(), self.argument)
    }
}

fn non_empty(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.trim().is_empty())
}

/// Existence predicate behind `I(<token>)`.
pub fn is_present(token: Token, ctx: &RenameContext<'_>) -> bool {
    let file = ctx.file;
    let catalog = file.catalog.as_ref();
    let group = catalog.and_then(|c| c.group.as_ref());
    let episode = ctx.first_episode();
    match token {
        Token::ShowTitleMain => non_empty(ctx.show.main_title()),
        Token::ShowTitleKanji => non_empty(ctx.show.official_title("ja")),
        Token::ShowTitleEnglish => non_empty(ctx.show.official_title("en")),
        Token::EpisodeTitleRomaji => non_empty(episode.and_then(|e| e.title("x-jat"))),
        Token::EpisodeTitleEnglish => non_empty(episode.and_then(|e| e.title("en"))),
        Token::EpisodeNumber | Token::EpisodeId => episode.is_some(),
        Token::EpisodeCount => ctx.show.episode_count_normal > 0,
        Token::GroupShortName => non_empty(group.map(|g| g.short_name.as_str())),
        Token::GroupLongName => non_empty(group.map(|g| g.long_name.as_str())),
        Token::GroupId => group.is_some_and(|g| g.id != 0),
        Token::HashLower | Token::HashUpper => !file.hash.trim().is_empty(),
        Token::ChecksumLower | Token::ChecksumUpper => non_empty(file.crc32.as_deref()),
        Token::FileVersion => catalog.is_some(),
        Token::Source => catalog.is_some_and(|c| c.source != Source::Unknown),
        Token::Resolution => file.video.as_ref().is_some_and(|v| v.width > 0 && v.height > 0),
        Token::VideoCodec => non_empty(file.video.as_ref().and_then(|v| v.codec.as_deref())),
        Token::AudioCodec => !file.audio_codecs.is_empty(),
        Token::BitDepth => file.video.as_ref().is_some_and(|v| v.bit_depth.is_some()),
        Token::DubLanguages => !file.audio_tracks().is_empty(),
        Token::SubLanguages => !file.subtitle_tracks().is_empty(),
        Token::Year => ctx.show.air_date.is_some(),
        Token::ShowKind => ctx.show.kind != ShowKind::Unknown,
        Token::FileId => true,
        Token::ShowId => ctx.show.id != 0,
        Token::OriginalFileName => non_empty(catalog.and_then(|c| c.original_file_name.as_deref())),
        Token::Censored => catalog.is_some_and(|c| c.censored),
        Token::Deprecated => catalog.is_some_and(|c| c.deprecated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::fixture;
    use rstest::rstest;

    fn check(test: char, argument: &str) -> bool {
        let fixture = fixture();
        let condition = Condition::new(Test::from_letter(test).unwrap(), argument);
        condition.evaluate(&fixture.context())
    }

    #[rstest]
    #[case("2", Operator::Equal, "2")]
    #[case("!2", Operator::NotEqual, "2")]
    #[case(">2", Operator::Greater, "2")]
    #[case(">=2", Operator::GreaterOrEqual, "2")]
    #[case("<2", Operator::Less, "2")]
    #[case("<=2", Operator::LessOrEqual, "2")]
    #[case("!>=2", Operator::GreaterOrEqual, "2")]
    #[case(" >= 2 ", Operator::GreaterOrEqual, "2")]
    #[case("><2", Operator::Greater, "<2")]
    fn test_parse_relational(#[case] raw: &str, #[case] operator: Operator, #[case] value: &str) {
        assert_eq!(Argument::relational(raw), Argument { operator, value });
    }

    #[test]
    fn test_equality_keeps_relational_characters() {
        assert_eq!(
            Argument::equality("!>5"),
            Argument {
                operator: Operator::NotEqual,
                value: ">5"
            }
        );
    }

    #[test]
    fn test_letters_round_trip() {
        for letter in "AGDSFZWURTYEHXIMNCJ".chars() {
            assert_eq!(Test::from_letter(letter).unwrap().letter(), letter);
        }
        assert_eq!(Test::from_letter('a'), Some(Test::ShowId));
        assert_eq!(Test::from_letter('Q'), None);
    }

    // The fixture file is version 2.
    #[rstest]
    #[case("2", true)]
    #[case("1", false)]
    #[case("!1", true)]
    #[case("!2", false)]
    #[case(">1", true)]
    #[case(">2", false)]
    #[case(">=2", true)]
    #[case(">=3", false)]
    #[case("<3", true)]
    #[case("<2", false)]
    #[case("<=2", true)]
    #[case("<=1", false)]
    #[case("two", false)]
    #[case(">>2", false)]
    fn test_file_version(#[case] argument: &str, #[case] expected: bool) {
        assert_eq!(check('F', argument), expected);
    }

    #[rstest]
    #[case('Z', "10", true)]
    #[case('Z', "8", false)]
    #[case('Z', ">8", true)]
    #[case('W', "1920", true)]
    #[case('W', "<1920", false)]
    #[case('U', ">=720", true)]
    #[case('U', "!1080", false)]
    #[case('Y', "2013", true)]
    #[case('Y', "<2000", false)]
    #[case('E', "5", true)]
    #[case('E', "<=4", false)]
    #[case('X', ">24", true)]
    #[case('X', "26", false)]
    fn test_numeric_fields(#[case] test: char, #[case] argument: &str, #[case] expected: bool) {
        assert_eq!(check(test, argument), expected);
    }

    #[rstest]
    #[case('A', "42", true)]
    #[case('A', "!42", false)]
    #[case('A', "43", false)]
    #[case('A', "!43", true)]
    #[case('A', "forty-two", false)]
    #[case('A', ">40", false)]
    #[case('G', "5", true)]
    #[case('G', "unknown", false)]
    #[case('G', "!unknown", true)]
    #[case('D', "japanese", true)]
    #[case('D', "Japanese", true)]
    #[case('D', "!english", true)]
    #[case('S', "english", true)]
    #[case('S', "none", false)]
    #[case('S', "!none", true)]
    #[case('R', "Blu-ray", true)]
    #[case('R', "DVD", false)]
    #[case('R', "!DVD", true)]
    #[case('R', "papyrus", false)]
    #[case('T', "TV", true)]
    #[case('T', "!Movie", true)]
    #[case('T', "unknown", false)]
    #[case('H', "E", true)]
    #[case('H', "e", true)]
    #[case('H', "S", false)]
    #[case('H', "!S", true)]
    #[case('H', "Episode", false)]
    #[case('M', "", false)]
    #[case('M', "!", true)]
    #[case('N', "", true)]
    #[case('N', "!", false)]
    #[case('C', "H264", false)]
    #[case('J', "AAC", false)]
    fn test_equality_tests(#[case] test: char, #[case] argument: &str, #[case] expected: bool) {
        assert_eq!(check(test, argument), expected);
    }

    #[test]
    fn test_subtitle_none() {
        let fixture = fixture().with_catalog(|c| c.subtitle_languages.clear());
        let ctx = fixture.context();
        assert!(Condition::new(Test::SubtitleLanguage, "none").evaluate(&ctx));
        assert!(!Condition::new(Test::SubtitleLanguage, "!none").evaluate(&ctx));
    }

    #[test]
    fn test_manual_file() {
        let fixture = fixture().manual();
        let ctx = fixture.context();
        assert!(Condition::new(Test::ManuallyLinked, "").evaluate(&ctx));
        // No catalog file: version and dub tests cannot be answered.
        assert!(!Condition::new(Test::FileVersion, "1").evaluate(&ctx));
        assert!(!Condition::new(Test::FileVersion, "!1").evaluate(&ctx));
        assert!(!Condition::new(Test::AudioLanguage, "!english").evaluate(&ctx));
        // Missing groups and sources read as unknown.
        assert!(Condition::new(Test::GroupId, "unknown").evaluate(&ctx));
        assert!(Condition::new(Test::Source, "unknown").evaluate(&ctx));
    }

    #[test]
    fn test_no_video_stream() {
        let mut fixture = fixture();
        fixture.file.video = None;
        let ctx = fixture.context();
        for (test, argument) in [(Test::VideoWidth, ">0"), (Test::VideoHeight, "!0"), (Test::BitDepth, "<99")] {
            assert!(!Condition::new(test, argument).evaluate(&ctx));
        }
    }

    #[test]
    fn test_no_episodes() {
        let mut fixture = fixture();
        fixture.episodes.clear();
        let ctx = fixture.context();
        assert!(!Condition::new(Test::HasEpisodes, "").evaluate(&ctx));
        assert!(!Condition::new(Test::EpisodeNumber, ">=0").evaluate(&ctx));
        assert!(!Condition::new(Test::ManuallyLinked, "").evaluate(&ctx));
    }

    #[test]
    fn test_year_without_air_date_is_zero() {
        let mut fixture = fixture();
        fixture.show.air_date = None;
        assert!(Condition::new(Test::Year, "0").evaluate(&fixture.context()));
    }

    #[rstest]
    #[case("ann", true)]
    #[case("%eng", true)]
    #[case("kan", true)]
    #[case("!eng", false)]
    #[case("epn", true)]
    #[case("grp", true)]
    #[case("gid", true)]
    #[case("crc", true)]
    #[case("CRC", true)]
    #[case("sna", true)]
    #[case("bit", true)]
    #[case("cen", false)]
    #[case("!dep", true)]
    #[case("nonsense", false)]
    #[case("!nonsense", false)]
    fn test_token_existence(#[case] argument: &str, #[case] expected: bool) {
        assert_eq!(check('I', argument), expected);
    }

    #[test]
    fn test_token_existence_without_english_title() {
        let mut fixture = fixture();
        fixture.show.titles.retain(|t| t.language != "en");
        let ctx = fixture.context();
        assert!(!Condition::new(Test::HasToken, "eng").evaluate(&ctx));
        assert!(Condition::new(Test::HasToken, "!eng").evaluate(&ctx));
    }
}
