//! Builds a file name one action at a time.

use crate::consts::TOKEN_REGEX;
use crate::context::{RenameContext, RenameOptions};
use crate::error::{ErrorKind, Result};
use crate::expression::Action;
use crate::sanitize::sanitize_name;
use crate::vocabulary::Token;
use exn::OptionExt;
use regex::Captures;
use shelf_models::{EpisodeKind, EpisodeView, ShowKind, ShowView};
use std::path::Path;

/// Fallback for release group names the catalog does not know.
pub const UNKNOWN_GROUP: &str = "Unknown";
/// Appended to episode titles that had to be shortened.
pub const ELLIPSIS: char = '…';
/// Joins multi-valued tokens such as `%dub` and `%sub`.
pub const LIST_SEPARATOR: &str = "+";

/// The name under construction. Actions only ever append or replace; the
/// extension is added once, by [`NameBuilder::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameBuilder {
    name: String,
}
impl NameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Substitutes tokens in `template` and appends the result.
    pub fn add(&mut self, template: &str, ctx: &RenameContext<'_>, options: &RenameOptions) {
        let segment = substitute(&template.replace('\'', ""), ctx, options);
        self.name.push_str(&segment);
    }

    /// Replaces every literal occurrence of `from`. An empty `from` is a no-op.
    pub fn replace(&mut self, from: &str, to: &str) {
        if !from.is_empty() && self.name.contains(from) {
            self.name = self.name.replace(from, to);
        }
    }

    pub fn apply(&mut self, action: &Action, ctx: &RenameContext<'_>, options: &RenameOptions) -> Result<()> {
        match action {
            Action::Add(template) => self.add(template, ctx, options),
            Action::Replace { from, to } => self.replace(from, to),
            Action::Fail => exn::bail!(ErrorKind::Aborted),
            Action::Ignored(_) => {},
        }
        Ok(())
    }

    /// Completes the name: carries over the current file's extension,
    /// restores apostrophes written as backticks, and sanitizes the result.
    pub fn finish(self, ctx: &RenameContext<'_>) -> Result<String> {
        if self.name.is_empty() {
            exn::bail!(ErrorKind::EmptyName);
        }
        let extension = ctx
            .file
            .extension()
            .ok_or_raise(|| ErrorKind::MissingExtension(ctx.file.file_name.clone()))?;
        let name = format!("{}.{extension}", self.name).replace('`', "'");
        Ok(sanitize_name(&name))
    }
}

/// Replaces every known `%token` in `template` with its value. Unknown
/// `%xyz` sequences are left as they are; substituted values are never
/// scanned again.
pub fn substitute(template: &str, ctx: &RenameContext<'_>, options: &RenameOptions) -> String {
    TOKEN_REGEX
        .replace_all(template, |caps: &Captures<'_>| match caps[1].parse::<Token>() {
            Ok(token) => token_value(token, ctx, options),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

/// Cuts `title` to `max - 1` characters plus an ellipsis when it is longer
/// than `max` characters.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(max.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}

fn digits(mut n: u32) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Formats an episode number with its kind prefix, zero-padded to the digit
/// count of the show's episode total for that kind.
pub fn episode_number(episode: &EpisodeView, show: &ShowView) -> String {
    let total = match episode.kind {
        EpisodeKind::Normal => show.episode_count_normal,
        EpisodeKind::Special => show.episode_count_special,
        _ => 1,
    };
    format!("{}{:0width$}", episode.kind.number_prefix(), episode.number, width = digits(total))
}

fn join(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

fn group_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_GROUP.to_string(),
    }
}

/// The text a token stands for. Data the file does not have becomes an
/// empty string, apart from the group names and the version, which fall
/// back to `Unknown` and `1`.
pub fn token_value(token: Token, ctx: &RenameContext<'_>, options: &RenameOptions) -> String {
    let file = ctx.file;
    let catalog = file.catalog.as_ref();
    let group = catalog.and_then(|c| c.group.as_ref());
    let first = ctx.first_episode();
    let episode_title = |language: &str| {
        first
            .and_then(|e| e.title(language))
            .map(|t| truncate_title(t, options.max_episode_title_length))
            .unwrap_or_default()
    };
    match token {
        Token::ShowTitleMain => ctx.show.main_title().unwrap_or_default().to_string(),
        Token::ShowTitleKanji => ctx.show.official_title("ja").unwrap_or_default().to_string(),
        Token::ShowTitleEnglish => ctx.show.official_title("en").unwrap_or_default().to_string(),
        Token::EpisodeTitleRomaji => episode_title("x-jat"),
        Token::EpisodeTitleEnglish => episode_title("en"),
        Token::EpisodeNumber => match (first, ctx.last_episode()) {
            (Some(first), Some(last)) if first.id != last.id => {
                format!("{}-{}", episode_number(first, ctx.show), episode_number(last, ctx.show))
            },
            (Some(first), _) => episode_number(first, ctx.show),
            _ => String::new(),
        },
        Token::EpisodeCount => ctx.show.episode_count_normal.to_string(),
        Token::GroupShortName => group_name(group.map(|g| g.short_name.as_str())),
        Token::GroupLongName => group_name(group.map(|g| g.long_name.as_str())),
        Token::HashLower => file.hash.to_lowercase(),
        Token::HashUpper => file.hash.to_uppercase(),
        Token::ChecksumLower => file.crc32.as_deref().map(str::to_lowercase).unwrap_or_default(),
        Token::ChecksumUpper => file.crc32.as_deref().map(str::to_uppercase).unwrap_or_default(),
        Token::FileVersion => catalog.map_or(1, |c| c.version).to_string(),
        Token::Source => catalog.map(|c| c.source.as_str().to_string()).unwrap_or_default(),
        Token::Resolution => match file.video.as_ref() {
            Some(v) if v.width > 0 && v.height > 0 => format!("{}x{}", v.width, v.height),
            _ => String::new(),
        },
        Token::VideoCodec => file.video.as_ref().and_then(|v| v.codec.clone()).unwrap_or_default(),
        Token::AudioCodec => join(&file.audio_codecs),
        Token::BitDepth => file
            .video
            .as_ref()
            .and_then(|v| v.bit_depth)
            .map(|b| b.to_string())
            .unwrap_or_default(),
        Token::DubLanguages => join(file.audio_tracks()),
        Token::SubLanguages => join(file.subtitle_tracks()),
        Token::Year => match ctx.show.air_date {
            Some(_) => ctx.show.year().to_string(),
            None => String::new(),
        },
        Token::ShowKind => match ctx.show.kind {
            ShowKind::Unknown => String::new(),
            kind => kind.as_str().to_string(),
        },
        Token::FileId => file.id.to_string(),
        Token::ShowId => ctx.show.id.to_string(),
        Token::EpisodeId => first.map(|e| e.id.to_string()).unwrap_or_default(),
        Token::GroupId => group.map(|g| g.id.to_string()).unwrap_or_default(),
        Token::OriginalFileName => catalog
            .and_then(|c| c.original_file_name.as_deref())
            .and_then(|name| Path::new(name).file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
        Token::Censored => match catalog.is_some_and(|c| c.censored) {
            true => "cen".to_string(),
            false => String::new(),
        },
        Token::Deprecated => match catalog.is_some_and(|c| c.deprecated) {
            true => "depr".to_string(),
            false => String::new(),
        },
    }
}
