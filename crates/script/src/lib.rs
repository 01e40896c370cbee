//! A small line-oriented language for naming media files.
//!
//! ```text
//! // Comments run to the end of the line.
//! IF I(eng) DO ADD '%eng - '
//! IF I(!eng) DO ADD '%ann - '
//! DO ADD '%enr'
//! IF F(!1) DO ADD 'v%ver'
//! IF G(unknown) DO FAIL
//! ```
//!
//! Each line may guard an action with single-letter tests (see [`Test`]). The
//! actions of every line whose tests hold are applied in order to a
//! [`NameBuilder`], and the result gets the file's current extension.
//!
//! ```
//! use shelf_models::{EpisodeKind, EpisodeView, FileView, ShowKind, ShowView, Title, TitleKind};
//! use shelf_script::{RenameContext, RenameOptions, Script};
//!
//! let file = FileView::new(1, "episode.mkv", "abcdef", 1024);
//! let episodes = [EpisodeView::new(10, 2, EpisodeKind::Normal, 3)];
//! let show = ShowView::new(2, ShowKind::Tv)
//!     .with_title(Title::new("x-jat", TitleKind::Main, "Mushishi"))
//!     .with_episode_counts(26, 0);
//!
//! let script = Script::new("default", "legacy", "DO ADD '%ann - %enr'");
//! let name = script.run(&RenameContext::new(&file, &episodes, &show), &RenameOptions::default()).unwrap();
//! assert_eq!(name, "Mushishi - 03.mkv");
//! ```

mod condition;
mod consts;
mod context;
pub mod error;
mod expression;
#[cfg(test)]
mod fixtures;
mod runner;
mod sanitize;
mod synthesize;
mod vocabulary;

pub use crate::condition::{Argument, Condition, Operator, Test, is_present};
pub use crate::context::{DEFAULT_MAX_EPISODE_TITLE_LENGTH, RenameContext, RenameOptions};
pub use crate::expression::{Action, Expression, Line};
pub use crate::runner::Script;
pub use crate::sanitize::sanitize_name;
pub use crate::synthesize::{NameBuilder, episode_number, substitute, token_value, truncate_title};
pub use crate::vocabulary::{Keyword, TOKEN_PREFIX, Token};
