use crate::context::{RenameContext, RenameOptions};
use crate::error::{ErrorKind, Result};
use crate::expression::Line;
use crate::synthesize::NameBuilder;
use tracing::instrument;

/// A compiled renaming script.
///
/// Lines are compiled once, when the script is created. Lines that do not
/// follow the grammar are logged and left out; they never stop the rest of
/// the script from running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    name: String,
    strategy: String,
    lines: Vec<Line>,
}
impl Script {
    pub fn new(name: impl Into<String>, strategy: impl Into<String>, text: &str) -> Self {
        let name = name.into();
        let lines = text
            .lines()
            .enumerate()
            .filter_map(|(i, line)| match Line::parse(i + 1, line) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(script = %name, line = i + 1, error = %*e, "Skipping unparsable script line");
                    None
                },
            })
            .collect();
        Self {
            name,
            strategy: strategy.into(),
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the renaming strategy this script belongs to.
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Synthesizes a new name for the file in `ctx`, extension included.
    #[instrument(skip_all, fields(script = %self.name, file_id = ctx.file.id))]
    pub fn run(&self, ctx: &RenameContext<'_>, options: &RenameOptions) -> Result<String> {
        if ctx.episodes.is_empty() {
            exn::bail!(ErrorKind::NoEpisodes);
        }
        let mut builder = NameBuilder::new();
        for line in &self.lines {
            if !line.expression.holds(ctx) {
                continue;
            }
            tracing::debug!(line = line.number, action = ?line.action, "Applying script line");
            builder.apply(&line.action, ctx, options)?;
        }
        builder.finish(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{episode, fixture};
    use rstest::rstest;

    const SCRIPT: &str = r"
// Series title, preferring English
IF I(eng) DO ADD '%eng - '
IF I(!eng) DO ADD '%ann - '
DO ADD '%enr'
IF F(!1) DO ADD 'v%ver'
IF I(epr) DO ADD ' - %epr'
DO ADD ' [%grp][%res][%CRC]'
IF G(unknown) DO REPLACE '[Unknown]' ''
IF T(Movie) DO FAIL
";

    fn run(script: &str) -> Result<String> {
        let fixture = fixture();
        Script::new("test", "legacy", script).run(&fixture.context(), &RenameOptions::default())
    }

    #[test]
    fn test_full_script() {
        assert_eq!(
            run(SCRIPT).unwrap(),
            "Attack on Titan - 05v2 - First Battle [Group][1920x1080][9B1C2D3E].mkv"
        );
    }

    #[test]
    fn test_full_script_for_manual_file() {
        let mut fixture = fixture().manual();
        fixture.show.titles.retain(|t| t.language != "en");
        fixture.episodes = vec![episode(5), episode(6)];
        let name = Script::new("test", "legacy", SCRIPT)
            .run(&fixture.context(), &RenameOptions::default())
            .unwrap();
        assert_eq!(name, "Shingeki no Kyojin - 05-06 - First Battle [1920x1080][9B1C2D3E].mkv");
    }

    #[rstest]
    #[case("DO ADD 'abc'", "abc.mkv")]
    #[case("DO ADD 'a'\nDO ADD 'b'\nDO ADD 'c'", "abc.mkv")]
    #[case("DO ADD 'it''s'", "its.mkv")]
    #[case("DO ADD 'what?'", "what？.mkv")]
    fn test_literal_scripts(#[case] script: &str, #[case] expected: &str) {
        assert_eq!(run(script).unwrap(), expected);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let script = Script::new("test", "legacy", "IF Q(1) DO ADD 'nope'\nDO ADD 'ok'\nADD 'missing do'");
        assert_eq!(script.lines().len(), 1);
        assert_eq!(run("IF Q(1) DO ADD 'nope'\nDO ADD 'ok'").unwrap(), "ok.mkv");
    }

    #[test]
    fn test_fail_aborts() {
        let err = run("DO ADD 'x'\nIF A(42) DO FAIL\nDO ADD 'y'").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Aborted));
    }

    #[test]
    fn test_fail_not_taken() {
        assert_eq!(run("DO ADD 'x'\nIF A(1) DO FAIL").unwrap(), "x.mkv");
    }

    #[test]
    fn test_empty_result() {
        let err = run("IF A(1) DO ADD 'x'").unwrap_err();
        assert!(matches!(&*err, ErrorKind::EmptyName));
    }

    #[test]
    fn test_no_episodes() {
        let mut fixture = fixture();
        fixture.episodes.clear();
        let err = Script::new("test", "legacy", "DO FAIL")
            .run(&fixture.context(), &RenameOptions::default())
            .unwrap_err();
        assert!(matches!(&*err, ErrorKind::NoEpisodes));
    }

    #[test]
    fn test_metadata() {
        let script = Script::new("default", "legacy", "DO ADD 'x'");
        assert_eq!(script.name(), "default");
        assert_eq!(script.strategy(), "legacy");
    }
}
