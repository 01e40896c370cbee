use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// The medium a release was sourced from, as reported by the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Source {
    #[default]
    Unknown,
    /// Television broadcast
    Tv,
    Dvd,
    BluRay,
    /// Web stream or download
    Web,
    Vhs,
    Vcd,
    LaserDisc,
    Camcorder,
    Other,
}
impl Source {
    /// Returns the canonical display string, which is also what script
    /// authors write in `R(...)` tests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Unknown => "unknown",
            Source::Tv => "TV",
            Source::Dvd => "DVD",
            Source::BluRay => "Blu-ray",
            Source::Web => "www",
            Source::Vhs => "VHS",
            Source::Vcd => "VCD",
            Source::LaserDisc => "LD",
            Source::Camcorder => "camcorder",
            Source::Other => "other",
        }
    }
}
impl FromStr for Source {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "" | "unknown" => Self::Unknown,
            "tv" => Self::Tv,
            "dvd" => Self::Dvd,
            "bluray" | "bd" | "hddvd" => Self::BluRay,
            "www" | "web" => Self::Web,
            "vhs" => Self::Vhs,
            "vcd" | "svcd" => Self::Vcd,
            "ld" | "laserdisc" => Self::LaserDisc,
            "camcorder" | "cam" => Self::Camcorder,
            "other" => Self::Other,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "source",
                value: s.to_string(),
            }),
        })
    }
}
impl TryFrom<String> for Source {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl From<Source> for String {
    fn from(value: Source) -> Self {
        value.as_str().to_string()
    }
}
impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
