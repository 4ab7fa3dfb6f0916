use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Game segment: each quarter split into halves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    #[default]
    Q1A,
    Q1B,
    Q2A,
    Q2B,
    Q3A,
    Q3B,
    Q4A,
    Q4B,
}

impl Segment {
    pub const COUNT: usize = 8;

    pub const ALL: [Segment; Self::COUNT] = [
        Segment::Q1A,
        Segment::Q1B,
        Segment::Q2A,
        Segment::Q2B,
        Segment::Q3A,
        Segment::Q3B,
        Segment::Q4A,
        Segment::Q4B,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Segment::Q1A => "Q1-A",
            Segment::Q1B => "Q1-B",
            Segment::Q2A => "Q2-A",
            Segment::Q2B => "Q2-B",
            Segment::Q3A => "Q3-A",
            Segment::Q3B => "Q3-B",
            Segment::Q4A => "Q4-A",
            Segment::Q4B => "Q4-B",
        }
    }

    /// Position in game order, 0..8.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(self)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Segment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        match Self::ALL
            .iter()
            .find(|seg| seg.label().eq_ignore_ascii_case(wanted))
        {
            Some(seg) => Ok(*seg),
            None => bail!("unknown segment '{}'", wanted),
        }
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
