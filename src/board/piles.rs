use crate::error::{NimError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two sides. Turns alternate strictly between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

impl FromStr for Player {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "one" | "p1" => Ok(Player::One),
            "2" | "two" | "p2" => Ok(Player::Two),
            other => Err(NimError::invalid_config(format!("unknown player '{other}'"))),
        }
    }
}

/// Take `count` objects from pile `row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub count: u32,
}

impl Move {
    pub const fn new(row: usize, count: u32) -> Self {
        Self { row, count }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.count)
    }
}

/// Parses "(1, 2)", "1,2" or "1 2". Only the shape is checked here;
/// legality depends on a position and is checked by the rules.
impl FromStr for Move {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || NimError::MalformedMove { input: s.to_string() };
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 2 {
            return Err(malformed());
        }
        let row = parts[0].parse::<usize>().map_err(|_| malformed())?;
        let count = parts[1].parse::<u32>().map_err(|_| malformed())?;
        Ok(Move { row, count })
    }
}

/// Object counts per row. Row index is the position in the sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piles(Vec<u32>);

impl Piles {
    pub fn new(counts: Vec<u32>) -> Self {
        Self(counts)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<u32> {
        self.0.get(row).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Total number of objects left on the board.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }

    /// True when every row is empty.
    pub fn is_cleared(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Row order and empty rows do not affect the game value, so positions
    /// that differ only in those share one key.
    pub fn canonical(&self) -> Vec<u32> {
        let mut key: Vec<u32> = self.0.iter().copied().filter(|&c| c > 0).collect();
        key.sort_unstable();
        key
    }

    pub(crate) fn with_taken(&self, row: usize, count: u32) -> Self {
        let mut next = self.0.clone();
        next[row] -= count;
        Self(next)
    }
}

impl From<Vec<u32>> for Piles {
    fn from(counts: Vec<u32>) -> Self {
        Self(counts)
    }
}

impl TryFrom<Vec<i64>> for Piles {
    type Error = NimError;

    fn try_from(counts: Vec<i64>) -> Result<Self> {
        let mut out = Vec::with_capacity(counts.len());
        for (row, c) in counts.into_iter().enumerate() {
            if c < 0 {
                return Err(NimError::invalid_config(format!("row {row} has negative count {c}")));
            }
            let c = u32::try_from(c)
                .map_err(|_| NimError::invalid_config(format!("row {row} count {c} is too large")))?;
            out.push(c);
        }
        Ok(Self(out))
    }
}

impl FromStr for Piles {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
        let mut counts = Vec::new();
        for tok in inner.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
            let v = tok
                .parse::<i64>()
                .map_err(|_| NimError::invalid_config(format!("'{tok}' is not an integer")))?;
            counts.push(v);
        }
        Piles::try_from(counts)
    }
}

impl fmt::Display for Piles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_shapes() {
        assert_eq!("(1, 2)".parse::<Move>().unwrap(), Move::new(1, 2));
        assert_eq!("1,2".parse::<Move>().unwrap(), Move::new(1, 2));
        assert_eq!(" 3 4 ".parse::<Move>().unwrap(), Move::new(3, 4));
        assert!(matches!("(1)".parse::<Move>(), Err(NimError::MalformedMove { .. })));
        assert!(matches!("(a, 2)".parse::<Move>(), Err(NimError::MalformedMove { .. })));
        assert!(matches!("(1, -2)".parse::<Move>(), Err(NimError::MalformedMove { .. })));
    }

    #[test]
    fn rejects_negative_counts() {
        let err = Piles::try_from(vec![3i64, -1, 2]).unwrap_err();
        assert!(matches!(err, NimError::InvalidConfiguration { .. }));
        assert!("3, -1".parse::<Piles>().is_err());
        assert_eq!("[3, 4, 5]".parse::<Piles>().unwrap(), Piles::new(vec![3, 4, 5]));
    }

    #[test]
    fn canonical_ignores_order_and_empty_rows() {
        let a = Piles::new(vec![0, 5, 3, 1]);
        let b = Piles::new(vec![1, 3, 0, 5]);
        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(a.total(), 9);
    }

    #[test]
    fn player_alternates() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().opponent(), Player::Two);
    }
}
