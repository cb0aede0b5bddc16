use std::collections::{BTreeMap, HashMap};
use std::convert::TryFrom;
use std::path::Path;

use serde::Deserialize;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("expected exactly one character, found {0:?}")]
    NotSingleChar(String),
    #[error("{key:?} is mapped to both {first:?} and {second:?}")]
    Conflict { key: char, first: char, second: char },
    #[error("{key:?} maps to {value:?}, which is itself a key of the table")]
    Chained { key: char, value: char },
}

/// An immutable mapping from look-alike characters to their canonical
/// replacements.
///
/// No value of the table is also a key, so replacements never need to be
/// applied in a particular order and normalizing twice is the same as
/// normalizing once.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, String>")]
pub struct LookalikeTable {
    map: HashMap<char, char>,
}

macro_rules! cyrillic {
    ($($from:literal => $to:literal),+ $(,)?) => {
        &[$(($from, $to)),+]
    };
}

/// Cyrillic letters that render like Latin ones.
const CYRILLIC_TO_LATIN: &[(char, char)] = cyrillic! {
    // lowercase
    '\u{0430}' => 'a', // а
    '\u{0435}' => 'e', // е
    '\u{0456}' => 'i', // і
    '\u{043E}' => 'o', // о
    '\u{0440}' => 'p', // р
    '\u{0441}' => 'c', // с
    '\u{0443}' => 'y', // у
    '\u{0445}' => 'x', // х
    '\u{0455}' => 's', // ѕ
    // uppercase
    '\u{0410}' => 'A', // А
    '\u{0412}' => 'B', // В
    '\u{0415}' => 'E', // Е
    '\u{0406}' => 'I', // І
    '\u{041A}' => 'K', // К
    '\u{041C}' => 'M', // М
    '\u{041D}' => 'H', // Н
    '\u{041E}' => 'O', // О
    '\u{0420}' => 'P', // Р
    '\u{0421}' => 'C', // С
    '\u{0422}' => 'T', // Т
    '\u{0425}' => 'X', // Х
    '\u{0405}' => 'S', // Ѕ
};

lazy_static::lazy_static! {
    static ref CYRILLIC: LookalikeTable = LookalikeTable::new(CYRILLIC_TO_LATIN.iter().copied())
        .expect("built-in table is well formed");
}

impl LookalikeTable {
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Result<Self, TableError> {
        let mut map = HashMap::new();
        for (key, value) in pairs {
            if let Some(first) = map.insert(key, value) {
                if first != value {
                    return Err(TableError::Conflict {
                        key,
                        first,
                        second: value,
                    });
                }
            }
        }
        if let Some((&key, &value)) = map.iter().find(|(_, v)| map.contains_key(*v)) {
            return Err(TableError::Chained { key, value });
        }
        Ok(Self { map })
    }

    /// The built-in Cyrillic to Latin table.
    pub fn cyrillic() -> &'static LookalikeTable {
        &CYRILLIC
    }

    /// Parses a table from a JSON object such as `{"а": "a"}`.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(s)?;
        Ok(Self::try_from(raw)?)
    }

    /// Loads a JSON table from a file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let s = std::fs::read_to_string(path).map_err(|source| crate::Error::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&s)
    }

    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (char, char)> {
        self.map
            .iter()
            .map(|(&k, &v)| (k, v))
            .collect::<BTreeMap<_, _>>()
            .into_iter()
    }

    pub fn contains_lookalike(&self, s: &str) -> bool {
        s.chars().any(|c| self.map.contains_key(&c))
    }

    pub fn normalize(&self, s: &str) -> String {
        s.chars().map(|c| self.get(c).unwrap_or(c)).collect()
    }
}

impl Default for LookalikeTable {
    fn default() -> Self {
        Self::cyrillic().clone()
    }
}

fn single_char(s: String) -> Result<char, TableError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TableError::NotSingleChar(s)),
    }
}

impl TryFrom<HashMap<String, String>> for LookalikeTable {
    type Error = TableError;

    fn try_from(raw: HashMap<String, String>) -> Result<Self, Self::Error> {
        let pairs = raw
            .into_iter()
            .map(|(k, v)| Ok((single_char(k)?, single_char(v)?)))
            .collect::<Result<Vec<_>, TableError>>()?;
        Self::new(pairs)
    }
}
