//! Named move sequences, invoked like moves: `sune`, `sune2`, `sune'`.

use std::collections::BTreeMap;

use crate::error::{NotationError, SequenceError};
use crate::notation::{is_atomic, parse_repeat, parse_suffix, reverse_sequence};

/// Sequence bodies keyed by name, for one cube type.
///
/// Names are validated on registration so every invocation token resolves to
/// at most one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceMap {
    entries: BTreeMap<String, String>,
}

/// A resolved invocation of a named sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceCall<'a> {
    pub name: &'a str,
    pub body: &'a str,
    /// How many times the body runs. Not reduced: `sune4` runs four times.
    pub repeat: u64,
    pub inverted: bool,
}

impl SequenceCall<'_> {
    /// Tokens of one repetition, reversed when the call is primed.
    pub fn tokens(&self) -> Vec<String> {
        let body = if self.inverted {
            reverse_sequence(self.body)
        } else {
            self.body.to_owned()
        };
        body.split_whitespace().map(str::to_owned).collect()
    }
}

impl SequenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `body`, replacing any existing body for that name.
    pub fn edit(&mut self, name: &str, body: &str) -> Result<(), SequenceError> {
        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '\'') {
            return Err(SequenceError::InvalidName(name.to_owned()));
        }
        if is_atomic(name) {
            return Err(SequenceError::ShadowsMove(name.to_owned()));
        }
        if let Some(existing) = self
            .entries
            .keys()
            .find(|existing| is_suffixed(name, existing) || is_suffixed(existing, name))
        {
            return Err(SequenceError::Ambiguous {
                name: name.to_owned(),
                existing: existing.clone(),
            });
        }
        self.entries.insert(name.to_owned(), body.to_owned());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matches `token` against `<name>\d*'?` for every registered name.
    ///
    /// Returns `Ok(None)` when no name matches, and an error when a name
    /// matches but its repeat count does not fit.
    pub fn resolve<'a>(
        &'a self,
        token: &str,
    ) -> Result<Option<SequenceCall<'a>>, NotationError> {
        let splits = (1..=token.len()).rev().filter(|&i| token.is_char_boundary(i));
        for split in splits {
            let (name, rest) = token.split_at(split);
            let Some((name, body)) = self.entries.get_key_value(name) else {
                continue;
            };
            let Some(suffix) = parse_suffix(rest) else {
                continue;
            };
            return Ok(Some(SequenceCall {
                name,
                body,
                repeat: parse_repeat(suffix.digits, token)?,
                inverted: suffix.inverted,
            }));
        }
        Ok(None)
    }
}

/// True if `longer` is `shorter` followed by a non-empty `\d*'?` suffix.
fn is_suffixed(longer: &str, shorter: &str) -> bool {
    longer
        .strip_prefix(shorter)
        .is_some_and(|rest| !rest.is_empty() && parse_suffix(rest).is_some())
}

impl TryFrom<BTreeMap<String, String>> for SequenceMap {
    type Error = SequenceError;

    fn try_from(entries: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut map = Self::new();
        for (name, body) in &entries {
            map.edit(name, body)?;
        }
        Ok(map)
    }
}

impl From<SequenceMap> for BTreeMap<String, String> {
    fn from(map: SequenceMap) -> Self {
        map.entries
    }
}
