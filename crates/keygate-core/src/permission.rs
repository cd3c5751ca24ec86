//! Permission labels and sets.
//!
//! A [`PermissionSet`] is stored under an identity in the state store. The
//! stored form is a CBOR array of label strings in canonical order:
//!
//! ```text
//! ["read", "write", "admin"]
//! ```
//!
//! Older ledgers hold a bracketed literal such as `['read','write']`.
//! [`PermissionSet::decode`] accepts that form too, matching each token
//! exactly. Membership is always tested on the decoded set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A single access right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLabel {
    /// May read private entries.
    Read,
    /// May write private entries.
    Write,
    /// May approve pending permission requests.
    Admin,
}

impl PermissionLabel {
    /// All labels in canonical order.
    pub const ALL: [PermissionLabel; 3] = [
        PermissionLabel::Read,
        PermissionLabel::Write,
        PermissionLabel::Admin,
    ];

    /// The label as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLabel::Read => "read",
            PermissionLabel::Write => "write",
            PermissionLabel::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "read" => Ok(PermissionLabel::Read),
            "write" => Ok(PermissionLabel::Write),
            "admin" => Ok(PermissionLabel::Admin),
            other => Err(CoreError::UnknownLabel(other.to_string())),
        }
    }
}

/// The set of labels held by one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<PermissionLabel>);

impl PermissionSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `{read, write, admin}`; only ever seeded for the deployer.
    pub fn full() -> Self {
        Self::from_labels(PermissionLabel::ALL)
    }

    /// `{read, write}`.
    pub fn read_write() -> Self {
        Self::from_labels([PermissionLabel::Read, PermissionLabel::Write])
    }

    /// `{read}`.
    pub fn read_only() -> Self {
        Self::from_labels([PermissionLabel::Read])
    }

    /// Build a set from labels.
    pub fn from_labels(labels: impl IntoIterator<Item = PermissionLabel>) -> Self {
        Self(labels.into_iter().collect())
    }

    /// Exact membership test.
    pub fn contains(&self, label: PermissionLabel) -> bool {
        self.0.contains(&label)
    }

    /// Add a label. Returns `false` if it was already present.
    pub fn insert(&mut self, label: PermissionLabel) -> bool {
        self.0.insert(label)
    }

    /// Iterate labels in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = PermissionLabel> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode to the stored form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Decode a stored value, CBOR or legacy literal.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.first() == Some(&b'[') {
            return Self::decode_legacy(bytes);
        }
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }

    fn decode_legacy(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::DecodingError(format!("legacy permission set: {e}")))?;
        let inner = text
            .trim()
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| CoreError::DecodingError(format!("unterminated list: {text}")))?;

        let mut set = Self::empty();
        for token in inner.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let label = token
                .strip_prefix('\'')
                .and_then(|t| t.strip_suffix('\''))
                .or_else(|| token.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
                .unwrap_or(token);
            set.insert(label.parse()?);
        }
        Ok(set)
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, label) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(label.as_str())?;
        }
        f.write_str("}")
    }
}

impl FromIterator<PermissionLabel> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionLabel>>(iter: I) -> Self {
        Self::from_labels(iter)
    }
}
