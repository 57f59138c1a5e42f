//! Directive fragments.
//!
//! A [`Fragment`] is the opaque unit everything in this crate produces: an
//! ordered sequence of toolchain-native directive tokens. Order is
//! preserved end to end — directive order is observable and some
//! toolchains are order-sensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered, toolchain-native directive fragment.
///
/// The empty fragment is the universal no-op fallback: attaching it to a
/// declaration changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment {
    parts: Vec<String>,
}

impl Fragment {
    /// The empty (no-op) fragment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fragment holding a single directive token.
    pub fn part(text: impl Into<String>) -> Self {
        Self {
            parts: vec![text.into()],
        }
    }

    /// True when this fragment expands to nothing.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append a directive token, keeping declaration order.
    pub fn push(&mut self, text: impl Into<String>) {
        self.parts.push(text.into());
    }

    /// Concatenate fragments in order, skipping empty ones.
    pub fn concat(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut out = Self::empty();
        for fragment in fragments {
            out.parts.extend(fragment.parts);
        }
        out
    }

    /// The directive tokens, in declaration order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::part(text)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}
