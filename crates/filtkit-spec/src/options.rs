//! Zero-phase filtering options.

use serde::{Deserialize, Serialize};

/// Edge extension applied before forward-backward filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadType {
    /// Antisymmetric reflection about the end samples.
    #[default]
    Odd,
    /// Symmetric reflection, excluding the end samples.
    Even,
    /// Repeat the end samples.
    Constant,
    /// No extension.
    None,
}

/// Options for zero-phase filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FiltfiltOptions {
    /// Edge extension type.
    #[serde(default)]
    pub pad_type: PadType,
    /// Explicit pad length; `None` uses `3 * (2 * sections + 1)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_len: Option<usize>,
}

impl FiltfiltOptions {
    /// Creates default options (odd extension, default pad length).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pad type.
    pub fn with_pad_type(mut self, pad_type: PadType) -> Self {
        self.pad_type = pad_type;
        self
    }

    /// Sets an explicit pad length.
    pub fn with_pad_len(mut self, pad_len: usize) -> Self {
        self.pad_len = Some(pad_len);
        self
    }
}
