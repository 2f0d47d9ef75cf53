// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the store and the input parsers.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input could not be turned into a transaction field.
    #[error("{0}")]
    Validation(String),

    /// No transaction exists with this id.
    ///
    /// The store itself never raises this; `update` and `delete` are no-ops for
    /// missing ids and `get_by_id` returns `None`. Commands that need the row to
    /// exist raise it themselves.
    #[error("Transaction {0} not found")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
