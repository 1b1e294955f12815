// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures turning user-supplied text into domain values.
///
/// The store itself never fails; these only surface at the edges where a
/// collaborator parses input before handing it to the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown utility type '{0}', expected heating|water")]
    UtilityType(String),

    #[error("Invalid IBAN '{0}'")]
    Iban(String),

    #[error("Invalid quarter {0}, expected 1-4")]
    Quarter(u8),

    #[error("Year {0} is out of range")]
    Year(i32),
}
