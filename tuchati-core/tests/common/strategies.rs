// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use proptest::prelude::*;

/// Chat content: arbitrary printable text, possibly empty.
pub fn content_strategy() -> impl Strategy<Value = String> {
    ".{0,200}"
}

/// Text that is never valid JSON: starts with a letter other than the
/// first letters of `true`, `false` and `null`.
pub fn non_json_text_strategy() -> impl Strategy<Value = String> {
    "[a-eg-mo-su-zA-Z][^\\x00]{0,100}"
}

/// Usernames as the server formats them.
pub fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{2,15}"
}
