/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Compact interval expressions: `"<integer>[m|h|d]"`.
//!
//! Parsing is split in two so the validator can report *format* and *range*
//! problems separately:
//!
//! 1. [`is_well_formed`] – the structural check `^\d+[mhd]?$`.
//! 2. [`ParsedInterval::parse`] – total over well-formed input; yields the
//!    magnitude and the [`IntervalUnit`].
//!
//! The unit ceiling ([`IntervalUnit::ceiling`]) is the largest step that still
//! produces an evenly spaced schedule inside the next larger cron field.

use std::fmt;

// ── IntervalUnit ──────────────────────────────────────────────────────────────

/// Time unit of an interval expression.
///
/// A bare number (no suffix) is read as minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalUnit {
    #[default]
    Minute,
    Hour,
    Day,
}

impl IntervalUnit {
    /// Map a trailing suffix character to its unit.
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            'm' => Some(IntervalUnit::Minute),
            'h' => Some(IntervalUnit::Hour),
            'd' => Some(IntervalUnit::Day),
            _ => None,
        }
    }

    /// Largest magnitude accepted for this unit.
    pub fn ceiling(self) -> u32 {
        match self {
            IntervalUnit::Minute => 60,
            IntervalUnit::Hour => 24,
            IntervalUnit::Day => 31,
        }
    }

    /// Plural noun used in user-facing messages ("minutes", "hours", "days").
    pub fn plural(self) -> &'static str {
        match self {
            IntervalUnit::Minute => "minutes",
            IntervalUnit::Hour => "hours",
            IntervalUnit::Day => "days",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

// ── Structural check ──────────────────────────────────────────────────────────

/// Returns `true` if `expr` matches `^\d+[mhd]?$`.
///
/// Only ASCII digits count; whitespace, signs and multi-letter suffixes are
/// rejected.
pub fn is_well_formed(expr: &str) -> bool {
    let digits = match expr.chars().last() {
        Some(c) if IntervalUnit::from_suffix(c).is_some() => &expr[..expr.len() - 1],
        Some(_) => expr,
        None => return false,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ── ParsedInterval ────────────────────────────────────────────────────────────

/// A decoded interval: repeat every `magnitude` `unit`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInterval {
    pub magnitude: u32,
    pub unit: IntervalUnit,
}

impl ParsedInterval {
    /// Decode a well-formed interval expression.
    ///
    /// Callers must check [`is_well_formed`] first; for such input this never
    /// fails.  Digit runs that do not fit a `u32` saturate to `u32::MAX` so
    /// they surface as a range violation rather than a format one.
    pub fn parse(expr: &str) -> Self {
        debug_assert!(is_well_formed(expr), "parse() on malformed interval '{expr}'");

        let (digits, unit) = match expr.chars().last().and_then(IntervalUnit::from_suffix) {
            Some(unit) => (&expr[..expr.len() - 1], unit),
            None => (expr, IntervalUnit::Minute),
        };

        let magnitude = digits.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });

        Self { magnitude, unit }
    }

    /// `true` when the magnitude is in `1..=unit.ceiling()`.
    pub fn in_range(&self) -> bool {
        (1..=self.unit.ceiling()).contains(&self.magnitude)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
