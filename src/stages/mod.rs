//! Row-transformation stages of the cleaning pipeline.
//!
//! Each submodule implements one stage. Stages run in a fixed order and each
//! one sees the full table produced by the previous stage:
//!
//! | # | Stage | Module | Adds / touches |
//! |---|-------|--------|----------------|
//! | 1 | Source tagging | [`source`] | adds `newspaper_uid` |
//! | 2 | Host extraction | [`host`] | adds `host` |
//! | 3 | Title backfill | [`titles`] | fills missing `title` |
//! | 4 | Newline stripping | [`text`] | rewrites `title`, `body` |
//! | 5 | Identity assignment | [`identity`] | re-keys rows by `uid` |
//! | 6 | Token counting | [`tokens`] | adds `n_tokens_title`, `n_tokens_body` |
//! | 7 | Deduplication | [`dedup`] | drops repeated titles |
//! | 8 | Completeness filter | [`completeness`] | drops rows with missing fields |
//!
//! # Common Patterns
//!
//! Stages that cannot change row identity take `&mut Table<K>` and return
//! the counter they report. Identity assignment consumes the positional
//! [`Dataset`](crate::models::Dataset) and returns a new
//! [`KeyedDataset`](crate::models::KeyedDataset).
//!
//! Per-row failures degrade the row (empty host, missing count) and are
//! logged; only whole-table problems are errors.

pub mod completeness;
pub mod dedup;
pub mod host;
pub mod identity;
pub mod source;
pub mod text;
pub mod titles;
pub mod tokens;
