//! Identifier aliases shared across layers; both map to `BIGSERIAL` columns.

pub type UserId = i64;
pub type PostId = i64;
