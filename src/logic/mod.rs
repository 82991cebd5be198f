// SPDX-License-Identifier: MIT

//! Evaluation of display logic
//!
//! - `extract` - reads a driver control's comparable value by kind
//! - `compare` - resolves one of eight relational operators via a bucket table
//! - `predicate` - the predicates rules are built from

mod compare;
mod extract;
mod predicate;

pub use compare::{compare, Bucket, CompareOp};
pub use extract::extract_value;
pub use predicate::{AnchorLogic, ConditionalParams, DisplayLogic, LogicType, VISIBLE_IF};
