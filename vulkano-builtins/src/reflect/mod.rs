// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Indices over a [`Spirv`](crate::spirv::Spirv) module that validation queries.
//!
//! Each index is built once per module and is read-only afterwards.

pub mod decorations;
pub mod reachability;
pub mod shape;
