// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /preview - raw vs. preprocessed comparison endpoint

mod handler;

pub use handler::preview_handler;
