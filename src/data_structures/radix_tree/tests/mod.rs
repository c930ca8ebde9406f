// Copyright (c) 2026 Aero Router Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Scenario and property-based tests for the radix tree.
