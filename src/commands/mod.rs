// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod buildings;
pub mod tenants;
pub mod utilities;
pub mod reports;
pub mod finances;
pub mod exporter;
pub mod config;
