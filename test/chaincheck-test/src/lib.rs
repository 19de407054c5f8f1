// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![forbid(unsafe_code)]

pub mod common;

#[cfg(test)]
mod test_decoder;
#[cfg(test)]
mod test_end_to_end;
#[cfg(test)]
mod test_linker;
#[cfg(test)]
mod test_path_validator;
#[cfg(test)]
mod test_trust_store;
