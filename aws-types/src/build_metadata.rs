/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Facts captured when this crate was compiled, reported in the user agent

include!(concat!(env!("OUT_DIR"), "/build_env.rs"));

/// Compiler, crate version and target OS family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct BuildMetadata {
    /// `rustc` version, or `unknown` when the build script could not ask the compiler
    pub rust_version: &'static str,
    pub core_pkg_version: &'static str,
    /// One of `windows`, `linux`, `macos`, `android`, `ios` or `other`
    pub os_family: &'static str,
}

pub const BUILD_METADATA: BuildMetadata = BuildMetadata {
    rust_version: RUST_VERSION,
    core_pkg_version: env!("CARGO_PKG_VERSION"),
    os_family: os_family(std::env::consts::OS),
};

const fn os_family(target_os: &'static str) -> &'static str {
    // const fns cannot compare `&str` with `==`
    match target_os.as_bytes() {
        b"windows" => "windows",
        b"linux" => "linux",
        b"macos" => "macos",
        b"android" => "android",
        b"ios" => "ios",
        _ => "other",
    }
}
