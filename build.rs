//! Build script for the command firmware
//!
//! Host builds need nothing. The embedded binary links against the
//! `cortex-m-rt` and `defmt` linker scripts; `memory.x` comes from
//! embassy-stm32's `memory-x` feature.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // `--nmagic` is required if memory section addresses are not aligned to 0x10000
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
