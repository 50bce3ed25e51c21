//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates the Swift and Kotlin wrappers for the chefbot library, so the
//! mobile apps can call search, favorites and session code directly.
//!
//! ## Usage
//!
//! Build the library first, then generate Swift bindings:
//! ```bash
//! cargo build --release
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libchefbot.so --language swift --out-dir ./bindings/swift
//! ```
//!
//! Kotlin bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libchefbot.so --language kotlin --out-dir ./bindings/kotlin
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
