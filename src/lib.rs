// ABOUTME: Shared pieces of the greeter examples: the /v1/greeter handler and the embedded asset bundle.
// ABOUTME: The binaries under src/bin wire these into stagehand entries in different ways.

pub mod greeter;

use include_dir::{Dir, include_dir};

/// Asset bundle embedded from boot/assets at compile time. Embedding is a
/// one-time, build-level effect; mounting it on a router is what makes it
/// reachable at runtime.
pub static BOOT_ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/boot/assets");
