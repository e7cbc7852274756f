//! Target-independent effect logic: capability classification, animator
//! state machines, scroll math, and rate limiting. Nothing in this module
//! touches the DOM, so it compiles and unit-tests on the host; the `wasm`
//! module binds it to the page.

pub mod capability;
pub mod glyphs;
pub mod scroll;
pub mod throttle;
pub mod typing;
