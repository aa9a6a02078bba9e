// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mathbench scheduling primitives.
//!
//! Two suspension points drive every panel: the per-frame redraw of the 3D
//! viewport ([`FrameLoop`]) and the quiet period before an expensive
//! re-render ([`Debouncer`]). Both are tokio tasks owning a [`CancelToken`].

mod cancel;
mod debounce;
mod frame;

pub use cancel::CancelToken;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use frame::{FrameControl, FrameLoop, FrameTick, DEFAULT_FRAME_INTERVAL};
