// State management module.
// Identity resolution, subset selection, the initial load, and background revalidation.

pub mod cards;
pub mod identity;
pub mod loader;
pub mod revalidate;
pub mod selector;
pub mod view;

#[cfg(test)]
mod testing;

pub use cards::{Card, DisplayOverride, DisplayOverrides, build_cards};
pub use identity::{Identity, IdentitySource, PLACEHOLDER_IDENTITY, resolve_identity};
pub use loader::{FallbackReason, LoadOutcome, LoadPhase, Loader, Started};
pub use revalidate::{
    BackgroundFailure, RevalidationHandle, RevalidationOutcome, Revalidator,
};
pub use selector::{ExclusionSet, Selection, filter_and_pick, key_sequence, same_keys};
pub use view::{
    ConsoleLevel, ConsoleMessage, LoadingState, Renderer, SharedView, ViewState,
};
