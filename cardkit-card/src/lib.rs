//! # cardkit-card
//!
//! The profile card component and the host page it mounts into.
//!
//! ```text
//!  ProfileCard::render() ──► Element
//!        ▲                      │ commit
//!        │ mounted(host)        ▼
//!        └──────────────── HostPage (Document → layout → display list)
//! ```
//!
//! The card shows an avatar, a name, a handle, and a description. Right
//! after its first commit it reads the rendered length of its text box
//! once and, if the text is too long, swaps in a truncated description.

pub mod component;
pub mod config;
pub mod fit;
pub mod host;
pub mod profile_card;

pub use component::{Component, DetachedHost, HostTree};
pub use config::{ConfigError, HostConfig, TextConfig, Viewport};
pub use fit::{FitDecision, FitPolicy};
pub use host::{HostError, HostPage, MountHandle};
pub use profile_card::{FitState, ProfileCard, ProfileCardProps, TEXT_BOX_ID};
