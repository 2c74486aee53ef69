//! Navigation state for the portfolio page: which section is in view, the
//! mobile menu, the theme preference and the hero's pointer parallax.
//!
//! Everything here is single-threaded and renderer-agnostic. The DOM is
//! reached only through the [`Page`] and [`Anchor`] traits.

pub mod config;
pub mod error;
pub mod items;
pub mod menu;
pub mod page;
pub mod parallax;
pub mod scroll;
pub mod state;
pub mod theme;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use error::*;
pub use items::*;
pub use menu::*;
pub use page::*;
pub use parallax::*;
pub use scroll::*;
pub use state::*;
pub use theme::*;

pub use foundation::{ClientRect, SectionId};
pub use runtime::Subscription;
