//! View model rendering.

pub mod view;

pub use view::{EMPTY_MESSAGE_PLACEHOLDER, PrSection, ViewModel, render};
