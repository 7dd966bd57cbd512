// Onboarding wizard and recommendation views, modelled as an explicit
// session state driven by pure transitions.

pub mod action;
pub mod handlers;
pub mod machine;
pub mod page;
pub mod session;
pub mod view;

pub use action::Action;
pub use machine::transition;
pub use page::Page;
pub use session::{Effect, SessionState, Signal, Transition};
pub use view::{render, PageView};
