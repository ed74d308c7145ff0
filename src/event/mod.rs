//! Click events: bubble paths, direct and delegated bindings.

pub mod binding;
pub mod handler;

pub use binding::{Binding, BindingRegistry, Dispatch, Handler};
pub use handler::{bubble_path, ClickEvent};
