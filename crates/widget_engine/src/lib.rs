//! Widget engine: effect execution, rendering and trigger discovery over an
//! abstract host page.
mod discovery;
mod error;
mod host;
mod render;
mod runtime;
mod schedule;
mod shell;

pub use discovery::{ElementKey, Trigger, TriggerRegistry, TriggerSource};
pub use error::HostError;
pub use host::Host;
pub use render::{render, ShellCommand};
pub use runtime::WidgetRuntime;
pub use schedule::{IdleTimer, PreloadScheduler};
pub use shell::{ShellTemplate, BACKDROP_CLASS, CLOSE_CLASS, HIDDEN_CLASS, LOADER_CLASS, VISIBLE_CLASS};
