//! Lifecycle event fan-out.

pub mod dispatcher;
pub mod listener;

pub use dispatcher::EventDispatcher;
pub use listener::{ChannelListener, PassportListener, TracingListener};
