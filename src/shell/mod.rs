mod dispatch;
mod log;
mod session;

pub use dispatch::{Dispatcher, Response};
pub use log::LogSink;
pub use session::Session;
