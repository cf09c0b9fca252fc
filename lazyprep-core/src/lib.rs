mod as_value;
mod connection;
mod driver;
mod encoder;
mod error;
mod invocation;
mod registry;
mod session;
mod util;
mod value;
mod wire;

pub use ::anyhow::Context;
pub use as_value::*;
pub use connection::*;
pub use driver::*;
pub use encoder::*;
pub use error::*;
pub use invocation::*;
pub use registry::*;
pub use session::*;
pub use util::*;
pub use value::*;
pub use wire::*;
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
