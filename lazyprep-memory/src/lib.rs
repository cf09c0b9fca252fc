mod connection;
mod driver;
mod options;

pub use connection::*;
pub use driver::*;
pub use options::*;
