use crate::MemoryConnection;
use lazyprep_core::Driver;

#[derive(Clone, Copy, Default)]
pub struct MemoryDriver;
impl MemoryDriver {
    pub const fn new() -> Self {
        Self
    }
}

impl Driver for MemoryDriver {
    type Connection = MemoryConnection;
    const NAME: &'static str = "memory";
}
