pub use lazyprep_core::*;
