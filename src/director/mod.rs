pub(crate) mod base;
pub(crate) mod config;
pub(crate) mod perimeter;
pub(crate) mod random;
