pub(crate) mod def;
pub(crate) mod vector;
