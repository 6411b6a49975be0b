pub(crate) mod kinetic;
