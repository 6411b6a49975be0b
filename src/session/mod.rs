pub(crate) mod animated;
