pub(crate) mod cover;
pub(crate) mod geometry;
pub(crate) mod spec;
