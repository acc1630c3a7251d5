pub(crate) mod engine;
pub(crate) mod preview;
pub(crate) mod request;
