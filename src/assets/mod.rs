pub(crate) mod decode;
pub(crate) mod frames;
pub(crate) mod glyph;
pub(crate) mod loader;
pub(crate) mod stickers;
