pub(crate) mod focus;
pub(crate) mod keyboard;
pub(crate) mod listener;
