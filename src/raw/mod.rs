mod arena;
mod handle;
mod node;
mod raw_rbst;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_rbst::RawRbst;
