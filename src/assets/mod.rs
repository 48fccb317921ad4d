pub(crate) mod grab;
