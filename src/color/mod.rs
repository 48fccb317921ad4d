pub(crate) mod ycbcr;
