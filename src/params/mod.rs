pub(crate) mod records;
pub(crate) mod store;
