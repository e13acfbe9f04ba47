pub(crate) mod capture;
pub(crate) mod engine;
pub(crate) mod scheduler;
