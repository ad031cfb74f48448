pub mod handlers;
pub mod routes;
pub mod shared;
pub mod state;
pub mod usecases;

#[cfg(test)]
pub(crate) mod test_utils;
