pub mod batch;
pub mod resolve;
pub mod submit;

#[cfg(test)]
mod testing;
