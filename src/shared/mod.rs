pub mod constants;
#[cfg(test)]
pub mod in_memory;
pub mod test_helpers;
pub mod types;
pub mod validation;
