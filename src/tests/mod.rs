#[cfg(test)]
pub mod common;
mod concurrent_issuance;
mod config_file;
