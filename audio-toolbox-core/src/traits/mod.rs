pub mod disposal_policy;
