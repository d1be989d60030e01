pub mod algebra;
pub mod domain;
pub mod service;
