// Domain module: backend-independent model, contract and policy

pub mod models;
pub mod registry;
pub mod selector;
pub mod solver_service;
pub mod value_objects;

pub use models::*;
pub use registry::*;
pub use selector::*;
pub use solver_service::*;
pub use value_objects::*;
