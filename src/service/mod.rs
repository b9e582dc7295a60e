//! CrudService: generic CRUD using the safe SQL builder.

mod crud;
mod validation;
pub use crud::{Created, CrudService};
pub use validation::RequestValidator;
