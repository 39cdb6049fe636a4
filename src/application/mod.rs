// Application layer - Validation use cases and consumed capabilities
pub mod schema_validator;
pub mod validation;
pub mod variable_order;
