// Domain layer - Entity model and validation errors
pub mod dashboard;
pub mod datasource;
pub mod error;
pub mod plugin;
pub mod resource;
