pub mod configure;
pub mod form;
pub mod list;
pub mod register;
