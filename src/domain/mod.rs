pub mod issue_type;
pub mod project;
pub mod robot;
pub mod template;
pub mod ticket;
