pub mod article;
pub mod site;
pub mod user;
