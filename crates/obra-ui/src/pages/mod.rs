pub mod budgets;
pub mod decompositions;
pub mod elements;
pub mod home;
pub mod login;
pub mod measurements;
pub mod prices;
pub mod projects;
pub mod register;
pub mod roles;
pub mod units;
pub mod users;
pub mod versions;
