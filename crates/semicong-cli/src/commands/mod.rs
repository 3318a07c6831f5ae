pub mod classes;
pub mod contains;
pub mod quotient;
pub mod toy;
