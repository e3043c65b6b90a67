pub mod cards;
pub mod contact;
pub mod work;
