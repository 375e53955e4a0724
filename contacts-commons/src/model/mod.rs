mod contact;
pub use contact::*;

mod form;
pub use form::*;
