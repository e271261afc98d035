pub mod confirmation;

pub use confirmation::{AssumeYes, Confirmer};
