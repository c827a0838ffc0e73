//! Lowering application layer

mod lower_file;

pub use lower_file::{LowerFileUseCase, LowerFileUseCaseImpl};
