pub mod invocation_args;

pub use invocation_args::InvocationArgs;
