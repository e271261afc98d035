//! Domain types: filtering policy, repository candidates, dispatch results and
//! the split command line.

pub mod entities;
pub mod value_objects;
