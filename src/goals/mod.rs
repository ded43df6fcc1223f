//! Library of goals

pub mod combinators;
pub mod fresh;
pub mod list;
pub mod primitive;
pub mod template;
