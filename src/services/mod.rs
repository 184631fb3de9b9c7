//! Business logic services

pub mod referential;

pub use referential::{
    check_project_parents, check_todo_parents, DbParentLookup, ParentCheck, ParentKind,
    ParentLookup,
};
