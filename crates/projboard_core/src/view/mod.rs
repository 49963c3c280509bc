//! Derived views over store snapshots.

pub mod project_list;
