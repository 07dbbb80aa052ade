pub mod day_group;
pub mod entry;
pub mod entry_type;
pub mod profile;
