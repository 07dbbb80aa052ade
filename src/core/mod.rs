pub mod age;
pub mod backup;
pub mod calculator;
pub mod logic;
pub mod report;
pub mod store;
pub mod sync;
pub mod window;
