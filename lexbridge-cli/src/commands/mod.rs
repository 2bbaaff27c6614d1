pub mod drop;
pub mod load;
pub mod match_cmd;
pub mod query;
pub mod update;
