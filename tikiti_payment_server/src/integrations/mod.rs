pub mod stk;
pub mod tickets;
