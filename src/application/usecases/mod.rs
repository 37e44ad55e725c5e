pub mod start_broadcast;
