pub mod broadcast_dispatcher;
