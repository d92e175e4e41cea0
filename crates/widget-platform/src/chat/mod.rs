pub mod chatbase;

pub use chatbase::ChatbaseClient;
