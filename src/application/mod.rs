// Application layer: the dispatch session

pub mod dispatch;

pub use dispatch::Session;
