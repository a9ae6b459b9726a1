pub mod item_store_gateway;

pub use item_store_gateway::ItemStoreGateway;
