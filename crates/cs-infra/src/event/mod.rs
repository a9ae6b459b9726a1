pub mod channel_emitter;

pub use channel_emitter::BroadcastEventEmitter;
