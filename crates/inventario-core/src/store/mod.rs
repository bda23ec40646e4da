// ── Reactive data store ──
//
// The three collections the client mirrors from the backend, each held in
// a `watch` channel and replaced wholesale on every successful fetch.

mod data_store;
mod slot;

pub use data_store::DataStore;
pub use slot::Versioned;
