//! JSON-RPC bridge between the engine and the hosting web page.

pub mod web_rpc;
