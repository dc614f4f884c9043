//! Inbound adapters translating transport requests into driving-port
//! calls.

pub mod http;
