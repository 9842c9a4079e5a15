//! Network gateway to the hosted temple directory database
//!
//! One trait (the contract the import driver sees), one PostgREST
//! implementation, and the slug rules the insert path applies.

pub mod gateway;
pub mod slug;
pub mod supabase;

pub use gateway::{Gateway, GatewayError, NewTemple, StoredTemple};
pub use supabase::SupabaseGateway;
