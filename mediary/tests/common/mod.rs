#![allow(dead_code)]

use mediary::{command, event, request};

// ============================================================================
// Test Contract Types
// ============================================================================

pub struct Ping {
    pub seq: u32,
}

pub struct GreetRequest {
    pub name: String,
}

pub struct AuditCommand {
    pub entry: &'static str,
}

pub struct CacheInvalidated {
    pub key: &'static str,
}

request! {
    Ping => u32,
    GreetRequest => String,
}

command! { AuditCommand }

event! { CacheInvalidated }
