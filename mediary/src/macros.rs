//! Declarative contract declarations.
//!
//! Shorthand for the common `impl Contract` shapes. Each macro accepts one or
//! more declarations:
//!
//! ```rust
//! use mediary::{command, event, request};
//!
//! struct GetUser { id: u64 }
//! struct UserName(String);
//! struct DeleteUser { id: u64 }
//! struct UserDeleted { id: u64 }
//!
//! request! { GetUser => UserName }
//! command! { DeleteUser }
//! event! { UserDeleted }
//! ```

/// Declare request contracts: `request! { Ty => Response, ... }`.
#[macro_export]
macro_rules! request {
    ($($contract:ty => $response:ty),+ $(,)?) => {
        $(
            impl $crate::Contract for $contract {
                type Response = $response;
            }
        )+
    };
}

/// Declare command contracts: `command! { Ty, ... }`. The response is the
/// [`CommandReceipt`](crate::CommandReceipt) sentinel.
#[macro_export]
macro_rules! command {
    ($($contract:ty),+ $(,)?) => {
        $(
            impl $crate::Contract for $contract {
                type Response = $crate::CommandReceipt;
                const KIND: $crate::ContractKind = $crate::ContractKind::Command;
            }
        )+
    };
}

/// Declare event contracts: `event! { Ty, ... }`. The response is the
/// [`EventReceipt`](crate::EventReceipt) sentinel.
#[macro_export]
macro_rules! event {
    ($($contract:ty),+ $(,)?) => {
        $(
            impl $crate::Contract for $contract {
                type Response = $crate::EventReceipt;
                const KIND: $crate::ContractKind = $crate::ContractKind::Event;
            }
        )+
    };
}
