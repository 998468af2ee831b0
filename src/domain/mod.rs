//! Payment value objects and the ports provider and storage implementations
//! plug into.

pub mod amount;
pub mod gateway;
pub mod ports;
pub mod purchase;
pub mod response;
pub mod transaction;
