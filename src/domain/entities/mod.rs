pub mod entitlement;
pub mod webhook_event;
