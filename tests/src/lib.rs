//! Integration tests for the barrage engine, driven against loopback
//! stub services.

#[cfg(test)]
mod engine;
