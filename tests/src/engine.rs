mod integration;
mod stubs;
