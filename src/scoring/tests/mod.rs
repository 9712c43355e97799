mod common;
mod registry;
