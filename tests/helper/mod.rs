#![allow(dead_code)]

mod collaborators;

pub use collaborators::{StubImageInspector, StubPackageQuery, create_test_engine, master_host};
