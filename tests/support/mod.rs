#![allow(dead_code)]

pub mod fake_api;
pub mod temp_db;
