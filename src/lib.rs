// src/lib.rs

pub mod config;
pub mod storage;
pub mod persona;
pub mod llm;
pub mod fallback;
pub mod engine;
pub mod controller;
