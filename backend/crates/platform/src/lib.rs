//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC strings)
//! - Local image file storage

pub mod password;
pub mod storage;
