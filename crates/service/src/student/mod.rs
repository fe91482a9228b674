pub mod dto;
pub mod repository;
pub mod repo;
pub mod service;
