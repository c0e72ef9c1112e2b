pub mod app_state;
pub mod dto;
pub mod jwt_middleware;
pub mod rest;
